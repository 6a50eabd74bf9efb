//! Identifier types shared by the ledger, trackers and wire layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 1-based innings number. Limited-overs matches use 1..=2, multi-day 1..=4.
pub type InningNumber = u8;

macro_rules! public_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

public_id!(
    /// Backend public id of a player (batter, bowler or fielder).
    PlayerId
);
public_id!(
    /// Backend public id of a team.
    TeamId
);
public_id!(
    /// Backend public id of a match.
    MatchId
);
