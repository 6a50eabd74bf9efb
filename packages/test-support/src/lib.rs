//! Unique public ids for tests.
//!
//! Integration tests that share a process must not reuse match or player
//! ids, otherwise one test's dedup keys collide with another's.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use test_support::unique_public_id;
///
/// let a = unique_public_id("match");
/// assert_ne!(a, unique_public_id("match"));
/// assert!(a.starts_with("match-"));
/// ```
pub fn unique_public_id(prefix: &str) -> String {
    format!("{prefix}-{}", Ulid::new())
}

pub fn unique_match_id() -> String {
    unique_public_id("match")
}

pub fn unique_team_id() -> String {
    unique_public_id("team")
}

/// `count` player ids sharing one ULID suffix, numbered from 1:
/// `{prefix}1-{ulid}`, `{prefix}2-{ulid}`, ...
pub fn unique_player_ids(prefix: &str, count: usize) -> Vec<String> {
    let suffix = Ulid::new();
    (1..=count).map(|n| format!("{prefix}{n}-{suffix}")).collect()
}
