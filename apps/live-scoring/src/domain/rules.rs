//! Cricket scoring constants and delivery arithmetic.

use crate::errors::ScoringError;

pub const DEFAULT_BALLS_PER_OVER: u8 = 6;
pub const MAX_BALLS_PER_OVER: u8 = 10;

/// Batters at the wicket at any one time.
pub const MAX_CURRENT_BATTERS: usize = 2;

/// Penalty charged to the bowler for a wide or a no-ball.
pub const EXTRA_PENALTY_RUNS: u32 = 1;

/// Most runs a single delivery can plausibly produce, overthrows included.
pub const MAX_RUNS_PER_DELIVERY: u32 = 12;

/// How a delivery counts towards the over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Legal,
    Wide,
    NoBall,
}

impl Delivery {
    /// Resolve wire flags into a delivery kind. A ball cannot be both.
    pub fn from_flags(wide: bool, no_ball: bool) -> Result<Self, ScoringError> {
        match (wide, no_ball) {
            (false, false) => Ok(Delivery::Legal),
            (true, false) => Ok(Delivery::Wide),
            (false, true) => Ok(Delivery::NoBall),
            (true, true) => Err(ScoringError::malformed(
                "delivery cannot be both a wide and a no-ball",
            )),
        }
    }

    #[inline]
    pub fn is_legal(self) -> bool {
        matches!(self, Delivery::Legal)
    }

    /// Runs the bowler concedes for this delivery; `None` on overflow.
    #[inline]
    pub fn runs_conceded(self, runs: u32) -> Option<u32> {
        match self {
            Delivery::Legal => Some(runs),
            Delivery::Wide | Delivery::NoBall => runs.checked_add(EXTRA_PENALTY_RUNS),
        }
    }

    /// Runs credited to the innings as extras (not to any batter).
    #[inline]
    pub fn extras(self, runs: u32) -> Option<u32> {
        match self {
            Delivery::Legal => Some(0),
            Delivery::Wide => runs.checked_add(EXTRA_PENALTY_RUNS),
            Delivery::NoBall => Some(EXTRA_PENALTY_RUNS),
        }
    }

    /// Whether the striker is credited with facing this delivery.
    #[inline]
    pub fn counts_as_faced(self) -> bool {
        !matches!(self, Delivery::Wide)
    }
}

#[inline]
pub fn rotates_strike(runs: u32) -> bool {
    runs % 2 == 1
}

/// True when moving the legal-ball count from `before` to `after` reaches
/// or passes an over boundary. Server counts may skip numbers, so landing
/// exactly on a multiple is not required.
#[inline]
pub fn completes_over(before: u32, after: u32, balls_per_over: u8) -> bool {
    let per_over = u32::from(balls_per_over.max(1));
    after / per_over > before / per_over
}

/// Adds wire-sourced runs, reporting overflow as a malformed event.
pub fn add_runs(total: u32, runs: u32, what: &str) -> Result<u32, ScoringError> {
    total
        .checked_add(runs)
        .ok_or_else(|| ScoringError::malformed(format!("{what} overflows adding {runs} runs")))
}

/// Conventional overs notation: 22 legal balls at 6 per over is "3.4".
pub fn overs_display(legal_balls: u32, balls_per_over: u8) -> String {
    let per_over = u32::from(balls_per_over.max(1));
    format!("{}.{}", legal_balls / per_over, legal_balls % per_over)
}
