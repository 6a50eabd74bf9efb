use std::env;
use std::str::FromStr;

use crate::domain::rules::{DEFAULT_BALLS_PER_OVER, MAX_BALLS_PER_OVER};
use crate::error::AppError;

pub const DEFAULT_SPORT: &str = "cricket";
pub const DEFAULT_DEDUP_WINDOW: usize = 128;

/// Runtime knobs for a scoring session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringConfig {
    /// `{sport}` path segment of the REST endpoints.
    pub sport: String,
    /// How many applied event keys are remembered for deduplication.
    pub dedup_window: usize,
    pub balls_per_over: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            sport: DEFAULT_SPORT.to_string(),
            dedup_window: DEFAULT_DEDUP_WINDOW,
            balls_per_over: DEFAULT_BALLS_PER_OVER,
        }
    }
}

impl ScoringConfig {
    /// Reads `SCORING_*` variables; unset variables fall back to defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let sport = sport()?;
        let dedup_window = parsed_var("SCORING_DEDUP_WINDOW", DEFAULT_DEDUP_WINDOW)?;
        if dedup_window == 0 {
            return Err(AppError::config(
                "SCORING_DEDUP_WINDOW must be at least 1".to_string(),
            ));
        }
        let balls_per_over = parsed_var("SCORING_BALLS_PER_OVER", DEFAULT_BALLS_PER_OVER)?;
        if !(1..=MAX_BALLS_PER_OVER).contains(&balls_per_over) {
            return Err(AppError::config(format!(
                "SCORING_BALLS_PER_OVER must be between 1 and {MAX_BALLS_PER_OVER}, got {balls_per_over}"
            )));
        }

        Ok(Self {
            sport,
            dedup_window,
            balls_per_over,
        })
    }
}

fn sport() -> Result<String, AppError> {
    match env::var("SCORING_SPORT") {
        Ok(value) if value.trim().is_empty() => Err(AppError::config(
            "SCORING_SPORT is set but empty".to_string(),
        )),
        Ok(value) if value.contains('/') => Err(AppError::config(format!(
            "SCORING_SPORT must be a single path segment, got '{value}'"
        ))),
        Ok(value) => Ok(value.trim().to_string()),
        Err(_) => Ok(DEFAULT_SPORT.to_string()),
    }
}

/// Get an optional environment variable, parsing it when present
fn parsed_var<T>(name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|e| {
            AppError::config(format!("Invalid value '{raw}' for '{name}': {e}"))
        }),
        Err(_) => Ok(default),
    }
}
