//! Error types for the coin line crate

use thiserror::Error;

use crate::state::Action;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CoinError {
    /// Action is not one of `actions(state)` for the state it was applied to.
    #[error("invalid action {action}: {available} coin(s) left on the line")]
    InvalidAction { action: Action, available: usize },

    /// Scores plus remaining coins exceed `MAX_TOTAL_VALUE`.
    #[error("score overflow: total value {total} exceeds {max}", max = crate::state::MAX_TOTAL_VALUE)]
    ScoreOverflow { total: u128 },

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid coin list '{input}': {message}")]
    CoinList { input: String, message: String },
}
