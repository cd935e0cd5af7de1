#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // may be revisited

pub mod error;
pub mod eval;
pub mod rng;
pub mod state;
pub mod types;

pub mod engine {
    pub mod apply;
    pub mod score;
}

pub mod solver;

// Re-exports: stable minimal API surface for external callers
pub use crate::engine::apply::succ;
pub use crate::engine::score::{utility, winner};
pub use crate::error::CoinError;
pub use crate::rng::{random_coins, rng_for_line};
pub use crate::solver::{minimax, minimax_parallel, minimax_stack, search_root, SearchOptions, SearchResult, Solver, Strategy};
pub use crate::state::{actions, new_state, player, terminal, Action, State, MAX_TOTAL_VALUE};
pub use crate::types::{End, Side};
