use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::CoinError;
use crate::state::{player, terminal, Action, State};

use self::minimax::expand;

pub mod minimax;
pub mod parallel;
pub mod stack;

pub use minimax::{minimax, minimax_counted};
pub use parallel::minimax_parallel;
pub use stack::minimax_stack;

/// How the game tree is walked. Every strategy returns the same value and
/// tie-broken action for the same input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    #[default]
    Recursive,
    Stack,
    Parallel,
}

#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    pub strategy: Strategy,
    pub principal_variation: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Recursive,
            principal_variation: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// `ai - player` at the end of optimal play.
    pub value: i64,
    pub best_action: Option<Action>,
    pub principal_variation: Vec<Action>,
    /// States visited, principal-variation replays included.
    pub nodes: u64,
}

/// Search driver. The maximizing flag is taken from the side to move:
/// the AI maximizes, the player minimizes.
#[derive(Debug, Default)]
pub struct Solver {
    options: SearchOptions,
    nodes: u64,
}

impl Solver {
    pub fn new(options: SearchOptions) -> Self {
        Self { options, nodes: 0 }
    }

    #[inline]
    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Total states visited across all searches run by this solver.
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Solve `state` for the side to move.
    ///
    /// The principal variation is rebuilt by re-searching each successor on
    /// the optimal line. Those subtrees shrink geometrically, so the replay
    /// costs well under one extra root search.
    pub fn search(&mut self, state: &State) -> Result<SearchResult, CoinError> {
        state.check_bounds()?;
        let mut nodes = 0u64;
        let is_maximizing = player(state).is_maximizing();
        let (value, best_action) = self.run(state, is_maximizing, &mut nodes);

        let mut principal_variation = Vec::new();
        if self.options.principal_variation {
            if let Some(first) = best_action {
                principal_variation.push(first);
                let mut cur = expand(state, first);
                let mut maximizing = !is_maximizing;
                while !terminal(&cur) {
                    let (_, next) = self.run(&cur, maximizing, &mut nodes);
                    let Some(action) = next else { break };
                    principal_variation.push(action);
                    cur = expand(&cur, action);
                    maximizing = !maximizing;
                }
            }
        }

        self.nodes += nodes;
        Ok(SearchResult {
            value,
            best_action,
            principal_variation,
            nodes,
        })
    }

    fn run(&self, state: &State, is_maximizing: bool, nodes: &mut u64) -> (i64, Option<Action>) {
        match self.options.strategy {
            Strategy::Recursive => minimax::minimax_counted(state, is_maximizing, nodes),
            Strategy::Stack => stack::minimax_stack_counted(state, is_maximizing, nodes),
            Strategy::Parallel => {
                let counter = AtomicU64::new(0);
                let out = parallel::minimax_parallel_counted(state, is_maximizing, &counter);
                *nodes += counter.load(Ordering::Relaxed);
                out
            }
        }
    }
}

/// Convenience: `(value, best_action, nodes)` for the side to move.
pub fn search_root(state: &State) -> Result<(i64, Option<Action>, u64), CoinError> {
    state.check_bounds()?;
    let mut nodes = 0u64;
    let (value, action) = minimax_counted(state, player(state).is_maximizing(), &mut nodes);
    Ok((value, action, nodes))
}
