use crate::engine::apply::succ;
use crate::engine::score::utility;
use crate::state::{actions, terminal, Action, State};

/// Running best `(value, action)` at one node.
/// Only a strict improvement replaces the incumbent, so among equal values
/// the first action in enumeration order is kept.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Best {
    is_maximizing: bool,
    found: Option<(i64, Action)>,
}

impl Best {
    #[inline]
    pub(crate) fn new(is_maximizing: bool) -> Self {
        Self {
            is_maximizing,
            found: None,
        }
    }

    #[inline]
    pub(crate) fn is_maximizing(&self) -> bool {
        self.is_maximizing
    }

    #[inline]
    pub(crate) fn offer(&mut self, value: i64, action: Action) {
        let better = match self.found {
            None => true,
            Some((best, _)) if self.is_maximizing => value > best,
            Some((best, _)) => value < best,
        };
        if better {
            self.found = Some((value, action));
        }
    }

    /// Result for the node; a node with no candidates scores as a leaf.
    #[inline]
    pub(crate) fn finish(self, state: &State) -> (i64, Option<Action>) {
        match self.found {
            Some((value, action)) => (value, Some(action)),
            None => (utility(state), None),
        }
    }
}

/// Child of `state` under one of its enumerated actions. `actions` only
/// yields moves `succ` accepts, and within `check_bounds` no score can
/// overflow, so a failure here is a broken precondition.
#[inline]
pub(crate) fn expand(state: &State, action: Action) -> State {
    match succ(state, action) {
        Ok(child) => child,
        Err(e) => panic!("search precondition violated at {action}: {e}"),
    }
}

/// Exhaustive minimax from `state`.
///
/// Returns the game-theoretic value (`ai - player` at the end of optimal
/// play) and the first action in canonical order that achieves it. Terminal
/// states return `(utility, None)`.
///
/// # Panics
/// If `state` fails `State::check_bounds`: a score would overflow `u64`
/// partway down the tree. `Solver::search` and `search_root` check the bound
/// and return `CoinError::ScoreOverflow` instead.
pub fn minimax(state: &State, is_maximizing: bool) -> (i64, Option<Action>) {
    let mut nodes = 0u64;
    minimax_counted(state, is_maximizing, &mut nodes)
}

/// `minimax` that also counts every visited state into `nodes`.
pub fn minimax_counted(state: &State, is_maximizing: bool, nodes: &mut u64) -> (i64, Option<Action>) {
    *nodes += 1;
    if terminal(state) {
        return (utility(state), None);
    }

    let mut best = Best::new(is_maximizing);
    for action in actions(state) {
        let child = expand(state, action);
        let (value, _) = minimax_counted(&child, !is_maximizing, nodes);
        best.offer(value, action);
    }
    best.finish(state)
}
