use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;

use crate::engine::score::utility;
use crate::state::{actions, terminal, Action, State};

use super::minimax::{expand, minimax_counted, Best};

/// Minimax with the root's children searched on the rayon pool.
///
/// Each worker owns its child state; subtree values are collected in
/// enumeration order and folded sequentially, so ties resolve exactly as in
/// the sequential search.
///
/// # Panics
/// Under the same condition as `minimax`.
pub fn minimax_parallel(state: &State, is_maximizing: bool) -> (i64, Option<Action>) {
    let nodes = AtomicU64::new(0);
    minimax_parallel_counted(state, is_maximizing, &nodes)
}

pub fn minimax_parallel_counted(state: &State, is_maximizing: bool, nodes: &AtomicU64) -> (i64, Option<Action>) {
    nodes.fetch_add(1, Ordering::Relaxed);
    if terminal(state) {
        return (utility(state), None);
    }

    let children: Vec<(Action, i64)> = actions(state)
        .into_par_iter()
        .map(|action| {
            let child = expand(state, action);
            let mut local = 0u64;
            let (value, _) = minimax_counted(&child, !is_maximizing, &mut local);
            nodes.fetch_add(local, Ordering::Relaxed);
            (action, value)
        })
        .collect();

    let mut best = Best::new(is_maximizing);
    for (action, value) in children {
        best.offer(value, action);
    }
    best.finish(state)
}
