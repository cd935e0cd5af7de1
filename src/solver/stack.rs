use crate::engine::score::utility;
use crate::state::{actions, terminal, Action, State};

use super::minimax::{expand, Best};

struct Frame {
    state: State,
    actions: Vec<Action>,
    next: usize,
    best: Best,
}

impl Frame {
    fn open(state: State, is_maximizing: bool) -> Self {
        Self {
            actions: actions(&state),
            state,
            next: 0,
            best: Best::new(is_maximizing),
        }
    }
}

/// Minimax on an explicit work stack instead of the call stack.
///
/// Children are expanded in the same order as the recursive search, so the
/// returned value and action are identical to `minimax`.
///
/// # Panics
/// Under the same condition as `minimax`.
pub fn minimax_stack(state: &State, is_maximizing: bool) -> (i64, Option<Action>) {
    let mut nodes = 0u64;
    minimax_stack_counted(state, is_maximizing, &mut nodes)
}

pub fn minimax_stack_counted(state: &State, is_maximizing: bool, nodes: &mut u64) -> (i64, Option<Action>) {
    *nodes += 1;
    if terminal(state) {
        return (utility(state), None);
    }

    let mut stack = vec![Frame::open(state.clone(), is_maximizing)];
    let mut result = (utility(state), None);
    while let Some(top) = stack.last_mut() {
        let pending = top.actions.get(top.next).copied();
        if let Some(action) = pending {
            top.next += 1;
            let child = expand(&top.state, action);
            *nodes += 1;
            if terminal(&child) {
                top.best.offer(utility(&child), action);
            } else {
                let child_maximizing = !top.best.is_maximizing();
                stack.push(Frame::open(child, child_maximizing));
            }
            continue;
        }

        // Frame exhausted: its value answers the parent's last expanded action.
        let Some(done) = stack.pop() else { break };
        let (value, action) = done.best.finish(&done.state);
        match stack.last_mut() {
            Some(parent) => {
                let via = parent.actions[parent.next - 1];
                parent.best.offer(value, via);
            }
            None => result = (value, action),
        }
    }
    result
}
