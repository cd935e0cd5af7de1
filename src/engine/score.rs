use std::cmp::Ordering;

use crate::state::State;
use crate::types::Side;

/// Score difference `ai - player`: positive favours the AI.
/// Meant for terminal states; on a live state it is the running margin.
/// Exact for states within `check_bounds`; beyond it the magnitude
/// saturates at the `i64` limits but the sign always agrees with `winner`.
#[inline]
pub fn utility(state: &State) -> i64 {
    let gap = state.ai_score.abs_diff(state.player_score);
    match state.ai_score.cmp(&state.player_score) {
        Ordering::Greater => i64::try_from(gap).unwrap_or(i64::MAX),
        Ordering::Less => i64::try_from(gap).map_or(i64::MIN, |g| -g),
        Ordering::Equal => 0,
    }
}

/// Winner of a finished game. `None` while coins remain or on a tie.
#[inline]
pub fn winner(state: &State) -> Option<Side> {
    if !state.is_terminal() {
        return None;
    }
    match state.player_score.cmp(&state.ai_score) {
        Ordering::Greater => Some(Side::Player),
        Ordering::Less => Some(Side::Ai),
        Ordering::Equal => None,
    }
}
