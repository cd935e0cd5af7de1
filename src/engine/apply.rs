use crate::error::CoinError;
use crate::state::{Action, State};
use crate::types::{End, Side};

/// Apply an action as a pure transform: returns a new State on success.
/// Validates: count is 1 or 2 and no larger than the coins left, and the
/// mover's score does not overflow (never the case within `check_bounds`).
/// The side to move banks the taken coins and the turn passes.
pub fn succ(state: &State, action: Action) -> Result<State, CoinError> {
    let n = state.coins.len();
    let count = usize::from(action.count);
    if !(1..=2).contains(&count) || count > n {
        return Err(CoinError::InvalidAction {
            action,
            available: n,
        });
    }

    let (taken, rest) = match action.side {
        End::Left => (&state.coins[..count], &state.coins[count..]),
        End::Right => (&state.coins[n - count..], &state.coins[..n - count]),
    };
    let gained: u64 = taken.iter().map(|&c| u64::from(c)).sum();

    let overflow = || CoinError::ScoreOverflow {
        total: state.total_value(),
    };
    let (player_score, ai_score) = match state.turn {
        Side::Player => (
            state.player_score.checked_add(gained).ok_or_else(overflow)?,
            state.ai_score,
        ),
        Side::Ai => (
            state.player_score,
            state.ai_score.checked_add(gained).ok_or_else(overflow)?,
        ),
    };

    Ok(State {
        coins: rest.to_vec(),
        player_score,
        ai_score,
        turn: state.turn.other(),
    })
}
