use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoinError;
use crate::types::{End, Side};

/// Upper bound on scores plus remaining coins. Within it every score and
/// every utility is representable as `i64`, and since transitions conserve
/// the total, so is every descendant.
pub const MAX_TOTAL_VALUE: u64 = i64::MAX.unsigned_abs();

/// Take `count` coins (1 or 2) from the `side` end of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub side: End,
    pub count: u8,
}

impl Action {
    #[inline]
    pub const fn new(side: End, count: u8) -> Self {
        Self { side, count }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.side, self.count)
    }
}

/// A position in the game. States are never updated in place: every
/// transition builds a fresh value with its own coin vector.
///
/// A well-formed state satisfies `check_bounds`; the search functions
/// require it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    pub coins: Vec<u32>, // leftmost first
    pub player_score: u64,
    pub ai_score: u64,
    pub turn: Side,
}

impl State {
    /// Opening position: both scores zero, the player moves first.
    #[inline]
    pub fn new(coins: Vec<u32>) -> Self {
        Self {
            coins,
            player_score: 0,
            ai_score: 0,
            turn: Side::Player,
        }
    }

    #[inline]
    pub fn with_turn(coins: Vec<u32>, turn: Side) -> Self {
        Self {
            turn,
            ..Self::new(coins)
        }
    }

    #[inline]
    pub fn score_of(&self, side: Side) -> u64 {
        match side {
            Side::Player => self.player_score,
            Side::Ai => self.ai_score,
        }
    }

    /// Sum of the coins still on the line.
    #[inline]
    pub fn coin_total(&self) -> u128 {
        self.coins.iter().map(|&c| u128::from(c)).sum()
    }

    /// Scores plus remaining coins; constant along any line of play.
    #[inline]
    pub fn total_value(&self) -> u128 {
        u128::from(self.player_score) + u128::from(self.ai_score) + self.coin_total()
    }

    /// Reject states whose total value exceeds `MAX_TOTAL_VALUE`.
    pub fn check_bounds(&self) -> Result<(), CoinError> {
        let total = self.total_value();
        if total > u128::from(MAX_TOTAL_VALUE) {
            return Err(CoinError::ScoreOverflow { total });
        }
        Ok(())
    }

    /// Legal actions in canonical order: (L,1), (R,1), (L,2), (R,2),
    /// dropping those that need more coins than remain.
    pub fn actions(&self) -> Vec<Action> {
        let n = self.coins.len();
        let mut out = Vec::with_capacity(4);
        for count in 1u8..=2 {
            if n < usize::from(count) {
                break;
            }
            for side in End::all() {
                out.push(Action::new(side, count));
            }
        }
        out
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.coins.is_empty()
    }
}

/// Construct the opening state for a coin line.
#[inline]
pub fn new_state(coins: Vec<u32>) -> State {
    State::new(coins)
}

/// Side to move. Once the line is empty the game is over and this reports
/// `Player`.
#[inline]
pub fn player(state: &State) -> Side {
    if state.is_terminal() {
        return Side::Player;
    }
    state.turn
}

#[inline]
pub fn actions(state: &State) -> Vec<Action> {
    state.actions()
}

#[inline]
pub fn terminal(state: &State) -> bool {
    state.is_terminal()
}
