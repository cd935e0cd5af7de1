//! JSON and text input surface for the solver.

use serde::{Deserialize, Serialize};

use crate::engine::score::winner;
use crate::error::CoinError;
use crate::solver::{SearchOptions, Solver};
use crate::state::{player, terminal, Action, State};
use crate::types::Side;

fn default_turn() -> Side {
    Side::Player
}

/// State as accepted on stdin by `--eval-state`. Scores default to zero and
/// the turn to the player.
#[derive(Debug, Clone, Deserialize)]
pub struct StateInput {
    pub coins: Vec<u32>,
    #[serde(default)]
    pub player_score: u64,
    #[serde(default)]
    pub ai_score: u64,
    #[serde(default = "default_turn")]
    pub turn: Side,
}

impl TryFrom<StateInput> for State {
    type Error = CoinError;

    fn try_from(input: StateInput) -> Result<Self, Self::Error> {
        let state = State {
            coins: input.coins,
            player_score: input.player_score,
            ai_score: input.ai_score,
            turn: input.turn,
        };
        state.check_bounds()?;
        Ok(state)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvalOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_action: Option<Action>,
    pub value: i64,
    pub pv: Vec<Action>,
    pub nodes: u64,
    pub terminal: bool,
    pub winner: Option<Side>,
    pub to_move: Side,
}

pub fn evaluate_state(state: &State, options: SearchOptions) -> Result<EvalOutput, CoinError> {
    let mut solver = Solver::new(options);
    let res = solver.search(state)?;
    Ok(EvalOutput {
        best_action: res.best_action,
        value: res.value,
        pv: res.principal_variation,
        nodes: res.nodes,
        terminal: terminal(state),
        winner: winner(state),
        to_move: player(state),
    })
}

/// Parse a JSON state and solve it.
pub fn evaluate_json(input: &str, options: SearchOptions) -> Result<EvalOutput, CoinError> {
    let parsed: StateInput = serde_json::from_str(input)?;
    evaluate_state(&State::try_from(parsed)?, options)
}

/// Parse a comma separated coin list such as `3,1,3`. Blank input is an
/// empty line; whitespace around values is ignored.
pub fn parse_coins(s: &str) -> Result<Vec<u32>, CoinError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(',')
        .map(|tok| {
            tok.trim().parse::<u32>().map_err(|e| CoinError::CoinList {
                input: s.to_string(),
                message: format!("'{}': {e}", tok.trim()),
            })
        })
        .collect()
}
