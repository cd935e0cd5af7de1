use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde::Deserialize;
use std::io::Write;
use std::process::{Command, Stdio};

use coinline::{minimax, new_state, Action, End};

#[derive(Deserialize)]
struct EvalActionOut {
    side: String,
    count: u8,
}

#[derive(Deserialize)]
struct EvalOut {
    #[serde(default)]
    best_action: Option<EvalActionOut>,
    value: i64,
    pv: Vec<EvalActionOut>,
    nodes: u64,
    terminal: bool,
    winner: Option<String>,
    to_move: String,
}

fn run_with_stdin(input: &str, args: &[&str]) -> std::process::Output {
    let mut cmd = Command::cargo_bin("coinline").expect("binary exists");
    cmd.args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd.spawn().expect("spawn");
    {
        let stdin = child.stdin.as_mut().expect("stdin");
        stdin.write_all(input.as_bytes()).expect("write stdin");
    }
    child.wait_with_output().expect("wait output")
}

#[test]
fn test_eval_matches_in_process_minimax() {
    let (value, action) = minimax(&new_state(vec![3, 1, 3]), false);
    assert_eq!(action, Some(Action::new(End::Left, 2)));

    let input_json = serde_json::json!({ "coins": [3, 1, 3] }).to_string();
    let output = run_with_stdin(&input_json, &["--eval-state"]);
    assert!(output.status.success(), "process must succeed");
    let stdout = String::from_utf8(output.stdout.clone()).expect("utf8 stdout");

    // Exactly one JSON object line
    assert!(predicate::str::is_match(r#"^\{.*\}\r?\n?$"#).unwrap().eval(&stdout));
    assert!(!String::from_utf8(output.stderr).unwrap().contains("[coinline]"));

    let eval: EvalOut = serde_json::from_str(&stdout).expect("json parse output");
    assert_eq!(eval.value, value);
    let best = eval.best_action.expect("best_action present at non-terminal");
    assert_eq!(best.side, "L");
    assert_eq!(best.count, 2);
    assert_eq!(eval.pv.len(), 2, "(L,2) then the last coin");
    assert_eq!(eval.pv[1].count, 1);
    assert!(!eval.terminal);
    assert!(eval.winner.is_none());
    assert_eq!(eval.to_move, "player");
    assert!(eval.nodes > 1);
}

#[test]
fn test_eval_respects_turn_and_scores() {
    let input_json = serde_json::json!({
        "coins": [5],
        "player_score": 2,
        "ai_score": 1,
        "turn": "ai"
    })
    .to_string();
    let output = run_with_stdin(&input_json, &["--eval-state", "--strategy", "stack"]);
    assert!(output.status.success());
    let eval: EvalOut = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(eval.value, 4);
    assert_eq!(eval.to_move, "ai");
}

#[test]
fn test_eval_determinism_two_runs_identical() {
    let input_json = serde_json::json!({ "coins": [4, 1, 6, 9, 2, 7] }).to_string();
    let out1 = run_with_stdin(&input_json, &["--eval-state"]);
    let out2 = run_with_stdin(&input_json, &["--eval-state", "--strategy", "parallel"]);
    assert!(out1.status.success() && out2.status.success());
    assert_eq!(out1.stdout, out2.stdout, "identical input must produce identical output");
}

#[test]
fn test_eval_terminal_state_omits_best_action() {
    let input_json = serde_json::json!({ "coins": [], "player_score": 3, "ai_score": 7 }).to_string();
    let output = run_with_stdin(&input_json, &["--eval-state"]);
    assert!(output.status.success(), "terminal eval must succeed");
    let eval: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert!(eval.get("best_action").is_none(), "best_action must be omitted at terminal");
    assert_eq!(eval["value"], 4);
    assert_eq!(eval["winner"], "ai");
    assert_eq!(eval["terminal"], true);
}

#[test]
fn test_eval_invalid_json_exit_1() {
    let bad = r#"{ "coins": "oops", "#;
    let output = run_with_stdin(bad, &["--eval-state"]);
    assert!(!output.status.success(), "invalid json must fail");
    let err = String::from_utf8(output.stderr).unwrap();
    assert!(err.to_lowercase().contains("invalid json"), "stderr should contain parse error, got: {err}");
}

#[test]
fn test_solve_prints_summary_line() {
    Command::cargo_bin("coinline")
        .expect("binary exists")
        .args(["--coins", "3,1,3", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("value=-1 best_action=(L,2) pv=[(L,2) (L,1)]"));
}

#[test]
fn test_play_announces_winner() {
    Command::cargo_bin("coinline")
        .expect("binary exists")
        .args(["--coins", "3,1,3", "--play", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[play] 1: player takes (L,2) for 4"))
        .stdout(predicate::str::contains("[play] winner: player"));
}

#[test]
fn test_sweep_counts_all_lines() {
    Command::cargo_bin("coinline")
        .expect("binary exists")
        .args(["--random", "5", "--sweep", "6", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"lines=6 len=5 ai_wins=\d+ player_wins=\d+ ties=\d+").unwrap());
}

#[test]
fn test_bad_coin_list_fails() {
    Command::cargo_bin("coinline")
        .expect("binary exists")
        .args(["--coins", "3,x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid coin list"));
}

#[test]
fn test_eval_oversized_score_exit_1() {
    let input_json = r#"{ "coins": [1], "player_score": 18446744073709551615 }"#;
    let output = run_with_stdin(input_json, &["--eval-state"]);
    assert!(!output.status.success(), "score past the i64 range must fail");
    assert!(output.stdout.is_empty(), "no JSON line on failure");
    let err = String::from_utf8(output.stderr).unwrap();
    assert!(err.contains("score overflow"), "stderr should name the overflow, got: {err}");
}

#[test]
fn test_sweep_rejects_play_and_eval_state() {
    Command::cargo_bin("coinline")
        .expect("binary exists")
        .args(["--random", "5", "--sweep", "2", "--play"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));

    let output = run_with_stdin("{}", &["--random", "5", "--sweep", "2", "--eval-state"]);
    assert!(!output.status.success(), "--sweep with --eval-state must fail");
}

#[test]
fn test_eval_state_rejects_line_flags() {
    let output = run_with_stdin(r#"{ "coins": [1] }"#, &["--eval-state", "--coins", "3,1,3"]);
    assert!(!output.status.success(), "--eval-state with --coins must fail");
}
