//! Drives the game binary over stdin the way the game host does and checks
//! the command line printed for every turn.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

fn run_bot(args: &[&str], input: &str) -> (Vec<String>, bool) {
    let exe = env!("CARGO_BIN_EXE_main");
    let mut child = Command::new(exe)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start bot");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    stdin.write_all(input.as_bytes()).unwrap();
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on bot");
    (lines, status.success())
}

/// 5x1 open corridor, own pac at (0,0), pellets at (1,0) worth 1 and
/// (4,0) worth 10. Both are one step away thanks to the wraparound.
const CORRIDOR: &str = "5 1\n     \n0 0\n1\n0 1 0 0 ROCK 0 0\n2\n1 0 1\n4 0 10\n";

#[test]
fn nearest_ranking_takes_first_reported_of_equal_distance() {
    let (lines, ok) = run_bot(&[], CORRIDOR);
    assert!(ok);
    assert_eq!(lines, vec!["MOVE 0 1 0"]);
}

#[test]
fn value_first_ranking_takes_the_big_pellet() {
    let (lines, ok) = run_bot(&["--ranking", "value-first"], CORRIDOR);
    assert!(ok);
    assert_eq!(lines, vec!["MOVE 0 4 0"]);
}

#[test]
fn one_line_per_turn_with_every_own_pac() {
    let input = concat!(
        "7 3\n",
        "#######\n",
        "   #   \n",
        "#######\n",
        // turn 1: two own pacs, one opponent, one pellet on each side
        "0 0\n",
        "3\n",
        "0 1 1 1 ROCK 0 0\n",
        "1 1 5 1 PAPER 0 0\n",
        "0 0 6 1 SCISSORS 0 0\n",
        "2\n",
        "0 1 1\n",
        "4 1 1\n",
        // turn 2: nothing left to eat
        "2 0\n",
        "2\n",
        "0 1 0 1 ROCK 0 0\n",
        "1 1 4 1 PAPER 0 0\n",
        "0\n",
    );

    let (lines, ok) = run_bot(&[], input);
    assert!(ok);
    assert_eq!(lines, vec!["MOVE 0 0 1 | MOVE 1 4 1", "MOVE 0 0 1 | MOVE 1 4 1"]);
}

#[test]
fn debug_log_level_comes_from_the_environment() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_main"))
        .env("RUST_LOG", "debug")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start bot");

    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(CORRIDOR.as_bytes()).unwrap();
    drop(stdin);

    let output = child.wait_with_output().expect("failed to wait on bot");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "MOVE 0 1 0");

    let log = String::from_utf8_lossy(&output.stderr);
    assert!(log.contains("board ready"), "{}", log);
    assert!(log.contains("target selected"), "{}", log);
    assert!(log.contains("candidates=2"), "{}", log);
}

#[test]
fn malformed_grid_exits_with_failure() {
    let (lines, ok) = run_bot(&[], "3 2\n   \n");
    assert!(!ok);
    assert!(lines.is_empty());
}
