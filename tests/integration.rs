//! Integration tests for the screamfield engine and binaries.
//!
//! The first half drives whole turns through the public engine API. The second
//! half spawns the controller and the greedy agent and checks their text
//! sessions.

use std::fs;
use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

use screamfield::{Cell, Coord, GameOver, Move, PlayerId, SimulationEngine};

fn id(c: char) -> PlayerId {
    PlayerId::from_letter(c).unwrap()
}

fn rows(engine: &SimulationEngine) -> Vec<String> {
    engine.grid_snapshot().rows()
}

// ---------------------------------------------------------------------------
// Engine scenarios
// ---------------------------------------------------------------------------

#[test]
fn movement_then_exposure() {
    let mut engine = SimulationEngine::new(&["A.1"], 1, 10).unwrap();

    // Turn 1: the person is out of reach, so its counter is reset.
    engine.submit_move(id('A'), Move::Right).unwrap();
    assert!(engine.advance());
    assert_eq!(rows(&engine), vec![".A0"]);

    // Turn 2: the scream now reaches it. The east edge blocks the push.
    engine.submit_move(id('A'), Move::Stop).unwrap();
    assert!(engine.advance());
    assert_eq!(rows(&engine), vec![".A1"]);
    assert_eq!(engine.current_turn(), 3);
}

#[test]
fn push_moves_person_away_once() {
    let mut engine = SimulationEngine::new(&["A1..."], 2, 10).unwrap();
    assert!(engine.advance());
    // Pushed one cell east; the cleared mask stops a second push.
    assert_eq!(rows(&engine), vec!["A.2.."]);
    assert_eq!(engine.cell_at(Coord::new(2, 0)).unwrap(), Cell::Person(2));
}

#[test]
fn push_falls_back_to_vertical() {
    // The person shares A's column, so only the vertical push applies.
    let mut engine = SimulationEngine::new(&["A", "3", "."], 1, 10).unwrap();
    assert!(engine.advance());
    assert_eq!(rows(&engine), vec!["A", ".", "4"]);
}

#[test]
fn saturated_person_converts_for_single_owner() {
    let mut engine = SimulationEngine::new(&["A9......B"], 1, 10).unwrap();
    assert!(engine.advance());
    assert_eq!(rows(&engine), vec!["A.......B"]);
    assert_eq!(engine.player_by_id(id('A')).unwrap().score, 1);
    assert_eq!(engine.people_remaining(), 0);
}

#[test]
fn contested_person_resets() {
    let mut engine = SimulationEngine::new(&["A9B"], 1, 10).unwrap();
    assert!(engine.advance());
    assert_eq!(rows(&engine), vec!["A0B"]);
    assert!(engine.roster().iter().all(|p| p.score == 0));
}

#[test]
fn scorer_overtakes_in_ranking() {
    let mut engine = SimulationEngine::new(&["A....B9", ".....1."], 1, 10).unwrap();
    assert_eq!(engine.player_by_rank(0).unwrap().id, id('A'));
    assert!(engine.advance());
    let first = engine.player_by_rank(0).unwrap();
    assert_eq!(first.id, id('B'));
    assert_eq!(first.rank, 0);
    assert_eq!(engine.player_by_id(id('A')).unwrap().rank, 1);
    assert!(engine.roster().ranking_is_consistent());
}

#[test]
fn majority_freezes_state() {
    // Nine people; five of them convert on the first turn.
    let mut engine = SimulationEngine::new(&["A99999....0000"], 5, 100).unwrap();
    assert_eq!(engine.total_people(), 9);
    assert!(engine.advance());
    assert_eq!(engine.player_by_id(id('A')).unwrap().score, 5);
    assert_eq!(engine.status(), Some(GameOver::Majority { leader: id('A') }));

    let before = engine.grid_snapshot().clone();
    let turn = engine.current_turn();
    assert!(!engine.advance());
    assert!(!engine.advance());
    assert_eq!(engine.grid_snapshot(), &before);
    assert_eq!(engine.current_turn(), turn);
}

#[test]
fn huge_radius_on_tiny_grid() {
    let mut engine = SimulationEngine::new(&["A1"], i32::MAX, 10).unwrap();
    assert!(engine.advance());
    // Owned by A, but the grid edge blocks the push.
    assert_eq!(rows(&engine), vec!["A2"]);
}

#[test]
fn kill_removes_influence_but_keeps_avatar() {
    let mut engine = SimulationEngine::new(&["A9B"], 1, 10).unwrap();
    engine.kill(id('B')).unwrap();
    engine.kill(id('B')).unwrap();
    assert_eq!(engine.alive_count(), 1);
    assert!(engine.advance());
    // A alone owns the person now.
    assert_eq!(rows(&engine), vec!["A.B"]);
    assert_eq!(engine.player_by_id(id('A')).unwrap().score, 1);
}

#[test]
fn construction_rejects_bad_letters() {
    assert!(SimulationEngine::new(&["AC"], 1, 10).is_err());
    assert!(SimulationEngine::new(&["B."], 1, 10).is_err());
    assert!(SimulationEngine::new(&["AA"], 1, 10).is_err());
    assert!(SimulationEngine::new(&["A#"], 1, 10).is_err());
    assert!(SimulationEngine::new(&["AB", "C"], 1, 10).is_err());
    assert!(SimulationEngine::new(&["..1"], 1, 10).is_err());
    assert!(SimulationEngine::new(&["AB", "DC"], 1, 10).is_ok());
}

// ---------------------------------------------------------------------------
// Binaries
// ---------------------------------------------------------------------------

/// Runs the controller on `input`, feeding `replies` as agent output.
/// Returns exit code, stdout lines and the history file.
fn run_controller(input: &str, replies: &str) -> (Option<i32>, Vec<String>, String) {
    let dir = tempfile::tempdir().unwrap();
    let map_path = dir.path().join("match.txt");
    let history_path = dir.path().join("history.log");
    fs::write(&map_path, input).unwrap();

    let exe = env!("CARGO_BIN_EXE_screamfield");
    let mut child = Command::new(exe)
        .arg(&map_path)
        .arg("--history")
        .arg(&history_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start screamfield");

    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(replies.as_bytes()).unwrap();
    drop(stdin);

    let stdout = child.stdout.take().unwrap();
    let lines: Vec<String> = std::io::BufReader::new(stdout)
        .lines()
        .map(|l| l.unwrap())
        .collect();
    let status = child.wait().expect("failed to wait on child");
    let history = fs::read_to_string(&history_path).unwrap_or_default();
    (status.code(), lines, history)
}

#[test]
fn controller_plays_full_match() {
    let (code, lines, history) = run_controller("3 1 1 2\nA.1\n", "1#R\n1#S\n");
    assert_eq!(code, Some(0));
    assert_eq!(lines[0], "1W#");
    assert_eq!(lines[1], "1#3 1 1 1 A");
    assert_eq!(&lines[2..5], &["1W#", "1#", "1#A.1"]);
    assert_eq!(&lines[5..8], &["1W#", "1#", "1#.A0"]);
    assert_eq!(lines.last().map(String::as_str), Some("1S#"));
    assert_eq!(history, "1\n0 R\nS\n0 S\nS\nE\n0\n");
}

#[test]
fn controller_handles_timeouts() {
    let (code, _, history) = run_controller("3 1 1 5 A.B", "2T\n1#L\n1T\n");
    assert_eq!(code, Some(0));
    assert_eq!(history, "2\nT1\n0 L\nS\nT0\nS\nE\n0\n0\n");
}

#[test]
fn controller_rejects_bad_map() {
    let (code, lines, _) = run_controller("3 1 1 5\nA?1\n", "");
    assert_eq!(code, Some(2));
    assert!(lines.is_empty());
}

#[test]
fn controller_aborts_on_garbage() {
    let (code, _, history) = run_controller("3 1 1 5\nA.1\n", "hello\n");
    assert_eq!(code, Some(1));
    assert!(history.ends_with("U\n"));
}

#[test]
fn greedy_agent_walks_toward_people() {
    let exe = env!("CARGO_BIN_EXE_greedy_agent");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start greedy_agent");

    let mut stdin = child.stdin.take().unwrap();
    writeln!(stdin, "3 2 1 2 B").unwrap();
    writeln!(stdin, "A..1.B").unwrap();
    writeln!(stdin).unwrap();
    writeln!(stdin, "AB....").unwrap();
    drop(stdin);

    let stdout = child.stdout.take().unwrap();
    let lines: Vec<String> = std::io::BufReader::new(stdout)
        .lines()
        .map(|l| l.unwrap())
        .collect();
    assert!(child.wait().unwrap().success());
    assert_eq!(lines, vec!["L", "S"]);
}
