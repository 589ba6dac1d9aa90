//! Integration tests for the conquest binary.
//!
//! Spawns the self-play CLI with small search settings and checks its JSONL
//! output and exit status.

use std::fs;
use std::process::{Command, Output, Stdio};

fn run_cli(args: &[&str]) -> Output {
    let exe = env!("CARGO_BIN_EXE_conquest");
    Command::new(exe)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("failed to start conquest")
}

fn fast_args<'a>(extra: &[&'a str]) -> Vec<&'a str> {
    let mut args = vec!["--trials", "200", "--turns", "3", "--threads", "1", "--quiet"];
    args.extend_from_slice(extra);
    args
}

#[test]
fn writes_one_json_line_per_game() {
    let out = run_cli(&fast_args(&["--games", "2", "--seed", "5"]));
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    for (i, line) in lines.iter().enumerate() {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["game_id"], i);
        let turns = value["turns"].as_array().unwrap();
        assert!(!turns.is_empty() && turns.len() <= 3);
        assert!(turns[0]["actions"].is_array());
    }
}

#[test]
fn seeded_runs_are_reproducible() {
    let a = run_cli(&fast_args(&["--games", "1", "--seed", "9"]));
    let b = run_cli(&fast_args(&["--games", "1", "--seed", "9"]));
    assert!(a.status.success() && b.status.success());
    assert_eq!(a.stdout, b.stdout);
}

#[test]
fn output_file_and_config() {
    let dir = std::env::temp_dir().join(format!("conquest-cli-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let config = dir.join("search.json");
    let output = dir.join("games.jsonl");
    fs::write(
        &config,
        r#"{ "max_depth": 3, "attack_strategies": ["blitz"], "reinforcement": { "kind": "weakest_first" } }"#,
    )
    .unwrap();

    let out = run_cli(&fast_args(&[
        "--games",
        "1",
        "--seed",
        "3",
        "--config",
        config.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ]));
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(out.stdout.is_empty());

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written.lines().count(), 1);
    let value: serde_json::Value = serde_json::from_str(written.trim()).unwrap();
    for turn in value["turns"].as_array().unwrap() {
        let actions = turn["actions"].as_array().unwrap();
        assert!(actions.len() <= 2);
        for action in actions {
            if action["type"] == "attack" {
                assert_eq!(action["strategy"], "blitz");
            }
        }
    }
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn depth_flag_overrides_config() {
    let out = run_cli(&fast_args(&["--games", "1", "--seed", "4", "--depth", "2"]));
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    for turn in value["turns"].as_array().unwrap() {
        let actions = turn["actions"].as_array().unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0]["type"], "fortify");
    }
}

#[test]
fn rejects_invalid_depth() {
    let out = run_cli(&fast_args(&["--depth", "1"]));
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("max_depth"), "{stderr}");
}

#[test]
fn rejects_unknown_flag() {
    let out = run_cli(&["--bogus"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage: conquest"));
}

#[test]
fn missing_config_file_fails() {
    let out = run_cli(&fast_args(&["--config", "/nonexistent/conquest.json"]));
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("/nonexistent/conquest.json"));
}
