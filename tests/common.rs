#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const USER: &str = "tester";

pub fn hl() -> Command {
    cargo_bin_cmd!("habitlog")
}

/// `habitlog --db <db> --user tester <args...>`
pub fn hl_as(db_path: &str, args: &[&str]) -> Command {
    let mut cmd = hl();
    cmd.args(["--db", db_path, "--user", USER]).args(args);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_habitlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write `content` to a temp file and return its path
pub fn temp_file(name: &str, ext: &str, content: &str) -> String {
    let p = temp_out(name, ext);
    fs::write(&p, content).expect("write temp file");
    p
}

pub fn init_db(db_path: &str) {
    hl().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize DB and log three days of March 2025 for `tester`
pub fn init_db_with_data(db_path: &str) {
    init_db(db_path);

    hl_as(db_path, &["add", "2025-03-01", "coffee=yes", "water=5", "mood=good"])
        .assert()
        .success();
    hl_as(db_path, &["add", "2025-03-02", "coffee=no", "water=3"])
        .assert()
        .success();
    hl_as(db_path, &["add", "2025-03-10", "pages=20", "walk=yes"])
        .assert()
        .success();
}

/// Parse the JSON document printed after any leading status lines
pub fn json_from_stdout(stdout: &[u8]) -> serde_json::Value {
    let text = String::from_utf8_lossy(stdout);
    // ANSI sequences contain '[': only a bracket at line start opens the document
    let start = text
        .lines()
        .scan(0usize, |offset, line| {
            let here = *offset;
            *offset += line.len() + 1;
            Some((here, line))
        })
        .find(|(_, line)| line.starts_with('[') || line.starts_with('{'))
        .map(|(i, _)| i)
        .expect("no JSON document in stdout");
    serde_json::from_str(&text[start..]).expect("valid JSON")
}
