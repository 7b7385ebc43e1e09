//! Shared test utilities for integration tests
//!
//! Provides the paper fixture and helpers for driving the `pmask` binary
//! inside a throwaway working directory.
#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::prelude::*;
use pathmask::Tree;
use serde_json::Value;

/// Raw text of `tests/fixtures/paper.json`.
pub const PAPER_JSON: &str = include_str!("fixtures/paper.json");

/// The paper fixture as an engine tree.
pub fn paper() -> Tree
{
    serde_json::from_str(PAPER_JSON).expect("paper fixture parses")
}

/// A nested record with arrays of objects holding arrays.
pub fn nested() -> Tree
{
    Tree::from(serde_json::json!({
        "paper": {
            "title": "Test Paper",
            "metadata": {
                "year": 2023,
                "venue": "Test Venue",
                "stats": {"citations": 10, "downloads": 100},
                "tags": ["tag1", "tag2", "tag3"]
            }
        },
        "authors": [
            {"name": "Author 1", "affiliation": "Org 1", "emails": ["a1@org1.com"]},
            {"name": "Author 2", "affiliation": "Org 2", "emails": ["a2@org2.com"]}
        ],
        "reviews": [
            {"reviewer": "Rev1", "score": 8, "comments": ["Good work", "Minor issues"]},
            {"reviewer": "Rev2", "score": 9, "comments": ["Excellent"]}
        ]
    }))
}

/// Temp working dir holding `paper.json`. Config discovery is relative to
/// the working dir, so each test gets an isolated one.
pub fn workspace() -> assert_fs::TempDir
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    tmp.child("paper.json")
        .write_str(PAPER_JSON)
        .expect("write paper.json");
    tmp
}

/// `pmask` rooted in `dir` with ambient env overrides cleared.
pub fn pmask(dir: &std::path::Path) -> Command
{
    let mut cmd = Command::cargo_bin("pmask").expect("pmask binary");
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("PMASK_FILTER_DIR")
        .env_remove("PMASK_LOG_LEVEL");
    cmd
}

/// Parse captured stdout as JSON.
pub fn stdout_json(output: &std::process::Output) -> Value
{
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}
