// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use tempfile::{TempDir, tempdir};
use xtest::{Registry, RunConfiguration, RunSummary, Session};

/// Runs `registry` in a fresh session and returns the summary plus everything
/// the session printed.
pub fn run_registry(config: RunConfiguration, registry: &mut Registry) -> (RunSummary, String) {
    let mut buffer = Vec::new();
    let summary = {
        let mut session = Session::start(config, &mut buffer);
        session.run_registry(registry);
        session.end().expect("writing to a Vec never fails")
    };
    (summary, String::from_utf8(buffer).expect("report is valid UTF-8"))
}

/// Builds an argument list with the program name in front.
pub fn args(list: &[&str]) -> Vec<String> {
    std::iter::once("xtest")
        .chain(list.iter().copied())
        .map(str::to_string)
        .collect()
}

/// Creates a temporary directory holding an `xtest_config.ini` with `content`.
pub fn config_dir(content: &str) -> TempDir {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    fs::write(temp_dir.path().join("xtest_config.ini"), content)
        .expect("Failed to write xtest_config.ini");
    temp_dir
}

/// Two cases: one that always passes and one that always fails.
pub fn pass_and_fail() -> Registry {
    Registry::new()
        .test("always-pass", |t| {
            t.assert(true, "always true");
        })
        .test("always-fail", |t| {
            t.assert(false, "always false");
        })
}
