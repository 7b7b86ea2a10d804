//! Common test utilities for treemirror CLI tests.
//!
//! This module provides:
//! - `TestEnv`: isolated source, destination and config directories
//! - Helpers to run the binary and to poll for asynchronous results

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempDir;

/// Watch timings small enough for tests, written as the user config.
pub const FAST_CONFIG: &str = r#"
[watch]
debounce_secs = 0.2
debounce_check_secs = 0.05
reconcile_secs = 0.6
reconcile_check_secs = 0.1
"#;

/// Result of running a treemirror command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Parsed NDJSON lines from stdout
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).unwrap_or_else(|e| panic!("bad JSON line {l:?}: {e}")))
            .collect()
    }
}

/// Isolated test environment.
///
/// `XDG_CONFIG_HOME` points into the temp dir so the user's own config is
/// never read.
pub struct TestEnv {
    pub root: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("Failed to create temp dir");
        fs::create_dir_all(root.path().join("source")).expect("Failed to create source dir");
        fs::create_dir_all(root.path().join("config")).expect("Failed to create config dir");
        Self { root }
    }

    pub fn source(&self) -> PathBuf {
        self.root.path().join("source")
    }

    pub fn dest(&self) -> PathBuf {
        self.root.path().join("dest")
    }

    pub fn source_path(&self, relative: &str) -> PathBuf {
        self.source().join(relative)
    }

    pub fn dest_path(&self, relative: &str) -> PathBuf {
        self.dest().join(relative)
    }

    /// Write the user-level config file
    pub fn write_config(&self, content: &str) {
        let path = self.root.path().join("config/treemirror/config.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    pub fn write_source(&self, relative: &str, content: &[u8]) -> PathBuf {
        let path = self.source_path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create directories");
        }
        fs::write(&path, content).expect("Failed to write source file");
        path
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_treemirror"));
        cmd.current_dir(self.root.path())
            .args(args)
            .env("XDG_CONFIG_HOME", self.root.path().join("config"))
            .env("NO_COLOR", "1")
            .env_remove("TREEMIRROR_CONFIG")
            .env_remove("TREEMIRROR_DEBOUNCE_SECS")
            .env_remove("TREEMIRROR_RECONCILE_SECS")
            .env_remove("TREEMIRROR_BATCH_SIZE")
            .env_remove("TREEMIRROR_EXTENSIONS")
            .env_remove("TREEMIRROR_COLOR");
        cmd
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        let output = self
            .command(args)
            .output()
            .expect("Failed to execute treemirror");
        TestResult::from_output(output)
    }

    /// Start `treemirror` in the background with stdout discarded.
    pub fn spawn(&self, args: &[&str]) -> WatchProcess {
        let child = self
            .command(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("Failed to spawn treemirror");
        WatchProcess { child }
    }
}

/// Background watcher killed on drop.
pub struct WatchProcess {
    child: Child,
}

impl WatchProcess {
    pub fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }
}

impl Drop for WatchProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Poll `condition` until it holds or `timeout` passes.
pub fn wait_for(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(50));
    }
    condition()
}

