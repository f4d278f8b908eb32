#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::path::PathBuf;
use tempfile::TempDir;

/// Isolated home directory plus database path for one test.
pub struct TestEnv {
    home: TempDir,
    pub db: String,
}

impl TestEnv {
    pub fn new(name: &str) -> Self {
        let home = tempfile::tempdir().expect("create temp home");
        let mut path: PathBuf = home.path().to_path_buf();
        path.push(format!("{name}_truckhisab.sqlite"));
        Self {
            db: path.to_string_lossy().to_string(),
            home,
        }
    }

    /// `truckhisab --db <db>` running with this env's home directory.
    pub fn th(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("truckhisab");
        cmd.env("HOME", self.home.path())
            .env_remove("RUST_LOG")
            .args(["--db", &self.db]);
        cmd
    }

    /// Write `~/.truckhisab/truckhisab.conf` inside this env's home directory.
    pub fn write_config(&self, yaml: &str) {
        let dir = self.home.path().join(".truckhisab");
        std::fs::create_dir_all(&dir).expect("create config dir");
        std::fs::write(dir.join("truckhisab.conf"), yaml).expect("write config");
    }

    /// Initialize the database and log in as `admin`.
    pub fn init_and_login(&self) {
        self.th().args(["--test", "init"]).assert().success();
        self.th()
            .args(["login", "-u", "admin", "-p", "secret"])
            .assert()
            .success();
    }
}
