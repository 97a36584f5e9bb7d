#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

use chrono::{Duration, Utc};
use spotdesk_core::{AccessToken, RefreshToken, Role, Session, SessionUser};
use tempfile::TempDir;

/// An isolated session file location.
pub struct Sandbox {
    _dir: TempDir,
    pub session_file: PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let session_file = dir.path().join("session.json");
        Self {
            _dir: dir,
            session_file,
        }
    }

    /// Write a session holding `access` for an account with `role`.
    pub fn with_session(self, access: &str, role: &str) -> Self {
        let session = Session {
            user: SessionUser {
                id: "u1".to_string(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                role: Role::new(role),
            },
            access_token: Some(AccessToken::new(access)),
            refresh_token: Some(RefreshToken::new("R1")),
            expires_at: Some(Utc::now() + Duration::minutes(10)),
            error: None,
        };
        std::fs::write(&self.session_file, serde_json::to_string(&session).unwrap()).unwrap();
        self
    }

    pub fn session(&self) -> Option<Session> {
        let json = std::fs::read_to_string(&self.session_file).ok()?;
        Some(serde_json::from_str(&json).unwrap())
    }
}

/// Run the CLI against `base_url` with the sandboxed session file.
pub fn run_cli(args: &[&str], sandbox: &Sandbox, base_url: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_spotdesk"));
    cmd.args(args);
    cmd.env("SPOTDESK_BASE_URL", base_url);
    cmd.env("SPOTDESK_SESSION_FILE", &sandbox.session_file);
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str], sandbox: &Sandbox, base_url: &str) -> String {
    let output = run_cli(args, sandbox, base_url);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure, returning stderr.
pub fn run_cli_failure(args: &[&str], sandbox: &Sandbox, base_url: &str) -> String {
    let output = run_cli(args, sandbox, base_url);
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}
