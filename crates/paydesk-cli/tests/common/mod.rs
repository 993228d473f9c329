#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use url::Url;

/// `file://` URL for a snapshot directory.
pub fn file_source_url(path: &Path) -> String {
    Url::from_directory_path(path)
        .expect("Failed to convert path to file URL")
        .to_string()
}

/// Write a collection file into a snapshot directory.
pub fn write_collection(dir: &Path, segment: &str, value: &Value) {
    std::fs::create_dir_all(dir).unwrap();
    let json = serde_json::to_string_pretty(value).unwrap();
    std::fs::write(dir.join(format!("{segment}.json")), json).unwrap();
}

/// Run the CLI with an isolated HOME so no user config is picked up.
pub fn run_cli_with_env(args: &[&str], home: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_paydesk"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_CONFIG_HOME", home.join("config"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("PAYDESK_SOURCE");
    cmd.env_remove("PAYDESK_TOKEN");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI with an isolated HOME and expect success.
pub fn run_cli_with_env_success(args: &[&str], home: &Path) -> String {
    let output = run_cli_with_env(args, home);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}
