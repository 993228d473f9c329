//! Embeds a version string for `paydesk --version`.
//!
//! Uses `git describe` when building from a checkout and the package
//! version otherwise.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let pkg = env!("CARGO_PKG_VERSION");
    let version = match describe() {
        Some(rev) if rev.starts_with(pkg) => rev,
        Some(rev) => format!("{pkg} ({rev})"),
        None => pkg.to_string(),
    };

    println!("cargo:rustc-env=PAYDESK_VERSION={version}");
}

fn describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let rev = String::from_utf8(output.stdout).ok()?;
    let rev = rev.trim();
    let rev = rev.strip_prefix('v').unwrap_or(rev);
    (!rev.is_empty()).then(|| rev.to_string())
}
