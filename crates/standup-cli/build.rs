//! Embeds the commit and build date shown by `standup --version`.

use std::process::Command;

fn main() {
    let commit = short_commit().unwrap_or_else(|| "unknown".to_string());
    let date = chrono::Utc::now().format("%Y-%m-%d");

    println!("cargo:rustc-env=STANDUP_GIT_HASH={}", commit);
    println!("cargo:rustc-env=STANDUP_BUILD_DATE={}", date);

    // Rebuild when the checked-out commit moves.
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/refs/heads/");
}

/// `git rev-parse --short HEAD`, or `None` for tarball builds.
fn short_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let commit = String::from_utf8(output.stdout).ok()?;
    let commit = commit.trim();
    (!commit.is_empty()).then(|| commit.to_string())
}
