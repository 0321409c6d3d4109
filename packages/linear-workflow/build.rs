//! Build script for linear-workflow that generates version information.
//!
//! Uses `git describe --always --tags --dirty` when the crate is built from a
//! git checkout, and falls back to the package version otherwise (for example
//! when building from a source tarball).

use std::env;
use std::process::Command;

fn main() {
    let version = git_describe().unwrap_or_else(|| {
        env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| String::from("unknown"))
    });
    println!("cargo:rustc-env=LINEAR_WORKFLOW_VERSION={version}");
    println!("cargo:rerun-if-changed=build.rs");
}

fn git_describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--tags", "--dirty=-dirty"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim_end().to_string())
        .filter(|s| !s.is_empty())
}
