//! Test support utilities for `ica-detect` binary tests.
//!
//! Commands built here run with an empty configuration home so a real
//! per-user config file never leaks into a test.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Returns the workspace root directory (parent of the cli crate).
pub fn workspace_root() -> PathBuf {
    PathBuf::from(std::env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("manifest dir should have parent")
        .to_owned()
}

/// Path of a saved vendor page under `tests/fixtures/`.
pub fn fixture_path(name: &str) -> PathBuf {
    workspace_root().join("tests").join("fixtures").join(name)
}

/// An `ica-detect` command isolated from the user's environment.
pub fn detector_command(config_home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ica-detect"));
    cmd.current_dir(workspace_root())
        .env("HOME", config_home)
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("RUST_LOG");
    cmd
}
