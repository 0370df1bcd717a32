use assert_cmd::Command;
use std::fs;
use std::path::Path;

pub fn htlm_cmd() -> Command {
    let mut cmd = Command::cargo_bin("htlm").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Write a source file, creating parent directories
pub fn write_source(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}
