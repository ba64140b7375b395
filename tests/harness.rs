//! Test harness for tfind integration tests

#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

pub use tfind::test_utils::TestDir;

pub struct RunOutput {
    pub stdout: String,
    pub stderr: String,
    pub code: Option<i32>,
}

impl RunOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Non-empty stdout lines, sorted.
    pub fn sorted_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .stdout
            .lines()
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        lines.sort();
        lines
    }
}

pub fn run_tfind(root: &Path, args: &[&str]) -> RunOutput {
    let binary = env!("CARGO_BIN_EXE_tfind");
    let output = Command::new(binary)
        .arg("--path")
        .arg(root)
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to run tfind");

    RunOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        code: output.status.code(),
    }
}

pub fn sorted_paths(paths: &[std::path::PathBuf]) -> Vec<String> {
    let mut out: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
    out.sort();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_creates_temp_dir() {
        let dir = TestDir::new();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_harness_add_file() {
        let dir = TestDir::new();
        let file_path = dir.add_file("nested/deeper/test.rs");
        assert!(file_path.exists());
        assert!(dir.join("nested/deeper").is_dir());
    }

    #[test]
    fn test_harness_balanced_tree() {
        let dir = TestDir::new();
        let dirs = dir.add_balanced_tree(2, 3, 1);
        assert_eq!(dirs, 3 + 9);
        assert!(dir.join("dir2/dir1/file0.txt").is_file());
    }
}
