//! Test utilities for building temporary directory hierarchies.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory tree for testing.
///
/// The directory is removed when dropped.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `rel` inside the directory.
    pub fn join(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, rel: &str) -> PathBuf {
        let full_path = self.join(rel);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, rel).expect("Failed to write file");
        full_path
    }

    /// Add a directory and any missing parents.
    pub fn add_dir(&self, rel: &str) -> PathBuf {
        let full_path = self.join(rel);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Add a symbolic link at `rel` pointing to `target` (relative to the root).
    #[cfg(unix)]
    pub fn add_symlink(&self, target: &str, rel: &str) -> PathBuf {
        let full_path = self.join(rel);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::os::unix::fs::symlink(self.join(target), &full_path)
            .expect("Failed to create symlink");
        full_path
    }

    /// Build a balanced tree: `depth` levels of `fanout` directories, each
    /// holding `files_per_dir` files named `file{i}.txt`.
    pub fn add_balanced_tree(&self, depth: usize, fanout: usize, files_per_dir: usize) -> usize {
        let mut level = vec![self.path().to_path_buf()];
        let mut dirs = 0;
        for _ in 0..depth {
            let mut next = Vec::with_capacity(level.len() * fanout);
            for parent in &level {
                for i in 0..fanout {
                    let dir = parent.join(format!("dir{i}"));
                    fs::create_dir_all(&dir).expect("Failed to create dir");
                    for f in 0..files_per_dir {
                        fs::write(dir.join(format!("file{f}.txt")), "").expect("Failed to write file");
                    }
                    dirs += 1;
                    next.push(dir);
                }
            }
            level = next;
        }
        dirs
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}
