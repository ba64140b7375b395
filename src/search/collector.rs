//! Thread-safe accumulation of matched paths

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::Serialize;

/// Append-only sink for matches, shared by every search task.
#[derive(Debug, Default)]
pub struct ResultCollector {
    paths: Mutex<Vec<PathBuf>>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, path: &Path) {
        self.paths.lock().push(path.to_path_buf());
    }

    pub fn len(&self) -> usize {
        self.paths.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.lock().is_empty()
    }

    /// Consume the collector once every task has been joined.
    pub fn into_matches(self) -> MatchSet {
        MatchSet {
            paths: self.paths.into_inner(),
        }
    }
}

/// Paths whose file name matched, in no particular order.
///
/// Every path occurs at most once because every entry is visited once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MatchSet {
    paths: Vec<PathBuf>,
}

impl MatchSet {
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.paths.iter()
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Sort the paths in place, for stable output.
    pub fn sort(&mut self) {
        self.paths.sort();
    }

    pub fn into_vec(self) -> Vec<PathBuf> {
        self.paths
    }
}

impl IntoIterator for MatchSet {
    type Item = PathBuf;
    type IntoIter = std::vec::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}
