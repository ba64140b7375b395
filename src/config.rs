//! Search configuration

use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::error::{Result, TfindError};

/// Smallest accepted number of concurrent search threads.
pub const MIN_CONCURRENCY: usize = 1;
/// Largest accepted number of concurrent search threads.
pub const MAX_CONCURRENCY: usize = 200;
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Root of the filesystem on this platform, the default search root.
#[cfg(windows)]
pub const FS_ROOT: &str = "C:\\";
#[cfg(not(windows))]
pub const FS_ROOT: &str = "/";

/// Everything a search needs: where to start, what name to look for, and
/// how many search threads may run at once.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub root: PathBuf,
    /// Exact, case-sensitive file name to match.
    pub filename: String,
    /// Upper bound on simultaneously active search tasks, the caller included.
    pub max_concurrency: usize,
}

impl SearchConfig {
    pub fn new(root: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            filename: filename.into(),
            ..Default::default()
        }
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    /// Check the concurrency bound against `[MIN_CONCURRENCY; MAX_CONCURRENCY]`.
    pub fn validate(&self) -> Result<NonZeroUsize> {
        validate_concurrency(self.max_concurrency)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(FS_ROOT),
            filename: String::new(),
            max_concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Accept `value` only inside `[MIN_CONCURRENCY; MAX_CONCURRENCY]`.
pub fn validate_concurrency(value: usize) -> Result<NonZeroUsize> {
    let invalid = || TfindError::InvalidConcurrency {
        value,
        min: MIN_CONCURRENCY,
        max: MAX_CONCURRENCY,
    };
    if value > MAX_CONCURRENCY {
        return Err(invalid());
    }
    NonZeroUsize::new(value)
        .filter(|n| n.get() >= MIN_CONCURRENCY)
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.root, PathBuf::from(FS_ROOT));
        assert_eq!(config.max_concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.validate().unwrap().get(), DEFAULT_CONCURRENCY);
    }

    #[test]
    fn test_builder() {
        let config = SearchConfig::new("/srv", "needle.txt").with_max_concurrency(3);
        assert_eq!(config.root, PathBuf::from("/srv"));
        assert_eq!(config.filename, "needle.txt");
        assert_eq!(config.validate().unwrap().get(), 3);
    }

    #[test]
    fn test_concurrency_bounds() {
        assert!(validate_concurrency(0).is_err());
        assert_eq!(validate_concurrency(1).unwrap().get(), 1);
        assert_eq!(validate_concurrency(200).unwrap().get(), 200);
        assert!(matches!(
            validate_concurrency(201),
            Err(TfindError::InvalidConcurrency { value: 201, .. })
        ));
    }
}
