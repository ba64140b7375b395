//! tfind - find files by name with a bounded pool of parallel search threads
//!
//! A search runs in two phases. [`build_tree`] takes one breadth-first
//! snapshot of the hierarchy under a root; [`search`] then walks the snapshot,
//! handing subdirectories to new threads while the [`ConcurrencyBudget`]
//! has room and scanning them inline once it does not.
//!
//! Problems below the root never abort anything: they are reported as
//! [`Diagnostic`]s through an injected [`DiagnosticSink`].

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod output;
pub mod search;
pub mod tree;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use config::{DEFAULT_CONCURRENCY, MAX_CONCURRENCY, MIN_CONCURRENCY, SearchConfig};
pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink, MemorySink, NullSink, WriterSink};
pub use error::{Result, TfindError};
pub use output::{OutputConfig, OutputFormat, TreeFormatter, print_json, print_matches};
pub use search::{
    BudgetPermit, ConcurrencyBudget, MatchSet, ParallelSearcher, ResultCollector, SearchOutcome,
    SearchStats, TaskBudget, search,
};
pub use tree::{
    DirEntries, DirLister, FsLister, ListedEntry, NodeId, NodeKind, Tree, TreeBuilder, TreeNode,
    TreeStats, build_tree,
};

/// Validate `config`, snapshot its root and search the snapshot.
pub fn find(config: &SearchConfig, sink: &dyn DiagnosticSink) -> Result<SearchOutcome> {
    let max_concurrency = config.validate()?;
    let tree = build_tree(&config.root, sink)?;
    Ok(ParallelSearcher::new(sink).search(&tree, &config.filename, max_concurrency))
}
