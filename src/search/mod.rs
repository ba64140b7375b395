//! Concurrent file name search over a tree snapshot
//!
//! - `ConcurrencyBudget`: lock-free bound on the number of running search tasks
//! - `ResultCollector`: matches appended by any task, read once all tasks are joined
//! - `ParallelSearcher`: spawns a thread per subdirectory while the budget allows,
//!   otherwise keeps scanning on the current thread

mod budget;
mod collector;
mod searcher;

pub use budget::{BudgetPermit, ConcurrencyBudget, TaskBudget};
pub use collector::{MatchSet, ResultCollector};
pub use searcher::{ParallelSearcher, SearchOutcome, SearchStats, search};
