//! ParallelSearcher - name search over a snapshot with a bounded set of threads

use std::collections::VecDeque;
use std::ffi::OsStr;
use std::io;
use std::num::NonZeroUsize;
use std::panic;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, Scope, ScopedJoinHandle};

use serde::Serialize;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::tree::{NodeId, Tree};

use super::budget::{BudgetPermit, ConcurrencyBudget, TaskBudget};
use super::collector::{MatchSet, ResultCollector};

/// Counters describing how a search was carried out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Directories whose children were examined.
    pub directories_scanned: usize,
    /// Tasks started on their own thread.
    pub tasks_spawned: usize,
    /// Subdirectories kept on the current task's queue because the budget was spent.
    pub inline_continuations: usize,
    pub spawn_failures: usize,
    /// Most tasks active at once, the caller included. Zero when unknown.
    pub peak_active: usize,
}

/// Matches plus the statistics of the search that produced them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchOutcome {
    pub matches: MatchSet,
    pub stats: SearchStats,
}

/// Searches a [`Tree`] for entries with an exact file name.
///
/// Each task scans its own queue of directories. Before queueing a
/// subdirectory it asks the budget for a slot: with a slot the subdirectory
/// gets a new thread, without one it stays on the current queue. A task
/// joins every thread it started before it finishes, so by the time
/// `search` returns every task has ended.
pub struct ParallelSearcher<'a> {
    sink: &'a dyn DiagnosticSink,
}

impl<'a> ParallelSearcher<'a> {
    pub fn new(sink: &'a dyn DiagnosticSink) -> Self {
        Self { sink }
    }

    /// Search with at most `max_concurrency` tasks running at once.
    pub fn search(&self, tree: &Tree, filename: &str, max_concurrency: NonZeroUsize) -> SearchOutcome {
        let budget = ConcurrencyBudget::new(max_concurrency);
        let mut outcome = self.search_with_budget(tree, filename, &budget);
        outcome.stats.peak_active = budget.peak();
        debug_assert_eq!(budget.active(), 0, "every slot is returned after the search");
        outcome
    }

    /// Search drawing task slots from a caller-supplied budget.
    ///
    /// The calling thread counts as a task and takes the first slot.
    pub fn search_with_budget<B>(&self, tree: &Tree, filename: &str, budget: &B) -> SearchOutcome
    where
        B: TaskBudget + ?Sized,
    {
        let collector = ResultCollector::new();
        let counters = Counters::default();
        let task = SearchTask {
            tree,
            target: OsStr::new(filename),
            budget,
            collector: &collector,
            sink: self.sink,
            counters: &counters,
        };

        let caller_permit = BudgetPermit::try_new(budget);
        thread::scope(|scope| task.run(scope, tree.root()));
        drop(caller_permit);

        let stats = counters.snapshot();
        log::debug!(
            "searched {} directories with {} extra tasks ({} inline)",
            stats.directories_scanned,
            stats.tasks_spawned,
            stats.inline_continuations
        );
        SearchOutcome {
            matches: collector.into_matches(),
            stats,
        }
    }
}

/// Search `tree` for `filename` with at most `max_concurrency` tasks at once.
pub fn search(
    tree: &Tree,
    filename: &str,
    max_concurrency: NonZeroUsize,
    sink: &dyn DiagnosticSink,
) -> MatchSet {
    ParallelSearcher::new(sink)
        .search(tree, filename, max_concurrency)
        .matches
}

#[derive(Debug, Default)]
struct Counters {
    directories_scanned: AtomicUsize,
    tasks_spawned: AtomicUsize,
    inline_continuations: AtomicUsize,
    spawn_failures: AtomicUsize,
}

impl Counters {
    fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> SearchStats {
        SearchStats {
            directories_scanned: self.directories_scanned.load(Ordering::Relaxed),
            tasks_spawned: self.tasks_spawned.load(Ordering::Relaxed),
            inline_continuations: self.inline_continuations.load(Ordering::Relaxed),
            spawn_failures: self.spawn_failures.load(Ordering::Relaxed),
            peak_active: 0,
        }
    }
}

/// State shared read-only by every task of one search.
struct SearchTask<'a, B: TaskBudget + ?Sized> {
    tree: &'a Tree,
    target: &'a OsStr,
    budget: &'a B,
    collector: &'a ResultCollector,
    sink: &'a dyn DiagnosticSink,
    counters: &'a Counters,
}

impl<'a, B: TaskBudget + ?Sized> SearchTask<'a, B> {
    /// Scan the subtree under `seed`, then wait for every task started on the way.
    fn run<'scope, 'env>(&'env self, scope: &'scope Scope<'scope, 'env>, seed: NodeId) {
        let mut queue = VecDeque::from([seed]);
        let mut spawned: Vec<ScopedJoinHandle<'scope, ()>> = Vec::new();

        while let Some(dir) = queue.pop_front() {
            Counters::bump(&self.counters.directories_scanned);

            for (id, child) in self.tree.children(dir) {
                if child.name_equals(self.target) {
                    self.collector.append(child.path());
                }
                if !child.is_dir() || child.is_empty() {
                    continue;
                }

                let Some(permit) = BudgetPermit::try_new(self.budget) else {
                    Counters::bump(&self.counters.inline_continuations);
                    queue.push_back(id);
                    continue;
                };
                match self.spawn(scope, id, permit) {
                    Ok(handle) => {
                        Counters::bump(&self.counters.tasks_spawned);
                        spawned.push(handle);
                    }
                    Err(source) => {
                        // The permit went down with the closure; carry on here.
                        Counters::bump(&self.counters.spawn_failures);
                        self.sink.report(&Diagnostic::SpawnFailed {
                            path: child.path().to_path_buf(),
                            source,
                        });
                        queue.push_back(id);
                    }
                }
            }
        }

        for handle in spawned {
            if let Err(payload) = handle.join() {
                panic::resume_unwind(payload);
            }
        }
    }

    fn spawn<'scope, 'env>(
        &'env self,
        scope: &'scope Scope<'scope, 'env>,
        seed: NodeId,
        permit: BudgetPermit<'a, B>,
    ) -> io::Result<ScopedJoinHandle<'scope, ()>> {
        thread::Builder::new()
            .name(format!("tfind-search-{}", seed.index()))
            .spawn_scoped(scope, move || {
                let _permit = permit;
                self.run(scope, seed);
            })
    }
}
