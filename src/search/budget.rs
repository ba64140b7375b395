//! Bound on the number of simultaneously active search tasks

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counter of running search tasks with a fixed ceiling.
///
/// `try_acquire` must test and increment in one step; `release` must be
/// called exactly once for every successful `try_acquire`.
pub trait TaskBudget: Sync {
    /// Take a slot if one is free. Never blocks.
    fn try_acquire(&self) -> bool;

    /// Give back a slot taken by `try_acquire`.
    fn release(&self);

    /// The configured ceiling.
    fn max(&self) -> usize;
}

/// A slot held on a budget, released when dropped.
///
/// Moving the permit into a task ties the slot to the task's lifetime,
/// including when it unwinds.
#[must_use = "dropping a permit releases its slot immediately"]
pub struct BudgetPermit<'a, B: TaskBudget + ?Sized> {
    budget: &'a B,
}

impl<'a, B: TaskBudget + ?Sized> BudgetPermit<'a, B> {
    /// Take a slot on `budget` and wrap it, or `None` when the budget is spent.
    pub fn try_new(budget: &'a B) -> Option<Self> {
        budget.try_acquire().then(|| Self { budget })
    }
}

impl<B: TaskBudget + ?Sized> Drop for BudgetPermit<'_, B> {
    fn drop(&mut self) {
        self.budget.release();
    }
}

/// Lock-free [`TaskBudget`] backed by a compare-and-swap counter.
///
/// Also records the highest number of slots ever held at once.
#[derive(Debug)]
pub struct ConcurrencyBudget {
    active: AtomicUsize,
    peak: AtomicUsize,
    max: usize,
}

impl ConcurrencyBudget {
    pub fn new(max: NonZeroUsize) -> Self {
        Self {
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            max: max.get(),
        }
    }

    /// Slots currently held.
    pub fn active(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    /// Most slots ever held at the same time.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::Acquire)
    }
}

impl TaskBudget for ConcurrencyBudget {
    fn try_acquire(&self) -> bool {
        let acquired = self
            .active
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |active| {
                (active < self.max).then_some(active + 1)
            });
        match acquired {
            Ok(previous) => {
                let now = previous + 1;
                assert!(
                    now <= self.max,
                    "budget invariant violated: {now} active tasks, max {}",
                    self.max
                );
                self.peak.fetch_max(now, Ordering::AcqRel);
                true
            }
            Err(_) => false,
        }
    }

    fn release(&self) {
        let previous = self.active.fetch_sub(1, Ordering::AcqRel);
        assert!(previous > 0, "budget invariant violated: release without acquire");
    }

    fn max(&self) -> usize {
        self.max
    }
}
