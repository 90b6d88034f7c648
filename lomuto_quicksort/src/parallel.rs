use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::{Scope, ThreadPool, ThreadPoolBuilder};

use crate::partition::partition;
use crate::quicksort::quicksort;
use crate::{range, ParallelConfig, SortError};

/// Outcome of a parallel sort call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForkStats {
    /// Number of partitions at or above the block threshold, whose halves were sorted
    /// as independent tasks.
    pub forks: usize,
}

/// Fork-join quicksort running on its own fixed-size worker pool.
///
/// The pool is built once and reused by every call. Each call blocks until every task
/// it spawned has finished.
pub struct ParallelQuicksort {
    pool: ThreadPool,
    config: ParallelConfig,
}

impl ParallelQuicksort {
    pub fn new(config: ParallelConfig) -> Result<Self, SortError> {
        config.validate()?;

        let mut builder = ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|index| format!("quicksort-worker-{index}"));
        if let Some(stack_size) = config.stack_size {
            builder = builder.stack_size(stack_size);
        }
        let pool = builder.build()?;

        tracing::debug!(
            workers = config.workers,
            block_threshold = config.block_threshold,
            stack_size = ?config.stack_size,
            "built quicksort worker pool"
        );

        Ok(Self { pool, config })
    }

    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }

    /// Sorts `v` in non-decreasing order. The result is identical to [`crate::sort`].
    ///
    /// A panic in any worker aborts the sort and is returned as
    /// [`SortError::WorkerPanicked`]. `v` then holds a permutation of its input.
    #[tracing::instrument(skip_all, fields(len = v.len()))]
    pub fn sort(&self, v: &mut [i32]) -> Result<ForkStats, SortError> {
        self.sort_with_leaf(v, quicksort)
    }

    fn sort_with_leaf(&self, v: &mut [i32], leaf: LeafSort) -> Result<ForkStats, SortError> {
        let block_threshold = self.config.block_threshold;
        let forks = self.install(|| par_quicksort(v, block_threshold, leaf))?;

        tracing::trace!(forks, "parallel sort finished");

        Ok(ForkStats { forks })
    }

    /// Sorts the inclusive range `[low, high]` of `v`, see [`crate::sort_range`].
    pub fn sort_range(
        &self,
        v: &mut [i32],
        low: usize,
        high: usize,
    ) -> Result<ForkStats, SortError> {
        match range::sort_range(v.len(), low, high)? {
            Some(range) => self.sort(&mut v[range]),
            None => Ok(ForkStats::default()),
        }
    }

    /// Runs `op` on the pool. A panic in any task spawned below `op` is re-raised when
    /// its scope completes and ends up here.
    fn install<R, OP>(&self, op: OP) -> Result<R, SortError>
    where
        R: Send,
        OP: FnOnce() -> R + Send,
    {
        self.pool
            .install(|| panic::catch_unwind(AssertUnwindSafe(op)))
            .map_err(|payload| SortError::WorkerPanicked(panic_message(payload.as_ref())))
    }
}

/// One-shot parallel sort of `[low, high]` on a pool built for this call only.
///
/// Prefer [`ParallelQuicksort`] when sorting more than once, building the pool is not
/// free.
pub fn parallel_sort(
    v: &mut [i32],
    low: usize,
    high: usize,
    block_threshold: usize,
    workers: usize,
) -> Result<ForkStats, SortError> {
    ParallelQuicksort::new(ParallelConfig::new(block_threshold, workers))?.sort_range(v, low, high)
}

/// Sorts `v` inside a single `rayon::scope` and returns the number of forks.
///
/// A fork hands the shorter half of a partition to the pool and keeps looping over the
/// longer half in the current frame. No task waits on another task, so the stack of
/// every worker stays bounded by the sequential sorter's logarithmic depth, even when
/// each partition only peels off its pivot.
fn par_quicksort(v: &mut [i32], block_threshold: usize, leaf: LeafSort) -> usize {
    let forks = AtomicUsize::new(0);
    rayon::scope(|scope| sort_in_scope(scope, v, block_threshold, leaf, &forks));

    forks.into_inner()
}

/// Sorts ranges that don't fork.
type LeafSort = fn(&mut [i32]);

fn sort_in_scope<'scope>(
    scope: &Scope<'scope>,
    mut v: &'scope mut [i32],
    block_threshold: usize,
    leaf: LeafSort,
    forks: &'scope AtomicUsize,
) {
    while v.len() > 1 {
        // `len - 1` is `high - low` of the range about to be partitioned.
        if v.len() - 1 < block_threshold {
            leaf(v);
            return;
        }

        let mid = partition(v);

        let (left, right) = v.split_at_mut(mid);
        let right = &mut right[1..];
        let (shorter, longer) = if left.len() < right.len() {
            (left, right)
        } else {
            (right, left)
        };

        forks.fetch_add(1, Ordering::Relaxed);

        // Zero or one element is already sorted, no task needed.
        if shorter.len() > 1 {
            scope.spawn(move |scope| {
                sort_in_scope(scope, shorter, block_threshold, leaf, forks);
            });
        }

        v = longer;
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use sort_test_tools::patterns;

    fn sorter(block_threshold: usize, workers: usize) -> ParallelQuicksort {
        ParallelQuicksort::new(ParallelConfig::new(block_threshold, workers)).unwrap()
    }

    #[test]
    fn partition_of_threshold_size_does_not_fork() {
        let sorter = sorter(16, 2);

        // Sorted input keeps every partition at `len - 1` elements, so only the top
        // level can fork.
        let mut v = patterns::ascending(16);
        assert_eq!(sorter.sort(&mut v).unwrap().forks, 0);
        assert_eq!(v, patterns::ascending(16));

        let mut v = patterns::ascending(17);
        assert_eq!(sorter.sort(&mut v).unwrap().forks, 1);
        assert_eq!(v, patterns::ascending(17));
    }

    #[test]
    fn fork_count_on_sorted_input() {
        // Sizes 40 down to 17 fork, 16 and below don't.
        let sorter = sorter(16, 3);
        let mut v = patterns::descending(40);
        sorter.sort(&mut v).unwrap();
        assert_eq!(v, patterns::ascending(40));

        let mut v = patterns::ascending(40);
        assert_eq!(sorter.sort(&mut v).unwrap().forks, 24);
    }

    #[test]
    fn zero_threshold_forks_every_partition() {
        let sorter = sorter(0, 2);
        let mut v = [2, 1];
        assert_eq!(sorter.sort(&mut v).unwrap().forks, 1);
        assert_eq!(v, [1, 2]);
    }

    #[test]
    fn small_inputs() {
        let sorter = sorter(4, 2);

        let mut empty: [i32; 0] = [];
        assert_eq!(sorter.sort(&mut empty).unwrap(), ForkStats::default());

        let mut single = [3];
        sorter.sort(&mut single).unwrap();
        assert_eq!(single, [3]);

        let mut dups = [5, 3, 5, 3, 5];
        sorter.sort(&mut dups).unwrap();
        assert_eq!(dups, [3, 3, 5, 5, 5]);
    }

    #[test]
    fn matches_sequential_for_any_pool_size() {
        let input = patterns::random(50_000);
        let mut expected = input.clone();
        crate::sort(&mut expected);

        for workers in [1, 2, 4, 8] {
            let mut v = input.clone();
            let stats = sorter(256, workers).sort(&mut v).unwrap();
            assert!(stats.forks > 0);
            assert!(v == expected, "mismatch with {workers} workers");
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let sorter = sorter(1000, 4);
        let input = patterns::random_uniform(200_000, 0..=2_000_000_000);

        let mut reference = input.clone();
        sorter.sort(&mut reference).unwrap();
        assert!(reference.windows(2).all(|w| w[0] <= w[1]));

        for _ in 0..3 {
            let mut v = input.clone();
            sorter.sort(&mut v).unwrap();
            assert!(v == reference);
        }
    }

    #[test]
    fn range_sorts_only_inside() {
        let sorter = sorter(2, 2);
        let mut v = [9, 8, 7, 6, 5, 4, 3, 2, 1, 0];
        sorter.sort_range(&mut v, 2, 7).unwrap();
        assert_eq!(v, [9, 8, 2, 3, 4, 5, 6, 7, 1, 0]);

        assert!(matches!(
            sorter.sort_range(&mut v, 5, 10),
            Err(SortError::InvalidRange { .. })
        ));
        assert_eq!(sorter.sort_range(&mut v, 5, 5).unwrap().forks, 0);
    }

    #[test]
    fn one_shot_entry_point() {
        let mut v = patterns::descending(1_500);
        let stats = parallel_sort(&mut v, 0, 1_499, 1000, 4).unwrap();
        assert_eq!(v, patterns::ascending(1_500));
        assert!(stats.forks > 0);

        assert!(matches!(
            parallel_sort(&mut v, 0, 1_499, 1000, 0),
            Err(SortError::InvalidConfig(_))
        ));
    }

    #[test]
    fn worker_panic_surfaces_as_error() {
        let sorter = sorter(16, 2);

        let err = sorter.install(|| panic!("boom")).unwrap_err();
        assert!(matches!(err, SortError::WorkerPanicked(ref msg) if msg == "boom"));

        let err = sorter
            .install(|| rayon::join(|| 1, || -> i32 { panic!("nested {}", 42) }))
            .unwrap_err();
        assert!(matches!(err, SortError::WorkerPanicked(ref msg) if msg == "nested 42"));

        // The pool stays usable afterwards.
        let mut v = [3, 1, 2];
        sorter.sort(&mut v).unwrap();
        assert_eq!(v, [1, 2, 3]);
    }

    #[test]
    fn panic_in_spawned_task_fails_the_sort() {
        fn failing_leaf(v: &mut [i32]) {
            if v.len() > 1 {
                panic!("leaf sort failed");
            }
        }

        let sorter = sorter(64, 4);
        let input = patterns::random(10_000);

        let mut v = input.clone();
        let err = sorter.sort_with_leaf(&mut v, failing_leaf).unwrap_err();
        assert!(matches!(err, SortError::WorkerPanicked(ref msg) if msg == "leaf sort failed"));

        let mut expected = input.clone();
        expected.sort_unstable();
        v.sort_unstable();
        assert_eq!(v, expected);

        let mut v = input;
        sorter.sort(&mut v).unwrap();
        assert_eq!(v, expected);
    }

    #[test]
    fn degenerate_input_with_default_config() {
        // Every partition peels off only its pivot here.
        let sorter = ParallelQuicksort::new(ParallelConfig::default()).unwrap();

        let mut v = patterns::ascending(100_000);
        let stats = sorter.sort(&mut v).unwrap();
        assert_eq!(v, patterns::ascending(100_000));
        assert_eq!(stats.forks, 100_000 - 1_000);

        let mut v = patterns::descending(100_000);
        sorter.sort(&mut v).unwrap();
        assert_eq!(v, patterns::ascending(100_000));

        let mut v = vec![7; 100_000];
        sorter.sort(&mut v).unwrap();
        assert_eq!(v, vec![7; 100_000]);
    }

    #[test]
    fn dense_duplicates_with_default_config() {
        let sorter = ParallelQuicksort::new(ParallelConfig::default()).unwrap();
        let input = patterns::random_uniform(100_000, 0..=20);

        let mut expected = input.clone();
        expected.sort_unstable();

        let mut v = input;
        sorter.sort(&mut v).unwrap();
        assert!(v == expected);
    }

    #[test]
    fn builds_with_custom_stack() {
        let config = ParallelConfig::new(8, 2).with_stack_size(16 << 20);
        let sorter = ParallelQuicksort::new(config).unwrap();
        assert_eq!(sorter.config(), &config);

        let mut v = patterns::ascending(2_000);
        sorter.sort(&mut v).unwrap();
        assert_eq!(v, patterns::ascending(2_000));
    }
}
