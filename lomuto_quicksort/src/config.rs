use crate::SortError;

/// Partitions spanning fewer than this many index steps are sorted without forking.
pub const DEFAULT_BLOCK_THRESHOLD: usize = 1000;

/// Worker pool size used when nothing else is configured.
pub const DEFAULT_WORKERS: usize = 4;

/// Configuration of a [`ParallelQuicksort`](crate::ParallelQuicksort).
///
/// Fixed once the sorter is built. Differently configured sorters can coexist, each
/// owns its own worker pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelConfig {
    /// A partitioned range `[low, high]` forks its two halves only if
    /// `high - low >= block_threshold`. So a partition of exactly `block_threshold`
    /// elements is still sorted sequentially.
    pub block_threshold: usize,

    /// Number of worker threads in the pool.
    pub workers: usize,

    /// Stack size of each worker thread in bytes, `None` keeps the rayon default.
    pub stack_size: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            block_threshold: DEFAULT_BLOCK_THRESHOLD,
            workers: DEFAULT_WORKERS,
            stack_size: None,
        }
    }
}

impl ParallelConfig {
    pub fn new(block_threshold: usize, workers: usize) -> Self {
        Self {
            block_threshold,
            workers,
            stack_size: None,
        }
    }

    pub fn with_block_threshold(mut self, block_threshold: usize) -> Self {
        self.block_threshold = block_threshold;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_stack_size(mut self, stack_size: usize) -> Self {
        self.stack_size = Some(stack_size);
        self
    }

    pub fn validate(&self) -> Result<(), SortError> {
        if self.workers == 0 {
            return Err(SortError::InvalidConfig(
                "worker pool needs at least one thread".into(),
            ));
        }

        if self.stack_size == Some(0) {
            return Err(SortError::InvalidConfig(
                "worker stack size must be non-zero".into(),
            ));
        }

        Ok(())
    }
}
