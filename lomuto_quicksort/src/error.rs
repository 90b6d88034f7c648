use thiserror::Error;

/// Errors surfaced by the sort entry points.
///
/// Sorting valid input cannot fail. Every variant is either a caller mistake (range or
/// configuration) or a fatal fault in the worker pool.
#[derive(Debug, Error)]
pub enum SortError {
    #[error("range [{low}, {high}] is out of bounds for a sequence of length {len}")]
    InvalidRange { low: usize, high: usize, len: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("worker task panicked: {0}")]
    WorkerPanicked(String),
}
