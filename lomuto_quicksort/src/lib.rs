//! Lomuto quicksort over `i32`, sequential and fork-join parallel.
//!
//! Both sorters partition around the last element of each range. For every partition
//! spanning at least [`ParallelConfig::block_threshold`] index steps, the parallel sorter
//! spawns the shorter half as a task of one `rayon::scope` on its worker pool and keeps
//! going with the longer half. Anything smaller is sorted inline. The two halves of a
//! partition are disjoint sub-slices, so workers never share mutable state. The call
//! returns once every spawned task has finished.
//!
//! ```
//! use lomuto_quicksort::{ParallelConfig, ParallelQuicksort};
//!
//! let mut v = vec![5, 3, 5, 3, 5];
//! lomuto_quicksort::sort(&mut v);
//! assert_eq!(v, [3, 3, 5, 5, 5]);
//!
//! let sorter = ParallelQuicksort::new(ParallelConfig::new(1000, 4)).unwrap();
//! let mut v = vec![2, 1];
//! sorter.sort(&mut v).unwrap();
//! assert_eq!(v, [1, 2]);
//! ```

mod config;
mod error;
mod parallel;
mod partition;
mod quicksort;
mod range;

pub use config::{ParallelConfig, DEFAULT_BLOCK_THRESHOLD, DEFAULT_WORKERS};
pub use error::SortError;
pub use parallel::{parallel_sort, ForkStats, ParallelQuicksort};
pub use partition::{partition, partition_range};
pub use quicksort::{sort, sort_range};
