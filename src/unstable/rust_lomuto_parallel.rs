use lomuto_quicksort::{ParallelConfig, ParallelQuicksort};
use once_cell::sync::Lazy;

sort_impl!("rust_lomuto_parallel_unstable");

static SORTER: Lazy<ParallelQuicksort> = Lazy::new(|| {
    ParallelQuicksort::new(ParallelConfig::default())
        .unwrap_or_else(|err| panic!("rust_lomuto_parallel: {err}"))
});

/// # Panics
///
/// If the shared worker pool can't be built, or a worker panics.
#[inline]
pub fn sort(data: &mut [i32]) {
    if let Err(err) = SORTER.sort(data) {
        panic!("rust_lomuto_parallel: {err}");
    }
}
