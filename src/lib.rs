//! Testbed comparing a sequential Lomuto quicksort against its fork-join parallel
//! variant.
//!
//! Every implementation is wrapped in a module under [`unstable`] exposing a `SortImpl`
//! that implements [`sort_test_tools::Sort`], so tests and benchmarks can treat them
//! uniformly. [`harness`] is the standalone correctness and speedup check.

macro_rules! sort_impl {
    ($name:expr) => {
        pub struct SortImpl;

        impl sort_test_tools::Sort for SortImpl {
            fn name() -> String {
                $name.into()
            }

            #[inline]
            fn sort(arr: &mut [i32]) {
                sort(arr);
            }
        }
    };
}

pub mod harness;
pub mod unstable;
