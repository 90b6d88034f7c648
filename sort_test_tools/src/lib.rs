pub trait Sort {
    fn name() -> String;

    fn sort(arr: &mut [i32]);
}

pub mod patterns;

// Used by `instantiate_sort_tests!`, so that callers don't need their own dependency.
#[doc(hidden)]
pub use paste;
