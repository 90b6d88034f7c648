use crate::partition::partition;
use crate::{range, SortError};

/// Sorts `v` in non-decreasing order, single-threaded.
pub fn sort(v: &mut [i32]) {
    quicksort(v);
}

/// Sorts the inclusive range `[low, high]` of `v`, leaving the rest untouched.
///
/// `low >= high` is a no-op. Otherwise `high` must be a valid index of `v`.
pub fn sort_range(v: &mut [i32], low: usize, high: usize) -> Result<(), SortError> {
    if let Some(range) = range::sort_range(v.len(), low, high)? {
        quicksort(&mut v[range]);
    }

    Ok(())
}

/// Sorts `v` recursively.
///
/// Both sides of a partition are independent, so only the shorter one is recursed into
/// and the longer one is handled by the loop. The final order is the same either way,
/// but the stack depth stays logarithmic even on already sorted input.
pub(crate) fn quicksort(mut v: &mut [i32]) {
    while v.len() > 1 {
        let mid = partition(v);

        // Split the slice into `left`, `pivot`, and `right`.
        let (left, right) = v.split_at_mut(mid);
        let right = &mut right[1..];

        if left.len() < right.len() {
            quicksort(left);
            v = right;
        } else {
            quicksort(right);
            v = left;
        }
    }
}
