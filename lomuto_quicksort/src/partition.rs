use crate::{range, SortError};

/// Re-arranges `v` around its last element using the Lomuto scheme.
///
/// When the call returns, every element left of the returned position is less than the
/// pivot, the pivot itself sits at the returned position and every element right of it
/// is greater or equal. Elements equal to the pivot may end up on either side of the
/// scan boundary, but always right of the pivot.
///
/// Performs exactly `v.len() - 1` comparisons and at most `v.len()` swaps. An empty
/// slice returns `0` and is left untouched.
pub fn partition(v: &mut [i32]) -> usize {
    let Some(last) = v.len().checked_sub(1) else {
        return 0;
    };

    let pivot = v[last];
    let mut num_lt = 0;

    for j in 0..last {
        if v[j] < pivot {
            v.swap(num_lt, j);
            num_lt += 1;
        }
    }

    // Place the pivot between the two partitions.
    v.swap(num_lt, last);

    num_lt
}

/// Partitions the inclusive range `[low, high]` of `v` and returns the absolute pivot
/// position.
pub fn partition_range(v: &mut [i32], low: usize, high: usize) -> Result<usize, SortError> {
    let range = range::strict_range(v.len(), low, high)?;

    Ok(low + partition(&mut v[range]))
}
