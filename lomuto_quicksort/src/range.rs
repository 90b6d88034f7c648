use core::ops::RangeInclusive;

use crate::SortError;

/// Resolves an inclusive `[low, high]` sort range against a sequence of length `len`.
///
/// Ranges holding at most one element are already sorted and yield `Ok(None)` without a
/// bounds check, the same way the recursion treats them. Any other range must end inside
/// the sequence.
pub(crate) fn sort_range(
    len: usize,
    low: usize,
    high: usize,
) -> Result<Option<RangeInclusive<usize>>, SortError> {
    if low >= high {
        return Ok(None);
    }

    strict_range(len, low, high).map(Some)
}

/// Like [`sort_range`], but a single element range is still checked and returned.
pub(crate) fn strict_range(
    len: usize,
    low: usize,
    high: usize,
) -> Result<RangeInclusive<usize>, SortError> {
    if low > high || high >= len {
        return Err(SortError::InvalidRange { low, high, len });
    }

    Ok(low..=high)
}
