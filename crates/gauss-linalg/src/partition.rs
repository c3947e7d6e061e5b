//! Splitting a span of rows into balanced, contiguous worker ranges.

use std::ops::Range;

use crate::error::PartitionError;

/// A half-open span of rows `[start, end)` assigned to one worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RowRange {
    /// First row of the range.
    pub start: usize,
    /// One past the last row of the range.
    pub end: usize,
}

impl RowRange {
    /// Creates a new range.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of rows in the range; zero if `end` precedes `start`.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the range holds no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// The range as a standard library range.
    #[must_use]
    pub const fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Partitions `[begin, end)` into exactly `workers` contiguous ranges.
///
/// Every range holds `size / workers` rows, and the first `size % workers`
/// ranges hold one extra. When there are more workers than rows the trailing
/// ranges are empty.
///
/// # Errors
///
/// Returns [`PartitionError::ZeroWorkers`] if `workers == 0` and
/// [`PartitionError::InvertedSpan`] if `begin > end`.
pub fn partition(begin: usize, end: usize, workers: usize) -> Result<Vec<RowRange>, PartitionError> {
    if workers == 0 {
        return Err(PartitionError::ZeroWorkers);
    }
    if begin > end {
        return Err(PartitionError::InvertedSpan { begin, end });
    }

    let size = end - begin;
    let base = size / workers;
    let remainder = size % workers;

    let mut plan = Vec::with_capacity(workers);
    let mut start = begin;
    for i in 0..workers {
        let len = if i < remainder { base + 1 } else { base };
        plan.push(RowRange::new(start, start + len));
        start += len;
    }

    debug_assert_eq!(start, end);
    Ok(plan)
}

/// Checks that `plan` is a valid partition of `[begin, end)`.
///
/// The ranges must be consecutive, start at `begin`, end at `end` and differ
/// in length by at most one, with the longer ranges first. Any plan produced
/// by [`partition`] passes; workers rely on this to own disjoint rows.
///
/// # Errors
///
/// Returns the first violated property.
pub fn verify_plan(plan: &[RowRange], begin: usize, end: usize) -> Result<(), PartitionError> {
    if plan.is_empty() {
        return Err(PartitionError::ZeroWorkers);
    }
    if begin > end {
        return Err(PartitionError::InvertedSpan { begin, end });
    }

    let workers = plan.len();
    let base = (end - begin) / workers;
    let remainder = (end - begin) % workers;

    let mut expected = begin;
    for (index, range) in plan.iter().enumerate() {
        if range.end < range.start {
            return Err(PartitionError::InvertedRange {
                index,
                start: range.start,
                end: range.end,
            });
        }
        if range.start != expected {
            return Err(PartitionError::Gap {
                index,
                start: range.start,
                expected,
            });
        }
        let want = if index < remainder { base + 1 } else { base };
        if range.len() != want {
            return Err(PartitionError::Unbalanced {
                index,
                len: range.len(),
                base,
            });
        }
        expected = range.end;
    }

    // Coverage follows from consecutive ranges of the expected lengths.
    debug_assert_eq!(expected, end);
    Ok(())
}
