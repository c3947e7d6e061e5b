//! One elimination step: clearing a pivot column below the diagonal.
//!
//! The rows under the pivot are carved into one mutable block per
//! [`RowRange`] before any worker starts, and the pivot row itself is only
//! ever borrowed shared. Each worker therefore owns its rows outright and no
//! locking is needed. The enclosing rayon scope is the barrier: `run` returns
//! only after every worker of the step has finished.

use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};

use num_traits::Float;
use rayon::ThreadPool;
use tracing::{debug, trace};

use crate::error::{EliminationError, MatrixError};
use crate::matrix::Matrix;
use crate::partition::{verify_plan, RowRange};

/// Result of a single elimination step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Every row below the pivot was reduced.
    Completed {
        /// Rows rewritten by the workers.
        rows: usize,
    },
    /// The pivot's magnitude is below the tolerance.
    Singular {
        /// Index of the offending pivot.
        pivot: usize,
    },
}

/// What a single worker did with its range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct WorkerReport {
    /// Rows this worker reduced.
    pub(crate) rows: usize,
    /// The worker observed a pivot below the tolerance.
    pub(crate) singular: bool,
    /// The worker stopped early because a sibling reported a singular pivot.
    pub(crate) cancelled: bool,
}

/// Eliminates column `pivot` from every row below it.
///
/// `plan` must partition `[pivot + 1, rows)`; one worker is spawned on `pool`
/// for each non-empty range. A singular pivot is reported through
/// [`StepOutcome::Singular`] once all workers have returned.
///
/// # Errors
///
/// Fails if `pivot` is not a diagonal index of `matrix` or if `plan` is not a
/// valid partition of the rows below it.
pub fn run<T>(
    pool: &ThreadPool,
    matrix: &mut Matrix<T>,
    pivot: usize,
    plan: &[RowRange],
    epsilon: T,
) -> Result<StepOutcome, EliminationError>
where
    T: Float + Send + Sync,
{
    let num_rows = matrix.num_rows();
    let num_cols = matrix.num_cols();
    if pivot >= matrix.pivot_count() {
        return Err(MatrixError::OutOfRange {
            row: pivot,
            col: pivot,
            rows: num_rows,
            cols: num_cols,
        }
        .into());
    }
    verify_plan(plan, pivot + 1, num_rows)?;

    let (pivot_row, below) = matrix.split_at_pivot(pivot)?;
    let blocks = carve(below, plan, num_cols);
    let cancelled = AtomicBool::new(false);
    let mut reports = vec![WorkerReport::default(); plan.len()];

    debug!(pivot, workers = plan.len(), rows = num_rows - pivot - 1, "elimination step");

    pool.scope(|scope| {
        for (block, report) in blocks.into_iter().zip(reports.iter_mut()) {
            if block.is_empty() {
                continue;
            }
            let cancelled = &cancelled;
            scope.spawn(move |_| {
                *report = eliminate_rows(pivot_row, block, pivot, epsilon, cancelled);
            });
        }
    });

    for (range, report) in plan.iter().zip(&reports) {
        trace!(pivot, start = range.start, end = range.end, ?report, "worker finished");
    }

    if reports.iter().any(|r| r.singular) {
        return Ok(StepOutcome::Singular { pivot });
    }
    Ok(StepOutcome::Completed {
        rows: reports.iter().map(|r| r.rows).sum(),
    })
}

/// Splits `rows` into consecutive blocks of `range.len()` rows each.
fn carve<'a, T>(mut rows: &'a mut [T], plan: &[RowRange], num_cols: usize) -> Vec<&'a mut [T]> {
    let mut blocks = Vec::with_capacity(plan.len());
    for range in plan {
        let (block, rest) = mem::take(&mut rows).split_at_mut(range.len() * num_cols);
        blocks.push(block);
        rows = rest;
    }
    blocks
}

/// Worker body: reduces each row of `block` against `pivot_row`.
///
/// The pivot is checked before every row so that a singular pivot is caught
/// before the worker writes anything.
fn eliminate_rows<T: Float>(
    pivot_row: &[T],
    block: &mut [T],
    pivot: usize,
    epsilon: T,
    cancelled: &AtomicBool,
) -> WorkerReport {
    let mut report = WorkerReport::default();
    let diagonal = pivot_row[pivot];

    for row in block.chunks_exact_mut(pivot_row.len()) {
        if cancelled.load(Ordering::Relaxed) {
            report.cancelled = true;
            break;
        }
        if diagonal.abs() < epsilon {
            cancelled.store(true, Ordering::Relaxed);
            report.singular = true;
            break;
        }

        let coeff = row[pivot] / diagonal;
        for (value, &p) in row.iter_mut().zip(pivot_row) {
            *value = *value - p * coeff;
        }
        report.rows += 1;
    }

    report
}
