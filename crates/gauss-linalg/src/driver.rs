//! The elimination driver.
//!
//! Walks the pivots in order, runs one [`step`](crate::step) per pivot with a
//! fresh partition of the rows below it, and finishes by scaling every row so
//! that its diagonal entry is one.

use num_traits::Float;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, warn};

use crate::config::EliminationConfig;
use crate::error::EliminationError;
use crate::matrix::Matrix;
use crate::partition::partition;
use crate::step::{self, StepOutcome};

/// Terminal state of an elimination run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every pivot was usable and the matrix is normalized.
    Solved,
    /// A pivot magnitude fell below the tolerance; the run stopped there.
    Singular {
        /// Index of the offending pivot.
        pivot: usize,
    },
}

impl Outcome {
    /// Returns true for [`Outcome::Solved`].
    #[must_use]
    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved)
    }
}

/// Runs Gaussian elimination with a fixed number of workers per step.
///
/// Owns the worker pool, so repeated runs reuse the same threads.
#[derive(Debug)]
pub struct Eliminator {
    config: EliminationConfig,
    pool: ThreadPool,
}

impl Eliminator {
    /// Creates an eliminator for `config`.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or the worker pool cannot be
    /// started.
    pub fn new(config: EliminationConfig) -> Result<Self, EliminationError> {
        config.validate()?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|i| format!("gauss-worker-{i}"))
            .build()?;
        Ok(Self { config, pool })
    }

    /// The configuration this eliminator was built with.
    #[must_use]
    pub fn config(&self) -> &EliminationConfig {
        &self.config
    }

    /// Reduces `matrix` in place to row-echelon form with a unit diagonal.
    ///
    /// Steps run strictly in pivot order; step `p + 1` starts only after every
    /// worker of step `p` has returned. On a singular pivot no further step is
    /// scheduled and the matrix is left as the completed steps wrote it.
    ///
    /// # Errors
    ///
    /// Returns [`EliminationError::TooManyRows`] when the matrix has more rows
    /// than columns, or the tolerance cannot be represented in `T`.
    pub fn eliminate<T>(&self, matrix: &mut Matrix<T>) -> Result<Outcome, EliminationError>
    where
        T: Float + Send + Sync,
    {
        let num_rows = matrix.num_rows();
        let num_cols = matrix.num_cols();
        if num_rows > num_cols {
            return Err(EliminationError::TooManyRows {
                rows: num_rows,
                cols: num_cols,
            });
        }
        let epsilon: T = num_traits::cast(self.config.epsilon)
            .ok_or(EliminationError::InvalidConfig("epsilon not representable"))?;

        for pivot in 0..matrix.pivot_count() {
            let plan = partition(pivot + 1, num_rows, self.config.workers)?;
            match step::run(&self.pool, matrix, pivot, &plan, epsilon)? {
                StepOutcome::Completed { rows } => debug!(pivot, rows, "step completed"),
                StepOutcome::Singular { pivot } => {
                    warn!(pivot, "singular pivot, aborting elimination");
                    return Ok(Outcome::Singular { pivot });
                }
            }
        }

        // The last pivot has no rows below it, so no worker ever checked it.
        if let Some(pivot) = (0..num_rows).find(|&i| matrix[(i, i)].abs() < epsilon) {
            warn!(pivot, "singular pivot before normalization");
            return Ok(Outcome::Singular { pivot });
        }

        self.pool.install(|| normalize(matrix));
        info!(rows = num_rows, cols = num_cols, workers = self.config.workers, "matrix reduced");
        Ok(Outcome::Solved)
    }
}

/// Eliminates `matrix` with `workers` workers per step and the default
/// tolerance.
///
/// # Errors
///
/// See [`Eliminator::new`] and [`Eliminator::eliminate`].
pub fn eliminate<T>(matrix: &mut Matrix<T>, workers: usize) -> Result<Outcome, EliminationError>
where
    T: Float + Send + Sync,
{
    Eliminator::new(EliminationConfig::default().with_workers(workers))?.eliminate(matrix)
}

/// Divides every row by its diagonal entry.
///
/// Each row's diagonal is read once before the row is scaled. Rows past the
/// last column have no diagonal and are left alone; [`Eliminator::eliminate`]
/// rejects such matrices before getting here.
pub fn normalize<T>(matrix: &mut Matrix<T>)
where
    T: Float + Send + Sync,
{
    matrix.par_rows_mut().enumerate().for_each(|(i, row)| {
        if let Some(&diagonal) = row.get(i) {
            for value in row.iter_mut() {
                *value = *value / diagonal;
            }
        }
    });
}
