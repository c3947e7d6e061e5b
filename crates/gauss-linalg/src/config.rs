//! Configuration for parallel Gaussian elimination.

use std::num::NonZeroUsize;
use std::thread;

use crate::error::EliminationError;

/// Pivot magnitude below which a system is treated as singular.
pub const DEFAULT_EPSILON: f64 = 1e-4;

/// Configuration for an elimination run.
#[derive(Clone, Debug, PartialEq)]
pub struct EliminationConfig {
    /// Number of workers spawned per elimination step.
    pub workers: usize,
    /// Singularity tolerance for pivot magnitudes.
    pub epsilon: f64,
}

impl Default for EliminationConfig {
    fn default() -> Self {
        Self {
            workers: thread::available_parallelism().map_or(1, NonZeroUsize::get),
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl EliminationConfig {
    /// Returns the configuration with a different worker count.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Returns the configuration with a different tolerance.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Checks that the configuration can drive an elimination.
    ///
    /// # Errors
    ///
    /// Returns [`EliminationError::InvalidConfig`] for a zero worker count or
    /// a tolerance that is not a positive finite number.
    pub fn validate(&self) -> Result<(), EliminationError> {
        if self.workers == 0 {
            return Err(EliminationError::InvalidConfig(
                "worker count must be at least 1",
            ));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(EliminationError::InvalidConfig(
                "epsilon must be positive and finite",
            ));
        }
        Ok(())
    }
}
