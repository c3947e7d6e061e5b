//! # gauss-linalg
//!
//! Parallel dense Gaussian elimination.
//!
//! This crate provides:
//! - A dense row-major [`Matrix`] over any float type
//! - Balanced partitioning of row spans across workers
//! - Elimination steps that hand each worker a disjoint block of rows
//! - A driver that runs steps in pivot order and normalizes the diagonal
//!
//! ## Concurrency
//!
//! Each step partitions the rows below the pivot with [`partition`] and
//! spawns one worker per range on a rayon pool sized to the configured worker
//! count. Workers never share a row, so the matrix needs no locking. A step
//! ends only once all of its workers have returned; the next pivot is never
//! started before that.
//!
//! ## Singular systems
//!
//! A pivot whose magnitude is below the configured tolerance ends the run
//! with [`Outcome::Singular`]. Workers report the condition back through the
//! step; nothing panics and nothing exits the process.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod driver;
pub mod error;
pub mod matrix;
pub mod partition;
pub mod step;

pub use config::{EliminationConfig, DEFAULT_EPSILON};
pub use driver::{eliminate, normalize, Eliminator, Outcome};
pub use error::{EliminationError, MatrixError, PartitionError};
pub use matrix::Matrix;
pub use partition::{partition, verify_plan, RowRange};
pub use step::StepOutcome;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod tests;
