//! # Gauss
//!
//! Solves augmented linear systems by parallel Gaussian elimination.
//!
//! The engine lives in [`gauss_linalg`]; this crate adds reading matrices
//! from text and formatting them back, and backs the `gauss` binary.
//!
//! ## Quick Start
//!
//! ```rust
//! use gauss::prelude::*;
//!
//! let mut m = gauss::io::parse_matrix("2 3  2 4 6  1 3 5").unwrap();
//! let outcome = eliminate(&mut m, 2).unwrap();
//! assert_eq!(outcome, Outcome::Solved);
//! print!("{}", gauss::io::format_matrix(&m, DEFAULT_EPSILON));
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use gauss_linalg as linalg;

pub mod io;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use gauss_linalg::{
        eliminate, EliminationConfig, EliminationError, Eliminator, Matrix, Outcome,
        DEFAULT_EPSILON,
    };

    pub use crate::io::{format_matrix, parse_matrix, read_matrix, ParseError};
}
