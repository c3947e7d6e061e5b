//! Text input and output for matrices.
//!
//! The input format is whitespace separated: two integers giving the row and
//! column counts, then `rows * cols` numbers in row-major order.

use std::fs;
use std::path::{Path, PathBuf};

use gauss_linalg::{Matrix, MatrixError};
use thiserror::Error;

/// Banner printed above and below a formatted matrix.
pub const BANNER: &str = "***********************";

/// Errors raised while reading a matrix from text.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing matrix dimensions")]
    MissingDimensions,

    #[error("invalid dimension {token:?}")]
    InvalidDimension { token: String },

    #[error("value {index} is not a number: {token:?}")]
    InvalidNumber { index: usize, token: String },

    #[error("expected {expected} values, found {found}")]
    TooFewValues { expected: usize, found: usize },

    #[error("expected {expected} values, found trailing data after them")]
    TrailingValues { expected: usize },

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

/// Parses a matrix from its text form.
///
/// # Errors
///
/// Fails on missing or malformed dimensions, a token that is not a number,
/// or a value count that does not match the dimensions.
pub fn parse_matrix(input: &str) -> Result<Matrix, ParseError> {
    let mut tokens = input.split_whitespace();
    let rows = parse_dimension(tokens.next())?;
    let cols = parse_dimension(tokens.next())?;
    let expected = rows
        .checked_mul(cols)
        .ok_or_else(|| ParseError::InvalidDimension {
            token: format!("{rows}x{cols}"),
        })?;

    // Each value needs at least two bytes of input, so the header alone
    // cannot make the reservation outgrow the text.
    let mut data = Vec::with_capacity(expected.min(input.len() / 2 + 1));
    for (index, token) in tokens.by_ref().take(expected).enumerate() {
        let value = token.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
            index,
            token: token.to_owned(),
        })?;
        data.push(value);
    }

    if data.len() < expected {
        return Err(ParseError::TooFewValues {
            expected,
            found: data.len(),
        });
    }
    if tokens.next().is_some() {
        return Err(ParseError::TrailingValues { expected });
    }

    Ok(Matrix::from_vec(rows, cols, data)?)
}

fn parse_dimension(token: Option<&str>) -> Result<usize, ParseError> {
    let token = token.ok_or(ParseError::MissingDimensions)?;
    token.parse().map_err(|_| ParseError::InvalidDimension {
        token: token.to_owned(),
    })
}

/// Reads and parses a matrix file.
///
/// # Errors
///
/// Returns [`ParseError::Io`] if the file cannot be read, otherwise the
/// errors of [`parse_matrix`].
pub fn read_matrix(path: impl AsRef<Path>) -> Result<Matrix, ParseError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_owned(),
        source,
    })?;
    parse_matrix(&text)
}

/// Formats a matrix between two banners, one row per line.
///
/// Entries are printed with six decimals. Entries whose magnitude is below
/// `epsilon` are printed as their absolute value so that `-0.000000` never
/// shows up.
#[must_use]
pub fn format_matrix(matrix: &Matrix, epsilon: f64) -> String {
    let mut out = String::with_capacity(BANNER.len() * 2 + matrix.as_slice().len() * 10);
    out.push_str(BANNER);
    out.push('\n');
    for row in matrix.to_rows() {
        for value in row {
            let value = if value.abs() < epsilon { value.abs() } else { value };
            out.push_str(&format!("{value:.6} "));
        }
        out.push('\n');
    }
    out.push_str(BANNER);
    out.push('\n');
    out
}
