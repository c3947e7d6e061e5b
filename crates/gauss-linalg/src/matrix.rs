//! Dense row-major matrix of floating-point values.
//!
//! The matrix is the only mutable state shared with elimination workers. It
//! never hands out aliased mutable access: workers receive disjoint row
//! blocks carved out with [`Matrix::split_at_pivot`].

use std::ops::{Index, IndexMut};

use num_traits::Float;
use rayon::prelude::*;

use crate::error::MatrixError;

/// Dense matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T = f64> {
    /// Matrix entries in row-major order.
    data: Vec<T>,
    /// Number of rows.
    num_rows: usize,
    /// Number of columns.
    num_cols: usize,
}

impl<T: Float> Matrix<T> {
    /// Creates a new matrix filled with zeros.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::EmptyDimension`] if either dimension is zero.
    pub fn zeros(num_rows: usize, num_cols: usize) -> Result<Self, MatrixError> {
        check_dimensions(num_rows, num_cols)?;
        Ok(Self {
            data: vec![T::zero(); num_rows * num_cols],
            num_rows,
            num_cols,
        })
    }

    /// Creates a matrix from a 2D vector.
    ///
    /// # Errors
    ///
    /// Fails if `rows` is empty, the first row is empty, or any row length
    /// differs from the first.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, MatrixError> {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, Vec::len);
        check_dimensions(num_rows, num_cols)?;

        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != num_cols)
        {
            return Err(MatrixError::RaggedRows {
                row,
                expected: num_cols,
                found,
            });
        }

        Ok(Self {
            data: rows.into_iter().flatten().collect(),
            num_rows,
            num_cols,
        })
    }

    /// Creates a matrix from values already laid out in row-major order.
    ///
    /// # Errors
    ///
    /// Fails on a zero dimension or if `data.len() != num_rows * num_cols`.
    pub fn from_vec(num_rows: usize, num_cols: usize, data: Vec<T>) -> Result<Self, MatrixError> {
        check_dimensions(num_rows, num_cols)?;
        let expected = num_rows * num_cols;
        if data.len() != expected {
            return Err(MatrixError::DataLength {
                expected,
                found: data.len(),
            });
        }
        Ok(Self {
            data,
            num_rows,
            num_cols,
        })
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Number of pivots an elimination visits: `min(rows, cols)`.
    #[must_use]
    pub fn pivot_count(&self) -> usize {
        self.num_rows.min(self.num_cols)
    }

    /// Returns the entry at (row, col).
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfRange`] if either index is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Result<T, MatrixError> {
        self.offset(row, col).map(|at| self.data[at])
    }

    /// Overwrites the entry at (row, col).
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfRange`] if either index is out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<(), MatrixError> {
        let at = self.offset(row, col)?;
        self.data[at] = value;
        Ok(())
    }

    /// Returns a slice of the specified row.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfRange`] if `row` is out of bounds.
    pub fn row(&self, row: usize) -> Result<&[T], MatrixError> {
        let start = self.offset(row, 0)?;
        Ok(&self.data[start..start + self.num_cols])
    }

    /// Returns a mutable slice of the specified row.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfRange`] if `row` is out of bounds.
    pub fn row_mut(&mut self, row: usize) -> Result<&mut [T], MatrixError> {
        let start = self.offset(row, 0)?;
        Ok(&mut self.data[start..start + self.num_cols])
    }

    /// All entries in row-major order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Copies the entries out as a vector of rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.data
            .chunks_exact(self.num_cols)
            .map(<[T]>::to_vec)
            .collect()
    }

    /// Parallel iterator over mutable rows, for passes where each row is
    /// processed independently.
    pub(crate) fn par_rows_mut(&mut self) -> rayon::slice::ChunksExactMut<'_, T>
    where
        T: Send,
    {
        self.data.par_chunks_exact_mut(self.num_cols)
    }

    /// Splits the matrix around `pivot`.
    ///
    /// Returns the pivot row as a shared slice together with the block of
    /// every row strictly below it as one mutable slice. The caller carves
    /// the block further into per-worker pieces.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfRange`] if `pivot` is not a row index.
    pub(crate) fn split_at_pivot(&mut self, pivot: usize) -> Result<(&[T], &mut [T]), MatrixError> {
        let start = self.offset(pivot, 0)?;
        let (head, below) = self.data.split_at_mut(start + self.num_cols);
        Ok((&head[start..], below))
    }

    fn offset(&self, row: usize, col: usize) -> Result<usize, MatrixError> {
        if row < self.num_rows && col < self.num_cols {
            Ok(row * self.num_cols + col)
        } else {
            Err(MatrixError::OutOfRange {
                row,
                col,
                rows: self.num_rows,
                cols: self.num_cols,
            })
        }
    }
}

fn check_dimensions(rows: usize, cols: usize) -> Result<(), MatrixError> {
    if rows == 0 || cols == 0 {
        Err(MatrixError::EmptyDimension { rows, cols })
    } else {
        Ok(())
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(row < self.num_rows && col < self.num_cols);
        &self.data[row * self.num_cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        assert!(row < self.num_rows && col < self.num_cols);
        &mut self.data[row * self.num_cols + col]
    }
}
