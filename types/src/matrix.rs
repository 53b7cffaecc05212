//! Square matrix storage.

use std::fmt;

use crate::MatrixError;

/// A square matrix of `f64` stored row-major.
///
/// A `Matrix` is always square. [`Matrix::from_rows`] also rejects empty
/// input; only `zeros(0)` yields a 0×0 matrix, which has no rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    dim: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates a `dim`×`dim` matrix filled with zeros.
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            data: vec![0.0; dim * dim],
        }
    }

    /// Builds a matrix from nested rows.
    ///
    /// Fails with [`MatrixError::Empty`] if there are no rows or the rows hold
    /// no elements, and with [`MatrixError::NotSquare`] if any row length
    /// differs from the number of rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let dim = rows.len();
        if dim == 0 || rows.iter().all(|row| row.is_empty()) {
            return Err(MatrixError::Empty);
        }

        let mut data = Vec::with_capacity(dim * dim);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != dim {
                return Err(MatrixError::NotSquare {
                    row: i,
                    len: row.len(),
                    expected: dim,
                });
            }
            data.extend(row);
        }

        Ok(Self { dim, data })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.dim + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.dim + col] = value;
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.dim.max(1))
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }

    /// Copies the `dim`×`dim` region whose top-left corner is `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the region does not fit inside `self`.
    pub fn submatrix(&self, row: usize, col: usize, dim: usize) -> Matrix {
        assert!(row + dim <= self.dim && col + dim <= self.dim);

        let mut data = Vec::with_capacity(dim * dim);
        for i in row..row + dim {
            let start = i * self.dim + col;
            data.extend_from_slice(&self.data[start..start + dim]);
        }
        Matrix { dim, data }
    }

    /// Writes `block` into `self` with its top-left corner at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `block` does not fit inside `self` at that offset.
    pub fn write_submatrix(&mut self, row: usize, col: usize, block: &Matrix) {
        assert!(row + block.dim <= self.dim && col + block.dim <= self.dim);

        for (i, src) in block.rows().enumerate() {
            let start = (row + i) * self.dim + col;
            self.data[start..start + block.dim].copy_from_slice(src);
        }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "  {:?}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting(dim: usize) -> Matrix {
        let rows = (0..dim)
            .map(|i| (0..dim).map(|j| (i * dim + j) as f64).collect())
            .collect();
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn from_rows_rejects_empty_input() {
        assert_eq!(Matrix::from_rows(vec![]), Err(MatrixError::Empty));
        assert_eq!(Matrix::from_rows(vec![vec![]]), Err(MatrixError::Empty));
    }

    #[test]
    fn from_rows_rejects_single_row() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0, 4.0]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::NotSquare {
                row: 0,
                len: 4,
                expected: 1
            }
        );
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, MatrixError::NotSquare { row: 1, .. }));
    }

    #[test]
    fn empty_matrix_has_no_rows() {
        let m = Matrix::zeros(0);
        assert_eq!(m.rows().count(), 0);
        assert!(m.to_rows().is_empty());
        assert_eq!(m.to_string(), "");
    }

    #[test]
    fn submatrix_copies_region() {
        let m = counting(4);
        let sub = m.submatrix(2, 2, 2);
        assert_eq!(sub.to_rows(), vec![vec![10.0, 11.0], vec![14.0, 15.0]]);
    }

    #[test]
    fn write_submatrix_embeds_at_offset() {
        let mut m = Matrix::zeros(4);
        let block = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        m.write_submatrix(0, 2, &block);

        assert_eq!(m.row(0), &[0.0, 0.0, 1.0, 2.0]);
        assert_eq!(m.row(1), &[0.0, 0.0, 3.0, 4.0]);
        assert_eq!(m.row(2), &[0.0; 4]);
    }
}
