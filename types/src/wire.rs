//! Conversions between [`Matrix`] and the protobuf [`Block`].

use crate::blockmult::{Block, Row};
use crate::{Matrix, MatrixError};

impl From<&Matrix> for Block {
    fn from(matrix: &Matrix) -> Self {
        Block {
            rows: matrix
                .rows()
                .map(|values| Row {
                    values: values.to_vec(),
                })
                .collect(),
        }
    }
}

impl TryFrom<Block> for Matrix {
    type Error = MatrixError;

    fn try_from(block: Block) -> Result<Self, Self::Error> {
        Matrix::from_rows(block.rows.into_iter().map(|row| row.values).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_keeps_row_order() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let block = Block::from(&m);

        assert_eq!(block.rows.len(), 2);
        assert_eq!(block.rows[0].values, vec![1.0, 2.0]);
        assert_eq!(block.rows[1].values, vec![3.0, 4.0]);
        assert_eq!(Matrix::try_from(block).unwrap(), m);
    }

    #[test]
    fn empty_matrix_becomes_empty_block() {
        let block = Block::from(&Matrix::zeros(0));
        assert!(block.rows.is_empty());
        assert_eq!(Matrix::try_from(block), Err(MatrixError::Empty));
    }

    #[test]
    fn ragged_block_is_rejected() {
        let block = Block {
            rows: vec![
                Row {
                    values: vec![1.0, 2.0],
                },
                Row { values: vec![3.0] },
            ],
        };
        assert!(matches!(
            Matrix::try_from(block),
            Err(MatrixError::NotSquare { row: 1, .. })
        ));
    }
}
