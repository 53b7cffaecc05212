//! Dense block arithmetic.
//!
//! Callers guarantee both operands share a dimension.

use block_mult_types::Matrix;

pub fn multiply(a: &Matrix, b: &Matrix) -> Matrix {
    let n = a.dim();
    let mut c = Matrix::zeros(n);
    for i in 0..n {
        for j in 0..n {
            let mut sum = 0.0;
            for k in 0..n {
                sum += a.get(i, k) * b.get(k, j);
            }
            c.set(i, j, sum);
        }
    }
    c
}

pub fn add(a: &Matrix, b: &Matrix) -> Matrix {
    let n = a.dim();
    let mut c = Matrix::zeros(n);
    for i in 0..n {
        for j in 0..n {
            c.set(i, j, a.get(i, j) + b.get(i, j));
        }
    }
    c
}
