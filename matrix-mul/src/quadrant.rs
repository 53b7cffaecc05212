//! Splitting a matrix into quadrants and stitching quadrants back together.

use block_mult_types::Matrix;

use crate::error::{Error, Result};

/// Position of a quadrant inside its parent matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    /// Builds the quadrant in the given half-row and half-column.
    pub fn at(bottom: bool, right: bool) -> Self {
        match (bottom, right) {
            (false, false) => Quadrant::TopLeft,
            (false, true) => Quadrant::TopRight,
            (true, false) => Quadrant::BottomLeft,
            (true, true) => Quadrant::BottomRight,
        }
    }

    pub fn is_bottom(self) -> bool {
        matches!(self, Quadrant::BottomLeft | Quadrant::BottomRight)
    }

    pub fn is_right(self) -> bool {
        matches!(self, Quadrant::TopRight | Quadrant::BottomRight)
    }

    /// Row and column of the quadrant's top-left element, for quadrants of
    /// dimension `half`.
    pub fn offset(self, half: usize) -> (usize, usize) {
        (
            if self.is_bottom() { half } else { 0 },
            if self.is_right() { half } else { 0 },
        )
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One matrix per quadrant.
#[derive(Debug, Clone, PartialEq)]
pub struct Quadrants {
    pub top_left: Matrix,
    pub top_right: Matrix,
    pub bottom_left: Matrix,
    pub bottom_right: Matrix,
}

impl Quadrants {
    pub fn get(&self, quadrant: Quadrant) -> &Matrix {
        match quadrant {
            Quadrant::TopLeft => &self.top_left,
            Quadrant::TopRight => &self.top_right,
            Quadrant::BottomLeft => &self.bottom_left,
            Quadrant::BottomRight => &self.bottom_right,
        }
    }

    pub fn into_array(self) -> [(Quadrant, Matrix); 4] {
        [
            (Quadrant::TopLeft, self.top_left),
            (Quadrant::TopRight, self.top_right),
            (Quadrant::BottomLeft, self.bottom_left),
            (Quadrant::BottomRight, self.bottom_right),
        ]
    }
}

/// Collects quadrant results that may arrive in any order.
#[derive(Debug, Default)]
pub(crate) struct QuadrantSlots {
    slots: [Option<Matrix>; 4],
}

impl QuadrantSlots {
    pub(crate) fn insert(&mut self, quadrant: Quadrant, matrix: Matrix) {
        self.slots[quadrant.index()] = Some(matrix);
    }

    pub(crate) fn into_quadrants(self) -> Result<Quadrants> {
        let [tl, tr, bl, br] = self.slots;
        Ok(Quadrants {
            top_left: tl.ok_or(Error::MissingQuadrant(Quadrant::TopLeft))?,
            top_right: tr.ok_or(Error::MissingQuadrant(Quadrant::TopRight))?,
            bottom_left: bl.ok_or(Error::MissingQuadrant(Quadrant::BottomLeft))?,
            bottom_right: br.ok_or(Error::MissingQuadrant(Quadrant::BottomRight))?,
        })
    }
}

/// Splits `m` into four independent quadrant copies of dimension `N/2`.
///
/// Fails with [`Error::InvalidShape`] if `N` is odd.
pub fn decompose(m: &Matrix) -> Result<Quadrants> {
    let n = m.dim();
    if n < 2 || n % 2 != 0 {
        return Err(Error::InvalidShape(format!(
            "cannot split a {n}x{n} matrix into quadrants"
        )));
    }

    let half = n / 2;
    let copy = |quadrant: Quadrant| {
        let (row, col) = quadrant.offset(half);
        m.submatrix(row, col, half)
    };

    Ok(Quadrants {
        top_left: copy(Quadrant::TopLeft),
        top_right: copy(Quadrant::TopRight),
        bottom_left: copy(Quadrant::BottomLeft),
        bottom_right: copy(Quadrant::BottomRight),
    })
}

/// Writes each quadrant back at the offset [`decompose`] took it from.
///
/// Fails with [`Error::ShapeMismatch`] unless all four quadrants share one
/// dimension.
pub fn recombine(quadrants: Quadrants) -> Result<Matrix> {
    let half = quadrants.top_left.dim();
    for quadrant in Quadrant::ALL {
        let dim = quadrants.get(quadrant).dim();
        if dim != half {
            return Err(Error::ShapeMismatch(format!(
                "{quadrant:?} is {dim}x{dim}, top-left is {half}x{half}"
            )));
        }
    }

    let mut m = Matrix::zeros(half * 2);
    for (quadrant, block) in quadrants.into_array() {
        let (row, col) = quadrant.offset(half);
        m.write_submatrix(row, col, &block);
    }
    Ok(m)
}
