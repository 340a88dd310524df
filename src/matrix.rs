use core::ops::Index;

use serde::Serialize;

use crate::scalar::Scalar;

/// Square dense matrix, row-major.
///
/// Returned by value from [`crate::CovarianceAccumulator::snapshot`]; it owns
/// its storage and is never tied to the accumulator it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CovarianceMatrix<T> {
    dim: usize,
    data: Vec<T>,
}

impl<T: Scalar> CovarianceMatrix<T> {
    /// The 0×0 matrix, reported before any sample has arrived.
    pub fn empty() -> Self {
        Self {
            dim: 0,
            data: Vec::new(),
        }
    }

    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            data: vec![T::zero(); dim * dim],
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.dim == 0
    }

    pub fn get(&self, i: usize, j: usize) -> Option<T> {
        if i < self.dim && j < self.dim {
            Some(self.data[i * self.dim + j])
        } else {
            None
        }
    }

    /// Row `i` as a slice. Panics if `i >= dim`.
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        // chunks_exact(0) panics, and a 0×0 matrix has no rows anyway.
        self.data.chunks_exact(self.dim.max(1))
    }

    /// Row-major storage, `dim * dim` entries.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.rows().map(<[T]>::to_vec).collect()
    }

    /// Exact (bitwise on values) symmetry check.
    pub fn is_symmetric(&self) -> bool {
        (0..self.dim).all(|i| (i + 1..self.dim).all(|j| self[(i, j)] == self[(j, i)]))
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T: Scalar> Default for CovarianceMatrix<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Scalar> Index<(usize, usize)> for CovarianceMatrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        assert!(
            i < self.dim && j < self.dim,
            "index ({i}, {j}) out of bounds for {0}x{0} matrix",
            self.dim
        );
        &self.data[i * self.dim + j]
    }
}
