use crate::scalar::Scalar;

/// A fixed-length vector observation.
///
/// The accumulator only needs the length and per-component reads, so any
/// contiguous or indexable container of scalars can be fed in directly.
pub trait Sample {
    type Scalar: Scalar;

    /// Number of components.
    fn dim(&self) -> usize;

    /// Component `i`. Callers guarantee `i < self.dim()`.
    fn component(&self, i: usize) -> Self::Scalar;
}

impl<T: Scalar> Sample for [T] {
    type Scalar = T;

    #[inline(always)]
    fn dim(&self) -> usize {
        self.len()
    }

    #[inline(always)]
    fn component(&self, i: usize) -> T {
        self[i]
    }
}

impl<T: Scalar, const N: usize> Sample for [T; N] {
    type Scalar = T;

    #[inline(always)]
    fn dim(&self) -> usize {
        N
    }

    #[inline(always)]
    fn component(&self, i: usize) -> T {
        self[i]
    }
}

impl<T: Scalar> Sample for Vec<T> {
    type Scalar = T;

    #[inline(always)]
    fn dim(&self) -> usize {
        self.len()
    }

    #[inline(always)]
    fn component(&self, i: usize) -> T {
        self[i]
    }
}

impl<T: Scalar> Sample for Box<[T]> {
    type Scalar = T;

    #[inline(always)]
    fn dim(&self) -> usize {
        self.len()
    }

    #[inline(always)]
    fn component(&self, i: usize) -> T {
        self[i]
    }
}

impl<S: Sample + ?Sized> Sample for &S {
    type Scalar = S::Scalar;

    #[inline(always)]
    fn dim(&self) -> usize {
        (**self).dim()
    }

    #[inline(always)]
    fn component(&self, i: usize) -> S::Scalar {
        (**self).component(i)
    }
}
