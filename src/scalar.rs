use core::fmt::Debug;

use num_traits::{Float, NumCast};

/// Numeric element type a [`crate::CovarianceAccumulator`] can run over.
///
/// Blanket-implemented for every `Float` that can cross threads, which in
/// practice means `f32` and `f64`.
pub trait Scalar: Float + Debug + Send + Sync + 'static {
    /// Converts a sample count into the scalar domain.
    #[inline(always)]
    fn from_count(n: u64) -> Self {
        // `Float` casts from u64 always succeed (possibly rounded).
        <Self as NumCast>::from(n).unwrap_or_else(Self::infinity)
    }
}

impl<T> Scalar for T where T: Float + Debug + Send + Sync + 'static {}
