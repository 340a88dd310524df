use thiserror::Error;

/// Errors raised by [`crate::CovarianceAccumulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CovarianceError {
    /// A sample's length differs from the dimension fixed by the first sample.
    ///
    /// The rejected sample has no effect on the running state.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension established by the first sample
        expected: usize,
        /// Dimension of the rejected sample
        actual: usize,
    },
}
