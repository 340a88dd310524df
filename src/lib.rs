//! Streaming mean and population covariance of fixed-dimension sample vectors.
//!
//! [`CovarianceAccumulator`] is the consumer end of a sample pipeline: any
//! number of producer threads push samples through [`Consumer::consume`] (or
//! [`CovarianceAccumulator::ingest`]) and readers take value snapshots at any
//! time. Nothing but the running mean and covariance is retained.

mod aux_data;
mod consumer;
mod covariance;
mod error;
mod matrix;
mod sample;
mod scalar;
mod welford;

#[cfg(feature = "python")]
mod python;

pub use aux_data::AuxiliaryData;
pub use consumer::Consumer;
pub use covariance::{CovarianceAccumulator, Summary};
pub use error::CovarianceError;
pub use matrix::CovarianceMatrix;
pub use sample::Sample;
pub use scalar::Scalar;
