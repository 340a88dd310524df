use crate::aux_data::AuxiliaryData;

/// Downstream end of a sample pipeline.
///
/// Producers call `consume` once per sample, from as many threads as they
/// run, so implementations take `&self` and do their own locking.
pub trait Consumer<S>: Send + Sync {
    type Error;

    fn consume(&self, sample: S, aux: AuxiliaryData) -> Result<(), Self::Error>;
}
