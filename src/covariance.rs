use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::aux_data::AuxiliaryData;
use crate::consumer::Consumer;
use crate::error::CovarianceError;
use crate::matrix::CovarianceMatrix;
use crate::sample::Sample;
use crate::scalar::Scalar;
use crate::welford;

/// Running population covariance of every sample seen so far:
///
/// ```text
/// C_k = 1/k · Σ_{j=1..k} (x_j − x̄_k)(x_j − x̄_k)^T
/// ```
///
/// Samples are folded in one at a time with a Welford update; no history
/// is kept. The dimension is fixed by the first sample.
///
/// All state sits behind one mutex held for the whole of each `ingest` and
/// each read, so the accumulator can be shared (e.g. in an `Arc`) between
/// any number of producer and reader threads. Concurrent producers are
/// serialised in lock order; the count is exact regardless, but the last
/// bits of the mean and covariance depend on that order.
///
/// ```
/// use covflow::CovarianceAccumulator;
///
/// let acc = CovarianceAccumulator::<f64>::new();
/// acc.ingest(&[1.0, 2.0]).unwrap();
/// acc.ingest(&[3.0, 4.0]).unwrap();
/// acc.ingest(&[5.0, 6.0]).unwrap();
///
/// let cov = acc.snapshot();
/// assert!((cov[(0, 1)] - 8.0 / 3.0).abs() < 1e-12);
/// assert_eq!(acc.mean(), Some(vec![3.0, 4.0]));
/// ```
pub struct CovarianceAccumulator<T> {
    state: Mutex<RunningState<T>>,
}

struct RunningState<T> {
    count: u64,
    mean: Vec<T>,
    covariance: CovarianceMatrix<T>,
    /// Per-update `x − mean`, sized once the dimension is known.
    delta: Vec<T>,
}

/// `count`, `mean` and `covariance` read under a single lock acquisition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary<T> {
    pub count: u64,
    /// Empty when `count == 0`.
    pub mean: Vec<T>,
    pub covariance: CovarianceMatrix<T>,
}

impl<T: Scalar> CovarianceAccumulator<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RunningState {
                count: 0,
                mean: Vec::new(),
                covariance: CovarianceMatrix::empty(),
                delta: Vec::new(),
            }),
        }
    }

    /// Folds one sample into the running mean and covariance.
    ///
    /// The first sample fixes the dimension. A later sample of any other
    /// length is rejected with [`CovarianceError::DimensionMismatch`] and
    /// leaves the state untouched.
    pub fn ingest<S>(&self, sample: &S) -> Result<(), CovarianceError>
    where
        S: Sample<Scalar = T> + ?Sized,
    {
        let mut st = self.state.lock();
        let d = sample.dim();

        if st.count == 0 {
            // A single point has zero spread.
            st.count = 1;
            st.covariance = CovarianceMatrix::zeros(d);
            st.mean = (0..d).map(|i| sample.component(i)).collect();
            st.delta = vec![T::zero(); d];
            debug!(dim = d, "covariance accumulator dimension fixed");
            return Ok(());
        }

        let expected = st.mean.len();
        if d != expected {
            warn!(
                expected,
                actual = d,
                count = st.count,
                "rejecting sample with wrong dimension"
            );
            return Err(CovarianceError::DimensionMismatch { expected, actual: d });
        }

        let n = st.count + 1;
        let RunningState {
            mean,
            covariance,
            delta,
            ..
        } = &mut *st;
        welford::update(mean, covariance.as_mut_slice(), delta, sample, n);
        st.count = n;
        Ok(())
    }

    /// Copy of the current covariance matrix; 0×0 before the first sample.
    pub fn snapshot(&self) -> CovarianceMatrix<T> {
        self.state.lock().covariance.clone()
    }

    /// Copy of the running mean, `None` before the first sample.
    pub fn mean(&self) -> Option<Vec<T>> {
        let st = self.state.lock();
        (st.count > 0).then(|| st.mean.clone())
    }

    pub fn count(&self) -> u64 {
        self.state.lock().count
    }

    /// Dimension fixed by the first sample.
    pub fn dim(&self) -> Option<usize> {
        let st = self.state.lock();
        (st.count > 0).then_some(st.mean.len())
    }

    pub fn summary(&self) -> Summary<T> {
        let st = self.state.lock();
        Summary {
            count: st.count,
            mean: st.mean.clone(),
            covariance: st.covariance.clone(),
        }
    }
}

impl<T: Scalar> Default for CovarianceAccumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> Consumer<S> for CovarianceAccumulator<T>
where
    T: Scalar,
    S: Sample<Scalar = T>,
{
    type Error = CovarianceError;

    /// Same as [`CovarianceAccumulator::ingest`]; `aux` is not used.
    fn consume(&self, sample: S, _aux: AuxiliaryData) -> Result<(), CovarianceError> {
        self.ingest(&sample)
    }
}
