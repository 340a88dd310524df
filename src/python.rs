use numpy::{PyArray1, PyArray2, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::{AuxiliaryData, Consumer, CovarianceAccumulator};

/// Thread-safe running covariance matrix over float64 samples.
#[pyclass(name = "CovarianceMatrix", frozen)]
pub struct PyCovarianceMatrix {
    inner: CovarianceAccumulator<f64>,
}

#[pymethods]
impl PyCovarianceMatrix {
    #[new]
    pub fn new() -> Self {
        Self {
            inner: CovarianceAccumulator::new(),
        }
    }

    /// Folds one sample in. `aux` must be a JSON object string if given; its
    /// content is not used.
    #[pyo3(signature = (sample, aux=None))]
    pub fn consume(
        &self,
        py: Python<'_>,
        sample: PyReadonlyArray1<f64>,
        aux: Option<&str>,
    ) -> PyResult<()> {
        let aux = match aux {
            Some(raw) => AuxiliaryData::parse_json(raw)
                .map_err(|e| PyValueError::new_err(format!("bad aux data: {e}")))?,
            None => AuxiliaryData::new(),
        };
        let sample = sample.as_array().to_vec();
        // The update only touches Rust state; let other Python threads run.
        py.allow_threads(|| self.inner.consume(sample, aux))
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Current covariance as a `(d, d)` array; `(0, 0)` before any sample.
    pub fn get<'py>(&self, py: Python<'py>) -> PyResult<&'py PyArray2<f64>> {
        let cov = self.inner.snapshot();
        let d = cov.dim();
        PyArray1::from_slice(py, cov.as_slice()).reshape([d, d])
    }

    pub fn mean<'py>(&self, py: Python<'py>) -> Option<&'py PyArray1<f64>> {
        self.inner.mean().map(|m| PyArray1::from_vec(py, m))
    }

    #[getter]
    pub fn count(&self) -> u64 {
        self.inner.count()
    }
}

impl Default for PyCovarianceMatrix {
    fn default() -> Self {
        Self::new()
    }
}

#[pymodule]
fn covflow(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyCovarianceMatrix>()?;
    Ok(())
}
