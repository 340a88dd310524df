//! One-sample Welford update for a running mean vector and population
//! covariance matrix.
//!
//! With `n` the count *after* the new sample `x` is included and
//! `δ = x − mean_{n−1}`:
//!
//! ```text
//! C_n[i][j] = (n−1)/n · (C_{n−1}[i][j] + δi·δj / n)
//! mean_n    = mean_{n−1} + δ / n
//! ```
//!
//! Reference: <https://en.wikipedia.org/wiki/Algorithms_for_calculating_variance#Welford's_online_algorithm>

use crate::sample::Sample;
use crate::scalar::Scalar;

/// Folds `sample` into `mean` and the row-major `cov`.
///
/// `delta` is caller-owned scratch of the same length as `mean`. The
/// covariance is advanced from the pre-update mean before the mean moves.
/// Every entry is computed as `δi·δj` (never `δj·δi` with different
/// rounding), so `cov` stays exactly symmetric.
#[inline(always)]
pub fn update<T, S>(mean: &mut [T], cov: &mut [T], delta: &mut [T], sample: &S, n: u64)
where
    T: Scalar,
    S: Sample<Scalar = T> + ?Sized,
{
    let d = mean.len();
    assert_eq!(sample.dim(), d, "sample length differs from mean");
    assert_eq!(cov.len(), d * d, "covariance buffer is not {d}x{d}");
    assert_eq!(delta.len(), d, "scratch length differs from mean");

    let n = T::from_count(n);
    let keep = (n - T::one()) / n;

    for (i, (dst, m)) in delta.iter_mut().zip(mean.iter()).enumerate() {
        *dst = sample.component(i) - *m;
    }

    for (row, &di) in cov.chunks_exact_mut(d.max(1)).zip(delta.iter()) {
        for (c, &dj) in row.iter_mut().zip(delta.iter()) {
            *c = keep * (*c + di * dj / n);
        }
    }

    for (m, &di) in mean.iter_mut().zip(delta.iter()) {
        *m = *m + di / n;
    }
}
