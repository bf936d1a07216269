//! Ordered uniform order statistics with optional pinned endpoints.

use uc_core::{broadcast_pair, Array, Dtype, Error, Prior, Result};
use uc_prob::math::ln_factorial;

use crate::expect_len;

/// Prior for `n` values jointly uniform on `[low, high]`, sorted
/// non-decreasing along the leading axis.
///
/// `fix_left` pins the first value to `low`, `fix_right` pins the last to
/// `high`; the remaining `n_free` values are genuine order statistics.
/// `low`/`high` broadcast elementwise over trailing dimensions, and the
/// sort applies per trailing element.
///
/// The transform uses the classical power/cumulative-product identity for
/// uniform order statistics: descending from the top, the `k`-th largest
/// of `k` uniforms is `U^{1/k}` times the next one up, which turns into a
/// reverse cumulative sum of `ln(U_i)/(i+1)` in log space.
#[derive(Debug, Clone)]
pub struct ForcedIdentifiability {
    n: usize,
    low: Array,
    high: Array,
    fix_left: bool,
    fix_right: bool,
    n_free: usize,
}

impl ForcedIdentifiability {
    /// Construct for `n` samples on `[low, high]` (scalar or broadcastable
    /// arrays).
    pub fn new(
        n: usize,
        low: Array,
        high: Array,
        fix_left: bool,
        fix_right: bool,
    ) -> Result<Self> {
        let n_fixed = usize::from(fix_left) + usize::from(fix_right);
        if n < n_fixed {
            return Err(Error::Validation(format!(
                "n={} too small for fix_left={} and fix_right={}",
                n, fix_left, fix_right
            )));
        }
        let (low, high) = broadcast_pair(&low, &high)?;
        for (&lo, &hi) in low.as_f64()?.iter().zip(high.as_f64()?) {
            if !lo.is_finite() || !hi.is_finite() || hi <= lo {
                return Err(Error::Validation(format!(
                    "need finite low < high, got [{}, {}]",
                    lo, hi
                )));
            }
        }
        let n_free = n - n_fixed;
        Ok(Self { n, low, high, fix_left, fix_right, n_free })
    }

    /// Number of unpinned order statistics.
    pub fn n_free(&self) -> usize {
        self.n_free
    }

    /// Elements per trailing slice of `low`/`high`.
    fn trailing(&self) -> usize {
        self.low.size()
    }
}

impl Prior for ForcedIdentifiability {
    fn dtype(&self) -> Dtype {
        Dtype::F64
    }

    fn base_shape(&self) -> Vec<usize> {
        let mut s = vec![self.n_free];
        s.extend_from_slice(self.low.shape());
        s
    }

    fn shape(&self) -> Vec<usize> {
        let mut s = vec![self.n];
        s.extend_from_slice(self.low.shape());
        s
    }

    fn forward(&self, u: &[f64]) -> Result<Array> {
        expect_len("forced-identifiability forward", u.len(), self.base_size())?;
        let m = self.trailing();
        let low = self.low.as_f64()?;
        let high = self.high.as_f64()?;
        let offset = usize::from(self.fix_left);
        let mut out = vec![0.0; self.n * m];

        for j in 0..m {
            // Reverse cumulative sum of ln(U_i)/(i+1): position i holds
            // the log of the i-th smallest free order statistic.
            let mut acc = 0.0;
            for i in (0..self.n_free).rev() {
                acc += u[i * m + j].ln() / (i + 1) as f64;
                out[(i + offset) * m + j] = low[j] + (high[j] - low[j]) * acc.exp();
            }
            if self.fix_left {
                out[j] = low[j];
            }
            if self.fix_right {
                out[(self.n - 1) * m + j] = high[j];
            }
        }
        Array::from_f64(self.shape(), out)
    }

    fn inverse(&self, x: &Array) -> Result<Vec<f64>> {
        let xs = x.as_f64()?;
        expect_len("forced-identifiability inverse", xs.len(), self.size())?;
        let m = self.trailing();
        let low = self.low.as_f64()?;
        let high = self.high.as_f64()?;
        let offset = usize::from(self.fix_left);
        let mut out = vec![0.0; self.n_free * m];

        for j in 0..m {
            // Forward difference against the next value up undoes the
            // reverse cumulative sum; y_{n_free} is 0 by convention.
            let mut next = 0.0;
            for i in (0..self.n_free).rev() {
                let y = ((xs[(i + offset) * m + j] - low[j]) / (high[j] - low[j])).ln();
                out[i * m + j] = ((y - next) * (i + 1) as f64).exp();
                next = y;
            }
        }
        Ok(out)
    }

    fn log_prob(&self, x: &Array) -> Result<Vec<f64>> {
        // Joint density of n_free sorted uniforms on [low, high]:
        // constant over the ordered region, independent of x itself.
        // Ordering and bounds of x are a caller precondition.
        expect_len("forced-identifiability log_prob", x.size(), self.size())?;
        let low = self.low.as_f64()?;
        let high = self.high.as_f64()?;
        let log_n_fac = ln_factorial(self.n_free as u64);
        let out = low
            .iter()
            .zip(high)
            .map(|(&lo, &hi)| {
                if self.n_free == 0 {
                    0.0
                } else {
                    -log_n_fac - self.n_free as f64 * (hi - lo).ln()
                }
            })
            .collect();
        Ok(out)
    }
}
