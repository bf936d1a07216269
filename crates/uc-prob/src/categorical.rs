//! Categorical distribution utilities over unnormalized logits.

use uc_core::{Error, Result};

use crate::math::{cumulative_logsumexp, logaddexp};

fn check_logits(logits: &[f64]) -> Result<()> {
    if logits.is_empty() {
        return Err(Error::Validation("logits must be non-empty".to_string()));
    }
    Ok(())
}

/// Log-probabilities from unnormalized logits: `logits - logsumexp(logits)`.
pub fn log_softmax(logits: &[f64]) -> Result<Vec<f64>> {
    check_logits(logits)?;
    let norm = logits.iter().fold(f64::NEG_INFINITY, |acc, &x| logaddexp(acc, x));
    Ok(logits.iter().map(|&x| x - norm).collect())
}

/// Log-PMF of category `k` under unnormalized `logits`.
pub fn logpmf(k: usize, logits: &[f64]) -> Result<f64> {
    check_logits(logits)?;
    if k >= logits.len() {
        return Err(Error::Validation(format!(
            "category {} out of range for {} categories",
            k,
            logits.len()
        )));
    }
    Ok(log_softmax(logits)?[k])
}

/// CDF at category `k`: total probability of categories `0..=k`.
pub fn cdf(k: usize, logits: &[f64]) -> Result<f64> {
    check_logits(logits)?;
    if k >= logits.len() {
        return Err(Error::Validation(format!(
            "category {} out of range for {} categories",
            k,
            logits.len()
        )));
    }
    let cum = cumulative_logsumexp(logits);
    let norm = cum[cum.len() - 1];
    Ok((cum[k] - norm).exp())
}

/// Normalized cumulative log-probabilities: entry `k` is
/// `log P(X <= k)`. The last entry is exactly 0.
pub fn cumulative_log_probs(logits: &[f64]) -> Result<Vec<f64>> {
    check_logits(logits)?;
    let mut cum = cumulative_logsumexp(logits);
    let norm = cum[cum.len() - 1];
    for c in cum.iter_mut() {
        *c -= norm;
    }
    Ok(cum)
}
