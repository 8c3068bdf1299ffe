//! Tail-shape calibration: fit a Student-t alpha to an observed histogram.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calibrate::distance::log_distance;
use crate::calibrate::minimize::find_min;
use crate::core::error::{Result, TailError};
use crate::dist::StudentT;
use crate::hist::Histogram;

/// Configuration for [`derive_alpha`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeriveAlphaConfig {
    /// Lower edge of the alpha search interval. Must be above 1 so every
    /// candidate Student-t has a finite MAD.
    pub min_alpha: f64,
    /// Upper edge of the alpha search interval.
    pub max_alpha: f64,
    /// Interval width at which the search stops.
    pub epsilon: f64,
    /// Iteration budget for the minimizer.
    pub max_iter: usize,
    /// Buckets with weight at or below this are too noisy to trust.
    pub ignore_counts: f64,
}

impl Default for DeriveAlphaConfig {
    fn default() -> Self {
        Self {
            min_alpha: 1.2,
            max_alpha: 10.0,
            epsilon: 1e-3,
            max_iter: 100,
            ignore_counts: 10.0,
        }
    }
}

impl DeriveAlphaConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.min_alpha.is_finite() || self.min_alpha <= 1.0 {
            return Err(TailError::invalid_config(format!(
                "min_alpha must be above 1, got {}",
                self.min_alpha
            )));
        }
        if !self.max_alpha.is_finite() || self.max_alpha <= self.min_alpha {
            return Err(TailError::invalid_config(format!(
                "alpha interval is degenerate: [{}, {}]",
                self.min_alpha, self.max_alpha
            )));
        }
        if !(self.epsilon > 0.0) {
            return Err(TailError::invalid_config(format!(
                "epsilon must be positive, got {}",
                self.epsilon
            )));
        }
        if self.max_iter == 0 {
            return Err(TailError::invalid_config("max_iter must be at least 1"));
        }
        if !(self.ignore_counts >= 0.0) {
            return Err(TailError::invalid_config(format!(
                "ignore_counts must be non-negative, got {}",
                self.ignore_counts
            )));
        }
        Ok(())
    }
}

/// Find the Student-t tail-shape parameter best explaining `hist`.
///
/// Minimizes `log_distance(hist, StudentT(alpha, mean, mad), ignore_counts)`
/// over the configured alpha interval. `mean` and `mad` are held fixed; in
/// practice they come from the histogram itself or from a wider sample.
///
/// The distance is assumed approximately unimodal in alpha near the true
/// value; this is empirically validated for Student-t fits of return
/// histograms, not proven. A violation yields a local minimum, silently.
pub fn derive_alpha(hist: &Histogram, mean: f64, mad: f64, cfg: &DeriveAlphaConfig) -> Result<f64> {
    cfg.validate()?;
    if hist.is_empty() {
        return Err(TailError::empty_data("alpha calibration"));
    }
    if !mad.is_finite() || mad <= 0.0 {
        return Err(TailError::invalid_parameter(format!(
            "calibration requires MAD > 0, got {mad}"
        )));
    }

    let objective = |alpha: f64| match StudentT::new(alpha, mean, mad, 0) {
        Ok(candidate) => log_distance(hist, &candidate, cfg.ignore_counts),
        // Unreachable with a validated interval; treat as maximally bad.
        Err(_) => f64::INFINITY,
    };

    let alpha = find_min(
        objective,
        cfg.min_alpha,
        cfg.max_alpha,
        cfg.epsilon,
        cfg.max_iter,
    )?;
    debug!(alpha, mean, mad, "fitted tail-shape parameter");
    Ok(alpha)
}
