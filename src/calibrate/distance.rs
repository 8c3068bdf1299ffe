//! Log-scale distance between a sample histogram and a candidate density.

use crate::dist::Distribution;
use crate::hist::Histogram;

/// Worst-case log-space mismatch between `hist` and `dist`.
///
/// Computes `max |ln hist.pdf(i) − ln dist.prob(x_i)|` over interior
/// buckets, skipping:
/// - the two open-ended edge buckets (catch-all aggregates, no density),
/// - buckets with weight at or below `min_count` (too noisy to trust),
/// - buckets where either density is non-positive or non-finite (a zero
///   count where a ratio is needed means "distance undefined here", not an
///   error; one bad bucket must not abort a calibration loop).
///
/// Comparing in log space gives the sparse tails the same leverage as the
/// dense center, which is what makes the metric sensitive to tail-shape
/// mismatch on heavy-tailed data. Returns `0.0` if no bucket qualifies.
pub fn log_distance(hist: &Histogram, dist: &dyn Distribution, min_count: f64) -> f64 {
    let n = hist.num_buckets();
    let mut worst = 0.0f64;
    for i in 1..n.saturating_sub(1) {
        if hist.count(i) <= min_count {
            continue;
        }
        let p_hist = hist.pdf(i);
        let p_dist = dist.prob(hist.x(i));
        if p_hist <= 0.0 || p_dist <= 0.0 || !p_hist.is_finite() || !p_dist.is_finite() {
            continue;
        }
        let d = (p_hist.ln() - p_dist.ln()).abs();
        if d > worst {
            worst = d;
        }
    }
    worst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dist::{Distribution, Gaussian};

    /// Histogram filled from the analytic density itself (expected counts),
    /// so the distance should be near zero.
    fn hist_from_density(dist: &dyn Distribution, lo: f64, hi: f64, buckets: usize) -> Histogram {
        let mut h = Histogram::linear(lo, hi, buckets).unwrap();
        let total = 1_000_000.0;
        for i in 1..h.num_buckets() - 1 {
            let weight = dist.prob(h.x(i)) * h.width(i) * total;
            if weight > 0.0 {
                h.add_weighted(h.x(i), weight);
            }
        }
        h
    }

    #[test]
    fn test_matching_density_is_close() {
        let g = Gaussian::new(0.0, 1.0, 1).unwrap();
        let h = hist_from_density(&g, -5.0, 5.0, 200);
        let d = log_distance(&h, &g, 10.0);
        // Bucket-midpoint discretization leaves a small residual.
        assert!(d < 0.05, "distance {d}");
    }

    #[test]
    fn test_mismatched_density_is_far() {
        let g = Gaussian::new(0.0, 1.0, 1).unwrap();
        let shifted = Gaussian::new(2.0, 1.0, 1).unwrap();
        let h = hist_from_density(&g, -5.0, 5.0, 200);
        let close = log_distance(&h, &g, 10.0);
        let far = log_distance(&h, &shifted, 10.0);
        assert!(far > close + 1.0);
    }

    #[test]
    fn test_empty_histogram_gives_zero() {
        let g = Gaussian::new(0.0, 1.0, 1).unwrap();
        let h = Histogram::linear(-5.0, 5.0, 50).unwrap();
        assert_eq!(log_distance(&h, &g, 0.0), 0.0);
    }

    #[test]
    fn test_low_count_buckets_skipped() {
        let g = Gaussian::new(0.0, 1.0, 1).unwrap();
        let mut h = Histogram::linear(-5.0, 5.0, 50).unwrap();
        // One lonely far-tail observation would dominate the distance if
        // low-count buckets were trusted.
        for _ in 0..1000 {
            h.add(0.0);
        }
        h.add(4.9);
        let strict = log_distance(&h, &g, 0.0);
        let tolerant = log_distance(&h, &g, 5.0);
        assert!(tolerant < strict);
    }
}
