//! Direct compounding: sum of `n` fresh draws per observation.

use crate::dist::Distribution;
use crate::hist::Histogram;

/// Fill `hist` with `quota` observations, each the sum of `n` independent
/// draws from `src`. Exact in distribution; cost O(quota × n).
pub(crate) fn fill(src: &mut dyn Distribution, hist: &mut Histogram, n: usize, quota: usize) {
    for _ in 0..quota {
        let mut sum = 0.0;
        for _ in 0..n {
            sum += src.sample();
        }
        hist.add(sum);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dist::Gaussian;

    #[test]
    fn test_direct_sum_moments() {
        let mut src = Gaussian::new(1.0, 1.0, 42).unwrap();
        let mut hist = Histogram::exponential(10.0, 200.0, 80, 1.08).unwrap();
        fill(&mut src, &mut hist, 10, 20_000);

        assert!((hist.total() - 20_000.0).abs() < 1e-9);
        // Sum of 10 draws of Gaussian(mean 1): mean 10.
        assert!((hist.mean() - 10.0).abs() < 0.1, "mean {}", hist.mean());
        // Variance adds: 10 × σ² with σ = MAD·√(π/2).
        let sigma2 = std::f64::consts::PI / 2.0;
        let expected = 10.0 * sigma2;
        assert!(
            (hist.variance() - expected).abs() < 0.1 * expected,
            "variance {}",
            hist.variance()
        );
    }

    #[test]
    fn test_n_one_matches_base() {
        let mut src = Gaussian::new(2.0, 1.0, 7).unwrap();
        let mut hist = Histogram::exponential(2.0, 60.0, 80, 1.08).unwrap();
        fill(&mut src, &mut hist, 1, 20_000);
        assert!((hist.mean() - 2.0).abs() < 0.05);
    }
}
