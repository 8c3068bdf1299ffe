//! Streaming moment estimation using Welford's algorithm.
//!
//! Single-pass mean and variance without storing values, with the
//! parallel merge formula so per-worker partials combine in any order.

/// Streaming mean/variance calculator.
#[derive(Debug, Clone, Default)]
pub struct StreamingMoments {
    /// Number of observations.
    count: u64,
    /// Running mean.
    mean: f64,
    /// Running M2 for variance calculation.
    m2: f64,
}

impl StreamingMoments {
    /// Create a new streaming moments calculator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update with a new observation.
    ///
    /// Uses Welford's online algorithm for numerically stable variance.
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    /// Number of observations.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Running mean.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample variance.
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        self.m2 / (self.count - 1) as f64
    }

    /// Population variance.
    pub fn variance_population(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.m2 / self.count as f64
    }

    /// Sample standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Accumulated sum of squared deviations from the mean.
    #[inline]
    pub fn sum_sq_dev(&self) -> f64 {
        self.m2
    }

    /// Merge another calculator's state (for parallel computation).
    pub fn merge(&mut self, other: &StreamingMoments) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = other.clone();
            return;
        }
        let combined = self.count + other.count;
        let delta = other.mean - self.mean;
        self.mean += delta * other.count as f64 / combined as f64;
        self.m2 += other.m2
            + delta * delta * self.count as f64 * other.count as f64 / combined as f64;
        self.count = combined;
    }
}
