//! Histogram-backed empirical distribution.
//!
//! The compound engine returns its result as an [`EmpiricalDist`]: the
//! aggregated histogram frozen behind the [`Distribution`] capability, so
//! compound results can be calibrated against, resampled, or compounded
//! again recursively.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::core::error::{Result, TailError};
use crate::dist::Distribution;
use crate::hist::Histogram;

/// A distribution read off a populated histogram.
///
/// `prob` reads the bucket density; `sample` draws a bucket proportionally
/// to its weight, then a uniform point inside it (catch-all edge buckets
/// collapse to their boundary). The histogram is immutable once wrapped.
#[derive(Debug, Clone)]
pub struct EmpiricalDist {
    hist: Histogram,
    cumulative: Vec<f64>,
    mean: f64,
    mad: f64,
    independent: bool,
    rng: SmallRng,
}

impl EmpiricalDist {
    /// Wrap a populated histogram.
    ///
    /// `independent` is the capability flag reported through
    /// [`Distribution::independent`]; the fast (sliding-window) compounding
    /// strategy passes `false` because the samples that built the histogram
    /// were serially correlated.
    pub fn new(hist: Histogram, seed: u64, independent: bool) -> Result<Self> {
        if hist.is_empty() {
            return Err(TailError::empty_data("empirical distribution"));
        }
        let mut cumulative = Vec::with_capacity(hist.num_buckets());
        let mut acc = 0.0;
        for i in 0..hist.num_buckets() {
            acc += hist.count(i);
            cumulative.push(acc);
        }
        let mean = hist.mean();
        let mad = hist.mad();
        Ok(Self {
            hist,
            cumulative,
            mean,
            mad,
            independent,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// The backing histogram.
    #[inline]
    pub fn histogram(&self) -> &Histogram {
        &self.hist
    }

    /// Exact variance of the recorded samples.
    #[inline]
    pub fn variance(&self) -> f64 {
        self.hist.variance()
    }

    /// Approximate quantile (percent in `[0, 100]`) of the recorded samples.
    #[inline]
    pub fn quantile(&self, p: f64) -> f64 {
        self.hist.quantile(p)
    }
}

impl Distribution for EmpiricalDist {
    fn prob(&self, x: f64) -> f64 {
        self.hist.pdf(self.hist.bucket_index(x))
    }

    fn sample(&mut self) -> f64 {
        let target = self.rng.random::<f64>() * self.hist.total();
        let i = self.cumulative.partition_point(|c| *c <= target);
        let i = i.min(self.hist.num_buckets() - 1);
        let w = self.hist.width(i);
        if w.is_finite() {
            let lo = self.hist.x(i) - 0.5 * w;
            lo + self.rng.random::<f64>() * w
        } else {
            // Catch-all bucket: collapse to the boundary.
            self.hist.x(i)
        }
    }

    fn mean(&self) -> f64 {
        self.mean
    }

    fn mad(&self) -> f64 {
        self.mad
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    fn clone_dist(&self) -> Box<dyn Distribution> {
        Box::new(self.clone())
    }

    fn independent(&self) -> bool {
        self.independent
    }
}
