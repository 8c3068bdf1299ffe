//! Probability distributions for tailcast.
//!
//! The [`Distribution`] trait is the capability the compounding and
//! calibration engines consume: point density, pseudo-random draws,
//! analytic moments, deterministic reseeding and independent copies for
//! parallel fan-out.

pub mod empirical;
pub mod gaussian;
pub mod special;
pub mod student_t;

pub use empirical::EmpiricalDist;
pub use gaussian::Gaussian;
pub use student_t::StudentT;

/// A probability distribution that can be sampled and evaluated.
///
/// Implementations own their random state: `clone_dist` plus `reseed`
/// give each parallel worker an independent, reproducible copy, so
/// concurrent sampling never touches shared state.
pub trait Distribution: Send {
    /// Probability density at `x`. Integrates to 1 over the support.
    fn prob(&self, x: f64) -> f64;

    /// Draw the next pseudo-random value.
    fn sample(&mut self) -> f64;

    /// Mean of the distribution.
    fn mean(&self) -> f64;

    /// Mean absolute deviation from the mean.
    fn mad(&self) -> f64;

    /// Reset the internal random stream to a deterministic state.
    fn reseed(&mut self, seed: u64);

    /// An independent copy, safe to reseed and sample on another thread.
    fn clone_dist(&self) -> Box<dyn Distribution>;

    /// Whether successive samples are statistically independent.
    ///
    /// Sliding-window compounding produces correlated output streams;
    /// downstream statistics that assume i.i.d. samples (naive
    /// confidence-interval widths) must check this flag. Marginal
    /// mean/variance estimation remains valid either way.
    fn independent(&self) -> bool {
        true
    }
}

impl Clone for Box<dyn Distribution> {
    fn clone(&self) -> Self {
        self.clone_dist()
    }
}
