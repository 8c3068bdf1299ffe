//! Fixed-layout weighted histogram.
//!
//! Bucket boundaries are computed once at construction (linear or
//! symmetric-exponential spacing) and never change. The first and last
//! buckets are open-ended catch-alls for values outside the configured
//! range. Counts are `f64` weights so importance-sampled observations can
//! be recorded with their reweighting factor; plain observations use
//! weight 1.
//!
//! The weighted sum and sum of squares are tracked alongside the buckets,
//! so `mean()` and `variance()` are exact regardless of bucket resolution.
//! `mad()` and `quantile()` are bucket-midpoint approximations.

use serde::Serialize;

use crate::core::error::{Result, TailError};

/// A histogram with immutable bucket boundaries and weighted counts.
///
/// Layout: `edges` holds the interior boundaries (strictly increasing);
/// bucket `0` catches values below `edges[0]`, the last bucket catches
/// values at or above the last edge, and interior bucket `i` covers
/// `[edges[i-1], edges[i])`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    edges: Vec<f64>,
    counts: Vec<f64>,
    total: f64,
    sum: f64,
    sum_sq: f64,
}

impl Histogram {
    /// Create a histogram with `buckets` equal-width interior buckets over
    /// `[min, max)`.
    pub fn linear(min: f64, max: f64, buckets: usize) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(TailError::invalid_parameter(format!(
                "linear layout requires finite min < max, got [{min}, {max}]"
            )));
        }
        if buckets == 0 {
            return Err(TailError::invalid_parameter(
                "linear layout requires at least 1 bucket",
            ));
        }
        let span = max - min;
        let edges: Vec<f64> = (0..=buckets)
            .map(|i| min + span * i as f64 / buckets as f64)
            .collect();
        Ok(Self::from_edges(edges))
    }

    /// Create a symmetric-exponential histogram around `center`.
    ///
    /// Each side has `buckets_per_side` interior buckets whose widths grow
    /// geometrically by `growth` away from the center; the outermost
    /// interior boundary sits at `center ± half_range`. Fine resolution
    /// near the center, coarse in the tails.
    pub fn exponential(
        center: f64,
        half_range: f64,
        buckets_per_side: usize,
        growth: f64,
    ) -> Result<Self> {
        if !center.is_finite() || !half_range.is_finite() || half_range <= 0.0 {
            return Err(TailError::invalid_parameter(format!(
                "exponential layout requires finite center and half_range > 0, \
                 got center={center}, half_range={half_range}"
            )));
        }
        if buckets_per_side == 0 {
            return Err(TailError::invalid_parameter(
                "exponential layout requires at least 1 bucket per side",
            ));
        }
        if !growth.is_finite() || growth <= 1.0 {
            return Err(TailError::invalid_parameter(format!(
                "exponential layout requires growth > 1, got {growth}"
            )));
        }

        let n = buckets_per_side;
        let denom = growth.powi(n as i32) - 1.0;
        // Offset of the k-th boundary from the center; o_0 = 0, o_n = half_range.
        let offset = |k: usize| half_range * (growth.powi(k as i32) - 1.0) / denom;

        let mut edges = Vec::with_capacity(2 * n + 1);
        for k in (1..=n).rev() {
            edges.push(center - offset(k));
        }
        edges.push(center);
        for k in 1..=n {
            edges.push(center + offset(k));
        }
        Ok(Self::from_edges(edges))
    }

    fn from_edges(edges: Vec<f64>) -> Self {
        let counts = vec![0.0; edges.len() + 1];
        Self {
            edges,
            counts,
            total: 0.0,
            sum: 0.0,
            sum_sq: 0.0,
        }
    }

    /// Number of buckets, including the two catch-all edge buckets.
    #[inline]
    pub fn num_buckets(&self) -> usize {
        self.counts.len()
    }

    /// Total recorded weight.
    #[inline]
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Whether no weight has been recorded yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0.0
    }

    /// Index of the bucket covering `value`.
    #[inline]
    pub fn bucket_index(&self, value: f64) -> usize {
        self.edges.partition_point(|e| *e <= value)
    }

    /// Record a single observation with weight 1.
    #[inline]
    pub fn add(&mut self, value: f64) {
        self.add_weighted(value, 1.0);
    }

    /// Record an observation with an explicit weight.
    ///
    /// Non-finite values or non-positive weights are ignored: one bad draw
    /// must not poison a long accumulation.
    pub fn add_weighted(&mut self, value: f64, weight: f64) {
        if !value.is_finite() || !weight.is_finite() || weight <= 0.0 {
            return;
        }
        let idx = self.bucket_index(value);
        self.counts[idx] += weight;
        self.total += weight;
        self.sum += value * weight;
        self.sum_sq += value * value * weight;
    }

    /// Record a batch of observations with weight 1 each.
    pub fn extend<I: IntoIterator<Item = f64>>(&mut self, values: I) {
        for v in values {
            self.add(v);
        }
    }

    /// Recorded weight in bucket `i`.
    #[inline]
    pub fn count(&self, i: usize) -> f64 {
        self.counts[i]
    }

    /// Representative x for bucket `i`: the midpoint for interior buckets,
    /// the boundary value for the open-ended edge buckets.
    pub fn x(&self, i: usize) -> f64 {
        if i == 0 {
            self.edges[0]
        } else if i == self.counts.len() - 1 {
            *self.edges.last().unwrap()
        } else {
            0.5 * (self.edges[i - 1] + self.edges[i])
        }
    }

    /// Width of bucket `i`; infinite for the edge buckets.
    pub fn width(&self, i: usize) -> f64 {
        if i == 0 || i == self.counts.len() - 1 {
            f64::INFINITY
        } else {
            self.edges[i] - self.edges[i - 1]
        }
    }

    /// Empirical probability density at bucket `i`.
    ///
    /// Zero for the open-ended edge buckets (no finite width) and for an
    /// empty histogram.
    pub fn pdf(&self, i: usize) -> f64 {
        if i == 0 || i == self.counts.len() - 1 || self.total == 0.0 {
            return 0.0;
        }
        self.counts[i] / (self.total * (self.edges[i] - self.edges[i - 1]))
    }

    /// Exact weighted mean of all recorded values.
    pub fn mean(&self) -> f64 {
        if self.total == 0.0 {
            return f64::NAN;
        }
        self.sum / self.total
    }

    /// Exact weighted population variance of all recorded values.
    pub fn variance(&self) -> f64 {
        if self.total == 0.0 {
            return f64::NAN;
        }
        let mean = self.sum / self.total;
        (self.sum_sq / self.total - mean * mean).max(0.0)
    }

    /// Mean absolute deviation from the mean, approximated from bucket
    /// representatives.
    pub fn mad(&self) -> f64 {
        if self.total == 0.0 {
            return f64::NAN;
        }
        let mean = self.mean();
        let mut acc = 0.0;
        for i in 0..self.counts.len() {
            if self.counts[i] > 0.0 {
                acc += self.counts[i] * (self.x(i) - mean).abs();
            }
        }
        acc / self.total
    }

    /// Approximate quantile for `p` in percent (`[0, 100]`), linearly
    /// interpolated within the containing bucket. Weight in a catch-all
    /// bucket maps to its boundary value.
    pub fn quantile(&self, p: f64) -> f64 {
        if self.total == 0.0 || !(0.0..=100.0).contains(&p) {
            return f64::NAN;
        }
        let target = p / 100.0 * self.total;
        let mut cum = 0.0;
        for i in 0..self.counts.len() {
            let c = self.counts[i];
            if cum + c >= target && c > 0.0 {
                if i == 0 {
                    return self.edges[0];
                }
                if i == self.counts.len() - 1 {
                    return *self.edges.last().unwrap();
                }
                let frac = (target - cum) / c;
                return self.edges[i - 1] + frac * (self.edges[i] - self.edges[i - 1]);
            }
            cum += c;
        }
        *self.edges.last().unwrap()
    }

    /// Whether `other` shares this histogram's bucket boundaries.
    pub fn layout_matches(&self, other: &Histogram) -> bool {
        self.edges == other.edges
    }

    /// Fold another histogram's counts into this one.
    ///
    /// Requires identical layouts. Merging is commutative and associative
    /// up to floating-point rounding, so per-worker partial histograms can
    /// combine in any order.
    pub fn merge(&mut self, other: &Histogram) -> Result<()> {
        if !self.layout_matches(other) {
            return Err(TailError::layout_mismatch(
                self.num_buckets(),
                other.num_buckets(),
            ));
        }
        for (c, o) in self.counts.iter_mut().zip(other.counts.iter()) {
            *c += o;
        }
        self.total += other.total;
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
        Ok(())
    }

    /// An empty histogram with this histogram's layout.
    pub fn empty_like(&self) -> Histogram {
        Self::from_edges(self.edges.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_linear_layout() {
        let h = Histogram::linear(0.0, 10.0, 5).unwrap();
        assert_eq!(h.num_buckets(), 7); // 5 interior + 2 catch-alls
        assert_eq!(h.bucket_index(-1.0), 0);
        assert_eq!(h.bucket_index(0.0), 1);
        assert_eq!(h.bucket_index(3.5), 2);
        assert_eq!(h.bucket_index(9.99), 5);
        assert_eq!(h.bucket_index(10.0), 6);
        assert!((h.width(1) - 2.0).abs() < 1e-12);
        assert!((h.x(3) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_exponential_layout_widths_grow() {
        let h = Histogram::exponential(0.0, 10.0, 6, 1.5).unwrap();
        assert_eq!(h.num_buckets(), 14); // 12 interior + 2 catch-alls
        // Widths grow moving right from the center bucket.
        let center = h.num_buckets() / 2;
        for i in center..(h.num_buckets() - 2) {
            assert!(h.width(i + 1) > h.width(i));
        }
        // Outermost interior boundary sits at center + half_range.
        assert!((h.x(h.num_buckets() - 1) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_layouts() {
        assert!(Histogram::linear(1.0, 1.0, 10).is_err());
        assert!(Histogram::linear(0.0, 1.0, 0).is_err());
        assert!(Histogram::exponential(0.0, 1.0, 4, 1.0).is_err());
        assert!(Histogram::exponential(0.0, -1.0, 4, 1.5).is_err());
    }

    #[test]
    fn test_exact_moments() {
        let mut h = Histogram::linear(0.0, 10.0, 4).unwrap();
        h.extend([1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!((h.mean() - 3.0).abs() < 1e-12);
        // Population variance of 1..5 = 2.0, exact despite coarse buckets.
        assert!((h.variance() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_pdf_integrates_to_one() {
        let mut h = Histogram::linear(-5.0, 5.0, 50).unwrap();
        for i in 0..1000 {
            h.add(-4.9 + 9.8 * i as f64 / 1000.0);
        }
        let integral: f64 = (1..h.num_buckets() - 1)
            .map(|i| h.pdf(i) * h.width(i))
            .sum();
        assert!((integral - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_quantile_interpolation() {
        let mut h = Histogram::linear(0.0, 100.0, 100).unwrap();
        for i in 0..100 {
            h.add(i as f64 + 0.5);
        }
        assert!((h.quantile(50.0) - 50.0).abs() < 1.0);
        assert!((h.quantile(90.0) - 90.0).abs() < 1.0);
        assert!(h.quantile(0.0).is_finite());
        assert!(h.quantile(100.0) <= 100.0);
    }

    #[test]
    fn test_weighted_add() {
        let mut h = Histogram::linear(0.0, 10.0, 10).unwrap();
        h.add_weighted(2.5, 3.0);
        h.add_weighted(7.5, 1.0);
        assert!((h.total() - 4.0).abs() < 1e-12);
        assert!((h.mean() - (2.5 * 3.0 + 7.5) / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_nonfinite_values_ignored() {
        let mut h = Histogram::linear(0.0, 1.0, 4).unwrap();
        h.add(f64::NAN);
        h.add(f64::INFINITY);
        h.add_weighted(0.5, -1.0);
        assert!(h.is_empty());
        h.add(0.5);
        assert!((h.mean() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_merge_layout_mismatch() {
        let mut a = Histogram::linear(0.0, 1.0, 4).unwrap();
        let b = Histogram::linear(0.0, 1.0, 5).unwrap();
        assert!(a.merge(&b).is_err());
    }

    proptest! {
        /// Merging partial histograms over any partition of the same
        /// samples matches accumulating them in one histogram, and merge
        /// order does not matter.
        #[test]
        fn prop_merge_commutative_associative(
            values in prop::collection::vec(-50.0f64..50.0, 1..200),
            split_a in 0usize..200,
            split_b in 0usize..200,
        ) {
            let layout = Histogram::linear(-50.0, 50.0, 20).unwrap();
            let i = split_a.min(values.len());
            let j = split_b.min(values.len());
            let (lo, hi) = (i.min(j), i.max(j));

            let mut whole = layout.empty_like();
            whole.extend(values.iter().copied());

            let mut p1 = layout.empty_like();
            let mut p2 = layout.empty_like();
            let mut p3 = layout.empty_like();
            p1.extend(values[..lo].iter().copied());
            p2.extend(values[lo..hi].iter().copied());
            p3.extend(values[hi..].iter().copied());

            // (p1 + p2) + p3
            let mut left = p1.clone();
            left.merge(&p2).unwrap();
            left.merge(&p3).unwrap();
            // p3 + (p2 + p1)
            let mut right = p3.clone();
            right.merge(&p2).unwrap();
            right.merge(&p1).unwrap();

            for i in 0..whole.num_buckets() {
                prop_assert!((left.count(i) - whole.count(i)).abs() < 1e-9);
                prop_assert!((left.count(i) - right.count(i)).abs() < 1e-9);
            }
            prop_assert!((left.total() - whole.total()).abs() < 1e-9);
            prop_assert!((left.mean() - whole.mean()).abs() < 1e-9);
        }
    }
}
