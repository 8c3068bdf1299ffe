//! Convergence tracking: a running statistic snapshotted at
//! logarithmically spaced sample counts.
//!
//! Feeding every observation into a plot is wasteful and unreadable;
//! convergence behavior is visible on a log grid. A `CumulativeStatistic`
//! ingests one scalar per sample and records the current statistic (plus
//! configured percentiles) only at checkpoint indices spaced near
//! `exp(ln(total)·(k+1)/points)`, so memory stays O(points) no matter how
//! many samples flow through.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, TailError};
use crate::hist::Histogram;
use crate::stats::moments::StreamingMoments;

/// Configuration for a [`CumulativeStatistic`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CumulativeConfig {
    /// Total number of samples the run will ingest.
    pub total_samples: u64,
    /// Checkpoint budget: at most this many snapshots are recorded.
    pub points: usize,
    /// Number of initial observations excluded from the statistic. The
    /// checkpoint schedule still advances through the skipped prefix.
    pub skip: u64,
    /// Percentiles (percent, each in `[0, 100]`) snapshotted at every
    /// checkpoint from the backing histogram.
    pub percentiles: Vec<f64>,
    /// Externally supplied reference value for overlay plotting.
    pub expected: Option<f64>,
}

impl Default for CumulativeConfig {
    fn default() -> Self {
        Self {
            total_samples: 1000,
            points: 50,
            skip: 0,
            percentiles: Vec::new(),
            expected: None,
        }
    }
}

impl CumulativeConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.total_samples < 3 {
            return Err(TailError::invalid_config(format!(
                "total_samples must be at least 3, got {}",
                self.total_samples
            )));
        }
        if self.points < 3 {
            return Err(TailError::invalid_config(format!(
                "checkpoint budget must be at least 3, got {}",
                self.points
            )));
        }
        for &p in &self.percentiles {
            if !(0.0..=100.0).contains(&p) {
                return Err(TailError::invalid_config(format!(
                    "percentile out of [0, 100]: {p}"
                )));
            }
        }
        Ok(())
    }
}

/// One recorded snapshot: the statistic and percentiles at a sample count.
#[derive(Debug, Clone, Serialize)]
pub struct Checkpoint {
    /// Sample count (including any skipped prefix) at which the snapshot
    /// was taken.
    pub samples: u64,
    /// Value of the tracked statistic.
    pub value: f64,
    /// Snapshot of the configured percentiles, in configuration order.
    pub percentiles: Vec<f64>,
}

/// Online estimator recording a statistic at log-spaced sample counts.
#[derive(Debug, Clone)]
pub struct CumulativeStatistic {
    cfg: CumulativeConfig,
    hist: Histogram,
    moments: StreamingMoments,
    /// Observations ingested, including the skipped prefix.
    seen: u64,
    /// Observations that entered the statistic.
    used: u64,
    last_value: f64,
    /// Strictly increasing checkpoint indices; never rewritten.
    schedule: Vec<u64>,
    next: usize,
    checkpoints: Vec<Checkpoint>,
}

impl CumulativeStatistic {
    /// Create a tracker; `layout` supplies the bucket boundaries used for
    /// percentile snapshots (its counts are ignored).
    pub fn new(cfg: CumulativeConfig, layout: &Histogram) -> Result<Self> {
        cfg.validate()?;
        let schedule = build_schedule(cfg.total_samples, cfg.points);
        Ok(Self {
            hist: layout.empty_like(),
            moments: StreamingMoments::new(),
            seen: 0,
            used: 0,
            last_value: f64::NAN,
            schedule,
            next: 0,
            checkpoints: Vec::with_capacity(cfg.points),
            cfg,
        })
    }

    /// Ingest a raw statistic value: checkpoints record the latest value.
    pub fn add(&mut self, value: f64) {
        self.ingest(value, false);
    }

    /// Ingest a contribution to a running average: checkpoints record the
    /// mean of all contributions so far.
    pub fn add_to_average(&mut self, value: f64) {
        self.ingest(value, true);
    }

    fn ingest(&mut self, value: f64, average_mode: bool) {
        self.seen += 1;
        if self.seen > self.cfg.skip {
            self.moments.update(value);
            self.hist.add(value);
            self.used += 1;
            self.last_value = value;
        }

        if self.next < self.schedule.len() && self.seen == self.schedule[self.next] {
            self.next += 1;
            // A checkpoint inside the skipped prefix has nothing to record.
            if self.used > 0 {
                let stat = if average_mode {
                    self.moments.mean()
                } else {
                    self.last_value
                };
                let percentiles = self
                    .cfg
                    .percentiles
                    .iter()
                    .map(|&p| self.hist.quantile(p))
                    .collect();
                self.checkpoints.push(Checkpoint {
                    samples: self.seen,
                    value: stat,
                    percentiles,
                });
            }
        }
    }

    /// Apply `f` to every recorded value and percentile, in place.
    ///
    /// Lets a caller accumulate one statistic and plot another, e.g.
    /// tracking mean squared deviation and taking the square root at the
    /// end to display a standard deviation.
    pub fn transform<F: Fn(f64) -> f64>(&mut self, f: F) {
        for cp in &mut self.checkpoints {
            cp.value = f(cp.value);
            for p in &mut cp.percentiles {
                *p = f(*p);
            }
        }
    }

    /// Recorded checkpoints, in snapshot order.
    #[inline]
    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    /// Sample counts of the recorded checkpoints.
    pub fn sample_counts(&self) -> Vec<u64> {
        self.checkpoints.iter().map(|c| c.samples).collect()
    }

    /// Values of the recorded checkpoints.
    pub fn values(&self) -> Vec<f64> {
        self.checkpoints.iter().map(|c| c.value).collect()
    }

    /// Reference value for overlay plotting, if configured.
    #[inline]
    pub fn expected(&self) -> Option<f64> {
        self.cfg.expected
    }

    /// Observations ingested so far, including the skipped prefix.
    #[inline]
    pub fn seen(&self) -> u64 {
        self.seen
    }

    /// Observations that entered the statistic.
    #[inline]
    pub fn used(&self) -> u64 {
        self.used
    }
}

/// Checkpoint indices near `exp(ln(total)·(k+1)/points)`, deduplicated to
/// a strictly increasing sequence.
fn build_schedule(total: u64, points: usize) -> Vec<u64> {
    let ln_total = (total as f64).ln();
    let mut schedule = Vec::with_capacity(points);
    let mut last = 0u64;
    for k in 0..points {
        let idx = (ln_total * (k + 1) as f64 / points as f64).exp().round() as u64;
        let idx = idx.min(total);
        if idx > last {
            schedule.push(idx);
            last = idx;
        }
    }
    schedule
}
