//! tailcast - Monte-Carlo distribution compounding and calibration engine.
//!
//! This crate provides the statistical core for heavy-tailed return
//! research:
//! - Compounding: the distribution of a sum of N i.i.d. draws from a base
//!   distribution, via three strategies trading accuracy for cost
//!   (direct, fast sliding-window, biased importance sampling)
//! - Tail-shape calibration: fitting a Student-t alpha to an observed
//!   histogram by minimizing a robust log-scale distance
//! - Convergence tracking: running statistics snapshotted at
//!   logarithmically spaced sample counts
//!
//! These share the same primitives: histograms with fixed linear or
//! symmetric-exponential bucket layouts, a [`dist::Distribution`]
//! capability with deterministic reseeding and independent copies for
//! parallel fan-out, and a derivative-free 1-D minimizer.

pub mod calibrate;
pub mod compound;
pub mod core;
pub mod dist;
pub mod hist;
pub mod stats;

pub use crate::core::error::{Result, TailError};
pub use calibrate::{derive_alpha, find_min, log_distance, DeriveAlphaConfig};
pub use compound::{compound, BiasConfig, CompoundConfig, Strategy};
pub use dist::{Distribution, EmpiricalDist, Gaussian, StudentT};
pub use hist::Histogram;
pub use stats::{CumulativeConfig, CumulativeStatistic, StreamingMoments};
