//! Calibration: minimizer, distance metric and tail-shape fitting.

pub mod alpha;
pub mod distance;
pub mod minimize;

pub use alpha::{derive_alpha, DeriveAlphaConfig};
pub use distance::log_distance;
pub use minimize::find_min;
