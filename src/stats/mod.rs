//! Running statistics for tailcast.

pub mod cumulative;
pub mod moments;

pub use cumulative::{Checkpoint, CumulativeConfig, CumulativeStatistic};
pub use moments::StreamingMoments;
