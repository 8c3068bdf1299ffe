//! Histogram primitives for tailcast.

pub mod histogram;

pub use histogram::Histogram;
