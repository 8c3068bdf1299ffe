//! Core types and utilities for tailcast.

pub mod error;
pub mod seed;

pub use error::{Result, TailError};
pub use seed::{resolve_seed, worker_seed};
