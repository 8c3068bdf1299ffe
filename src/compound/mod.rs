//! Distribution compounding: the distribution of a sum of N i.i.d. draws.

pub mod biased;
pub mod config;
pub mod direct;
pub mod engine;
pub mod fast;

pub use config::{default_workers, BiasConfig, CompoundConfig, Strategy};
pub use engine::compound;
