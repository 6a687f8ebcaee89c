//! Recall experiments on a memorized pattern set
//!
//! - [`config`]: experiment settings, loadable from JSON
//! - [`experiment`]: noisy recall and recall rate versus noise level

pub mod config;
pub mod experiment;

pub use config::SimulationConfig;
pub use experiment::{NoisyRecall, PerformancePoint, Simulation};
