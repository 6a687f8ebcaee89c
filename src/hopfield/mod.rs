//! Classical (1982) Hopfield network
//!
//! Storage and recall for a discrete network of bipolar units:
//!
//! - [`pattern`]: validated `-1`/`+1` patterns
//! - [`storage`]: outer-product weight matrix
//! - [`order`]: unit visiting order per sweep
//! - [`recall`]: asynchronous relaxation with energy tracking

pub mod order;
pub mod pattern;
pub mod recall;
pub mod storage;

pub use order::{FixedOrder, RandomOrder, UpdateOrder, UpdateOrderPolicy};
pub use pattern::Pattern;
pub use recall::{energy, recall, signum, EnergyTrace, RecallEngine, RecallOutcome};
pub use storage::{WeightMatrix, CAPACITY_RATIO};
