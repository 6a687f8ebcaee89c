//! # Hopfield CAM
//!
//! A discrete Hopfield network used as a content-addressable memory.
//! Bipolar patterns are stored in a weight matrix with the outer-product
//! rule, and recalled from corrupted probes by asynchronous signum updates.
//!
//! ## Modules
//!
//! - `hopfield`: patterns, storage rule, update order and recall
//! - `data`: built-in letter glyphs and JSON pattern sets
//! - `utils`: probe corruption and recall metrics
//! - `simulation`: noisy-recall and recall-performance experiments
//!
//! ## Quick Start
//!
//! ```rust
//! use hopfield_cam::{PatternSet, RandomOrder, RecallEngine, WeightMatrix};
//! use hopfield_cam::utils::noise::flip_bits;
//! use rand::SeedableRng;
//!
//! let set = PatternSet::letters().unwrap();
//! let patterns = set.patterns();
//! let weights = WeightMatrix::store(&patterns).unwrap();
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let probe = flip_bits(&patterns[0], 3, &mut rng).unwrap();
//!
//! let engine = RecallEngine::new(&weights, 10).unwrap();
//! let outcome = engine.recall(&probe, &mut RandomOrder::seeded(7)).unwrap();
//! assert!(outcome.energy_trace.is_non_increasing());
//! ```

pub mod data;
pub mod error;
pub mod hopfield;
pub mod simulation;
pub mod utils;

// Re-export main types for convenience
pub use data::{NamedPattern, PatternSet};
pub use error::{HopfieldError, PatternError, Result};
pub use hopfield::{
    recall, EnergyTrace, FixedOrder, Pattern, RandomOrder, RecallEngine, RecallOutcome,
    UpdateOrder, UpdateOrderPolicy, WeightMatrix,
};
pub use simulation::{NoisyRecall, PerformancePoint, Simulation, SimulationConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::data::{NamedPattern, PatternSet};
    pub use crate::error::{HopfieldError, PatternError, Result};
    pub use crate::hopfield::{
        FixedOrder, Pattern, RandomOrder, RecallEngine, RecallOutcome, UpdateOrder,
        UpdateOrderPolicy, WeightMatrix,
    };
    pub use crate::simulation::{Simulation, SimulationConfig};
    pub use crate::utils::metrics::{classify_attractor, squared_error, Attractor};
    pub use crate::utils::noise::{flip_bits, mask_block};
}
