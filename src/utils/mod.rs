//! Utility module for probe corruption and recall metrics

pub mod metrics;
pub mod noise;

pub use metrics::{classify_attractor, hamming_distance, overlap, squared_error, Attractor};
pub use noise::{flip_bits, mask_block};
