//! Experiment configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HopfieldError, Result};
use crate::hopfield::UpdateOrderPolicy;

/// Settings shared by the noisy-recall and recall-performance experiments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Sweep budget of each recall
    pub max_sweeps: usize,
    /// Unit visiting order
    pub order: UpdateOrderPolicy,
    /// Trials per flip count in the performance sweep
    pub repetitions: usize,
    /// Increment between flip counts in the performance sweep
    pub flip_step: usize,
    /// Units flipped per probe in the noisy-recall experiment
    pub demo_flips: usize,
    /// Seed for probe corruption (and for the update order when it has none)
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_sweeps: 10,
            order: UpdateOrderPolicy::default(),
            repetitions: 200,
            flip_step: 3,
            demo_flips: 10,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            HopfieldError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&json)
            .map_err(|e| HopfieldError::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make an experiment meaningless
    pub fn validate(&self) -> Result<()> {
        if self.max_sweeps == 0 {
            return Err(HopfieldError::InvalidConfig(
                "max_sweeps must be at least 1".to_string(),
            ));
        }
        if self.repetitions == 0 {
            return Err(HopfieldError::InvalidConfig(
                "repetitions must be at least 1".to_string(),
            ));
        }
        if self.flip_step == 0 {
            return Err(HopfieldError::InvalidConfig(
                "flip_step must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the sweep budget
    pub fn max_sweeps(mut self, max_sweeps: usize) -> Self {
        self.max_sweeps = max_sweeps;
        self
    }

    /// Set the update order policy
    pub fn order(mut self, order: UpdateOrderPolicy) -> Self {
        self.order = order;
        self
    }

    /// Set the number of trials per flip count
    pub fn repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Set the master seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
