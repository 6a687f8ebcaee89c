//! Noisy recall and recall-performance experiments
//!
//! Both experiments memorize a pattern set, corrupt each stored pattern by
//! flipping random units and try to recall it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::config::SimulationConfig;
use crate::error::Result;
use crate::hopfield::{
    Pattern, RandomOrder, RecallEngine, RecallOutcome, UpdateOrder, UpdateOrderPolicy,
    WeightMatrix,
};
use crate::utils::metrics::{classify_attractor, squared_error, Attractor};
use crate::utils::noise::flip_bits;

/// One corrupted probe and what the network made of it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoisyRecall {
    /// Index of the stored pattern that was corrupted
    pub index: usize,
    pub probe: Pattern,
    pub outcome: RecallOutcome,
    /// Squared error between the stored and recalled pattern
    pub squared_error: f64,
    pub attractor: Attractor,
}

impl NoisyRecall {
    /// A recall counts as correct when its squared error is below 1
    pub fn is_correct(&self) -> bool {
        self.squared_error < 1.0
    }
}

/// Recall rate at one noise level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    /// Units flipped per probe
    pub flips: usize,
    /// `flips` as a percentage of the unit count
    pub flip_percentage: f64,
    /// Percentage of probes recalled without error
    pub recall_percentage: f64,
    /// Percentage of recalls that converged within the sweep budget
    pub converged_percentage: f64,
}

/// Memorized patterns plus the randomness driving an experiment
pub struct Simulation {
    stored: Vec<Pattern>,
    weights: WeightMatrix,
    config: SimulationConfig,
    rng: StdRng,
    order: Box<dyn UpdateOrder + Send>,
}

impl Simulation {
    /// Memorize `patterns` and prepare generators from `config`
    pub fn new(patterns: Vec<Pattern>, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let weights = WeightMatrix::store(&patterns)?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        // An unseeded random order follows the master seed when there is one
        let order: Box<dyn UpdateOrder + Send> = match (&config.order, config.seed) {
            (UpdateOrderPolicy::Random { seed: None }, Some(_)) => {
                Box::new(RandomOrder::seeded(rng.gen()))
            }
            (policy, _) => policy.build(),
        };

        log::info!(
            "Memorized {} patterns of {} units (capacity {:.1})",
            weights.pattern_count(),
            weights.dimension(),
            weights.capacity()
        );

        Ok(Self {
            stored: patterns,
            weights,
            config,
            rng,
            order,
        })
    }

    pub fn weights(&self) -> &WeightMatrix {
        &self.weights
    }

    pub fn stored(&self) -> &[Pattern] {
        &self.stored
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Recall an arbitrary probe with the configured sweep budget and order
    pub fn recall(&mut self, probe: &Pattern) -> Result<RecallOutcome> {
        RecallEngine::new(&self.weights, self.config.max_sweeps)?.recall(probe, &mut self.order)
    }

    /// Flip `flips` units of every stored pattern and recall each probe
    pub fn noisy_recall(&mut self, flips: usize) -> Result<Vec<NoisyRecall>> {
        let engine = RecallEngine::new(&self.weights, self.config.max_sweeps)?;
        let mut results = Vec::with_capacity(self.stored.len());

        for (index, original) in self.stored.iter().enumerate() {
            let probe = flip_bits(original, flips, &mut self.rng)?;
            let outcome = engine.recall(&probe, &mut self.order)?;
            let error = squared_error(original, &outcome.pattern)?;
            let attractor = classify_attractor(&self.stored, &outcome.pattern)?;

            log::debug!("pattern {}: recall error {}", index, error);

            results.push(NoisyRecall {
                index,
                probe,
                outcome,
                squared_error: error,
                attractor,
            });
        }

        Ok(results)
    }

    /// Recall rate for flip counts 0, step, 2*step, ... up to N/2
    pub fn recall_performance(&mut self) -> Result<Vec<PerformancePoint>> {
        let n = self.weights.dimension();
        let trials = self.config.repetitions * self.stored.len();
        let mut points = Vec::new();

        for flips in (0..=n / 2).step_by(self.config.flip_step) {
            let mut correct = 0usize;
            let mut converged = 0usize;

            for _ in 0..self.config.repetitions {
                for recall in self.noisy_recall(flips)? {
                    correct += usize::from(recall.is_correct());
                    converged += usize::from(recall.outcome.converged);
                }
            }

            let point = PerformancePoint {
                flips,
                flip_percentage: flips as f64 / n as f64 * 100.0,
                recall_percentage: correct as f64 / trials as f64 * 100.0,
                converged_percentage: converged as f64 / trials as f64 * 100.0,
            };
            log::info!(
                "{:5.1}% flipped: {:5.1}% recalled",
                point.flip_percentage,
                point.recall_percentage
            );
            points.push(point);
        }

        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PatternSet;
    use crate::error::HopfieldError;

    fn letters_simulation(config: SimulationConfig) -> Simulation {
        let set = PatternSet::letters().unwrap();
        Simulation::new(set.patterns(), config).unwrap()
    }

    #[test]
    fn test_noise_free_recall_is_perfect() {
        let mut sim = letters_simulation(SimulationConfig::default().seed(1));
        let results = sim.noisy_recall(0).unwrap();

        assert_eq!(results.len(), 3);
        for (i, result) in results.iter().enumerate() {
            assert!(result.is_correct());
            assert!(result.outcome.converged);
            assert_eq!(result.outcome.flips, 0);
            assert_eq!(result.attractor, Attractor::Stored(i));
        }
    }

    #[test]
    fn test_noisy_recall_probes_have_requested_noise() {
        let mut sim = letters_simulation(SimulationConfig::default().seed(2));
        let results = sim.noisy_recall(4).unwrap();

        for result in &results {
            let original = &sim.stored()[result.index];
            let distance = crate::utils::metrics::hamming_distance(original, &result.probe).unwrap();
            assert_eq!(distance, 4);
            assert!(result.outcome.energy_trace.is_non_increasing());
        }
    }

    #[test]
    fn test_seeded_simulation_is_reproducible() {
        let config = SimulationConfig::default().seed(99);
        let a = letters_simulation(config.clone()).noisy_recall(8).unwrap();
        let b = letters_simulation(config).noisy_recall(8).unwrap();

        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.probe, y.probe);
            assert_eq!(x.outcome, y.outcome);
        }
    }

    #[test]
    fn test_recall_performance_levels() {
        let config = SimulationConfig::default().seed(5).repetitions(4);
        let mut sim = letters_simulation(config);
        let points = sim.recall_performance().unwrap();

        // 0, 3, ..., 24 for 49 units
        let flips: Vec<usize> = points.iter().map(|p| p.flips).collect();
        assert_eq!(flips, vec![0, 3, 6, 9, 12, 15, 18, 21, 24]);
        assert_eq!(points[0].recall_percentage, 100.0);
        assert!((points[3].flip_percentage - 9.0 / 49.0 * 100.0).abs() < 1e-9);
        for point in &points {
            assert!((0.0..=100.0).contains(&point.recall_percentage));
        }
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let set = PatternSet::letters().unwrap();
        let result = Simulation::new(set.patterns(), SimulationConfig::default().max_sweeps(0));
        assert!(matches!(result, Err(HopfieldError::InvalidConfig(_))));
    }

    #[test]
    fn test_new_rejects_empty_patterns() {
        assert!(matches!(
            Simulation::new(Vec::new(), SimulationConfig::default()),
            Err(HopfieldError::InvalidPattern(_))
        ));
    }
}
