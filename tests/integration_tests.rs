//! Integration tests for storage and recall

use hopfield_cam::prelude::*;
use hopfield_cam::utils::metrics::hamming_distance;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_pattern(n: usize, rng: &mut StdRng) -> Pattern {
    let units = (0..n).map(|_| if rng.gen_bool(0.5) { 1 } else { -1 }).collect();
    Pattern::new(units).unwrap()
}

fn random_patterns(count: usize, n: usize, seed: u64) -> Vec<Pattern> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| random_pattern(n, &mut rng)).collect()
}

/// W is symmetric with a zero diagonal for arbitrary pattern sets
#[test]
fn test_weights_symmetric_with_zero_diagonal() {
    for seed in 0..10 {
        let patterns = random_patterns(1 + seed as usize, 25, seed);
        let weights = WeightMatrix::store(&patterns).unwrap();

        for i in 0..25 {
            assert_eq!(weights.get(i, i), 0.0);
            for j in 0..25 {
                assert_eq!(weights.get(i, j), weights.get(j, i));
            }
        }
    }
}

/// One stored pattern presented unchanged is a fixed point
#[test]
fn test_single_pattern_perfect_recall() {
    let pattern = random_patterns(1, 40, 3).remove(0);
    let weights = WeightMatrix::store(&[pattern.clone()]).unwrap();
    let engine = RecallEngine::new(&weights, 10).unwrap();

    let outcome = engine.recall(&pattern, &mut RandomOrder::seeded(0)).unwrap();

    assert!(outcome.converged);
    assert_eq!(outcome.sweeps, 1);
    assert_eq!(outcome.flips, 0);
    assert_eq!(outcome.pattern, pattern);
}

/// A single flipped unit is corrected in nearly every trial
#[test]
fn test_small_noise_recovery() {
    let patterns = random_patterns(3, 100, 17);
    let weights = WeightMatrix::store(&patterns).unwrap();
    let engine = RecallEngine::new(&weights, 20).unwrap();

    let mut rng = StdRng::seed_from_u64(23);
    let mut order = RandomOrder::seeded(29);
    let trials = 100;
    let mut recovered = 0;

    for trial in 0..trials {
        let original = &patterns[trial % patterns.len()];
        let probe = flip_bits(original, 1, &mut rng).unwrap();
        let outcome = engine.recall(&probe, &mut order).unwrap();
        if outcome.converged && outcome.pattern == *original {
            recovered += 1;
        }
    }

    assert!(
        recovered >= 95,
        "recovered only {} of {} single-flip probes",
        recovered,
        trials
    );
}

/// Energy never rises, even far over capacity
#[test]
fn test_energy_monotonicity() {
    let mut rng = StdRng::seed_from_u64(5);

    for seed in 0..20 {
        // 12 patterns in 30 units is well over capacity
        let patterns = random_patterns(12, 30, 100 + seed);
        let weights = WeightMatrix::store(&patterns).unwrap();
        let engine = RecallEngine::new(&weights, 50).unwrap();

        let probe = random_pattern(30, &mut rng);
        let outcome = engine.recall(&probe, &mut RandomOrder::seeded(seed)).unwrap();

        assert!(
            outcome.energy_trace.is_non_increasing(),
            "energy rose: {:?}",
            outcome.energy_trace.values()
        );
        assert_eq!(outcome.energy_trace.len(), outcome.sweeps + 1);
        assert_eq!(
            outcome.energy_trace.last().unwrap(),
            weights.energy(&outcome.pattern).unwrap()
        );
    }
}

/// Recalling a converged state again changes nothing
#[test]
fn test_idempotence_at_convergence() {
    let patterns = random_patterns(4, 60, 8);
    let weights = WeightMatrix::store(&patterns).unwrap();
    let engine = RecallEngine::new(&weights, 100).unwrap();
    let mut rng = StdRng::seed_from_u64(9);

    for original in &patterns {
        let probe = flip_bits(original, 10, &mut rng).unwrap();
        let first = engine.recall(&probe, &mut RandomOrder::seeded(1)).unwrap();
        assert!(first.converged);

        let second = engine.recall(&first.pattern, &mut RandomOrder::seeded(2)).unwrap();
        assert!(second.converged);
        assert_eq!(second.flips, 0);
        assert_eq!(second.sweeps, 1);
        assert_eq!(second.pattern, first.pattern);
    }
}

/// A one-sweep budget on a probe that needs correcting ends unconverged
#[test]
fn test_exhaustion_is_not_an_error() {
    let pattern = random_patterns(1, 20, 4).remove(0);
    let weights = WeightMatrix::store(&[pattern.clone()]).unwrap();
    let probe = flip_bits(&pattern, 5, &mut StdRng::seed_from_u64(6)).unwrap();

    let outcome = hopfield_cam::recall(&weights, &probe, 1, &mut FixedOrder::ascending()).unwrap();

    assert!(!outcome.converged);
    assert_eq!(outcome.sweeps, 1);
    assert_eq!(outcome.flips, 5);
}

/// A probe one unit too long is rejected before any work
#[test]
fn test_dimension_mismatch() {
    let patterns = random_patterns(2, 16, 12);
    let weights = WeightMatrix::store(&patterns).unwrap();
    let before = weights.clone();

    let probe = random_patterns(1, 17, 13).remove(0);
    let err = hopfield_cam::recall(&weights, &probe, 10, &mut RandomOrder::seeded(0)).unwrap_err();

    assert_eq!(
        err,
        HopfieldError::DimensionMismatch {
            expected: 16,
            actual: 17
        }
    );
    assert_eq!(weights, before);
}

/// Non-bipolar or ragged training data never produces a matrix
#[test]
fn test_invalid_patterns_rejected() {
    assert!(matches!(
        Pattern::from_f64(&[1.0, -1.0, 0.0]),
        Err(PatternError::NonBipolar { position: 2, .. })
    ));

    let patterns = vec![
        Pattern::new(vec![1, -1, 1]).unwrap(),
        Pattern::new(vec![1, -1]).unwrap(),
    ];
    assert!(matches!(
        WeightMatrix::store(&patterns),
        Err(HopfieldError::InvalidPattern(PatternError::LengthMismatch { .. }))
    ));
}

/// The same seeds give the same trajectory
#[test]
fn test_seeded_recall_is_reproducible() {
    let patterns = random_patterns(5, 50, 21);
    let weights = WeightMatrix::store(&patterns).unwrap();
    let probe = flip_bits(&patterns[2], 12, &mut StdRng::seed_from_u64(3)).unwrap();

    let a = hopfield_cam::recall(&weights, &probe, 30, &mut RandomOrder::seeded(77)).unwrap();
    let b = hopfield_cam::recall(&weights, &probe, 30, &mut RandomOrder::seeded(77)).unwrap();
    assert_eq!(a, b);
}

/// Independent recalls can share one weight matrix across threads
#[test]
fn test_parallel_recalls_share_weights() {
    let set = PatternSet::letters().unwrap();
    let patterns = set.patterns();
    let weights = WeightMatrix::store(&patterns).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = patterns
            .iter()
            .enumerate()
            .map(|(i, pattern)| {
                let weights = &weights;
                scope.spawn(move || {
                    let engine = RecallEngine::new(weights, 10).unwrap();
                    engine
                        .recall(pattern, &mut RandomOrder::seeded(i as u64))
                        .unwrap()
                })
            })
            .collect();

        for (handle, pattern) in handles.into_iter().zip(&patterns) {
            let outcome = handle.join().unwrap();
            assert_eq!(&outcome.pattern, pattern);
        }
    });
}

/// Letters corrupted by a handful of flips come back as the stored letter
#[test]
fn test_letters_noisy_recall() {
    let set = PatternSet::letters().unwrap();
    let config = SimulationConfig::default().seed(2024).max_sweeps(20);
    let mut simulation = Simulation::new(set.patterns(), config).unwrap();

    let mut correct = 0;
    let mut total = 0;
    for _ in 0..20 {
        for result in simulation.noisy_recall(2).unwrap() {
            let original = &simulation.stored()[result.index];
            assert_eq!(hamming_distance(original, &result.probe).unwrap(), 2);
            correct += usize::from(result.attractor == Attractor::Stored(result.index));
            total += 1;
        }
    }

    assert!(correct * 10 >= total * 8, "{} of {} recalled", correct, total);
}

/// A masked block is filled back in when the rest of the pattern is intact
#[test]
fn test_masked_probe_recovery() {
    let pattern = random_patterns(1, 40, 31).remove(0);
    let weights = WeightMatrix::store(&[pattern.clone()]).unwrap();
    let probe = mask_block(&pattern, 0, 8).unwrap();

    let outcome = hopfield_cam::recall(&weights, &probe, 10, &mut FixedOrder::ascending()).unwrap();
    assert!(outcome.converged);
    assert_eq!(outcome.pattern, pattern);
}
