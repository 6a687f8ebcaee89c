//! Asynchronous recall
//!
//! Starting from a probe, units are updated one at a time with the signum
//! of their local field until a whole sweep leaves the state unchanged or
//! the sweep budget runs out.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::order::{check_permutation, UpdateOrder};
use super::pattern::Pattern;
use super::storage::WeightMatrix;
use crate::error::{HopfieldError, Result};

/// Signum activation with zero mapped to `+1`
#[inline]
pub fn signum(local_field: f64) -> f64 {
    if local_field >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Network energy E = -1/2 * s^T W s
pub fn energy(weights: &WeightMatrix, state: &Array1<f64>) -> f64 {
    -0.5 * state.dot(&weights.as_array().dot(state))
}

impl WeightMatrix {
    /// Energy of `pattern` under these weights
    pub fn energy(&self, pattern: &Pattern) -> Result<f64> {
        if pattern.len() != self.dimension() {
            return Err(HopfieldError::DimensionMismatch {
                expected: self.dimension(),
                actual: pattern.len(),
            });
        }
        Ok(energy(self, &pattern.to_array()))
    }
}

/// Energy values recorded during one recall
///
/// The first value is the energy of the probe; one value follows per
/// completed sweep.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnergyTrace {
    values: Vec<f64>,
}

impl EnergyTrace {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    /// All recorded values in order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Energy of the probe
    pub fn initial(&self) -> Option<f64> {
        self.values.first().copied()
    }

    /// Energy of the final state
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// True if no recorded value exceeds its predecessor
    pub fn is_non_increasing(&self) -> bool {
        self.values.windows(2).all(|w| w[1] <= w[0])
    }
}

/// Result of a recall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecallOutcome {
    /// Final network state
    pub pattern: Pattern,
    /// Energy of the probe followed by the energy after each sweep
    pub energy_trace: EnergyTrace,
    /// Whether the last sweep left the state unchanged
    pub converged: bool,
    /// Number of sweeps performed
    pub sweeps: usize,
    /// Total number of unit flips over all sweeps
    pub flips: usize,
}

/// Runs asynchronous recall against a fixed weight matrix
///
/// # Examples
///
/// ```rust
/// use hopfield_cam::{FixedOrder, Pattern, RecallEngine, WeightMatrix};
///
/// let stored = Pattern::new(vec![1, -1, 1, -1, 1, -1]).unwrap();
/// let weights = WeightMatrix::store(&[stored.clone()]).unwrap();
///
/// let probe = Pattern::new(vec![-1, -1, 1, -1, 1, -1]).unwrap();
/// let engine = RecallEngine::new(&weights, 10).unwrap();
/// let outcome = engine.recall(&probe, &mut FixedOrder::ascending()).unwrap();
///
/// assert!(outcome.converged);
/// assert_eq!(outcome.pattern, stored);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RecallEngine<'w> {
    weights: &'w WeightMatrix,
    max_sweeps: usize,
}

impl<'w> RecallEngine<'w> {
    /// Create an engine allowing at most `max_sweeps` sweeps per recall
    ///
    /// # Errors
    ///
    /// Returns `HopfieldError::InvalidConfig` if `max_sweeps` is zero.
    pub fn new(weights: &'w WeightMatrix, max_sweeps: usize) -> Result<Self> {
        if max_sweeps == 0 {
            return Err(HopfieldError::InvalidConfig(
                "max_sweeps must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            weights,
            max_sweeps,
        })
    }

    pub fn weights(&self) -> &'w WeightMatrix {
        self.weights
    }

    pub fn max_sweeps(&self) -> usize {
        self.max_sweeps
    }

    /// Relax `probe` to an attractor
    ///
    /// Each sweep visits every unit once in the order produced by `order`.
    /// A unit takes the sign of its local field h_i = Σ_j W_ij s_j, reading
    /// the values already updated earlier in the same sweep.
    ///
    /// Running out of sweeps is not an error; it is reported through
    /// `converged == false`.
    ///
    /// # Errors
    ///
    /// Returns `HopfieldError::DimensionMismatch` if the probe (or a fixed
    /// update sequence) does not match the network dimension. Nothing is
    /// computed in that case.
    ///
    /// Returns `HopfieldError::InvalidConfig` if `order` produces a sweep
    /// that is not a permutation of the units.
    pub fn recall<O>(&self, probe: &Pattern, order: &mut O) -> Result<RecallOutcome>
    where
        O: UpdateOrder + ?Sized,
    {
        let n = self.weights.dimension();
        if probe.len() != n {
            return Err(HopfieldError::DimensionMismatch {
                expected: n,
                actual: probe.len(),
            });
        }
        order.check_dimension(n)?;

        let mut state = probe.to_array();
        let mut trace = EnergyTrace::with_capacity(self.max_sweeps + 1);
        trace.push(energy(self.weights, &state));

        let mut visit = vec![0usize; n];
        let mut seen = vec![false; n];
        let mut sweeps = 0;
        let mut flips = 0;
        let mut converged = false;

        while sweeps < self.max_sweeps {
            order.next_sweep(&mut visit);
            check_permutation(&visit, &mut seen)?;

            let mut changed = 0;
            for &i in &visit {
                let local_field = self.weights.row(i).dot(&state);
                let next = signum(local_field);
                if next != state[i] {
                    state[i] = next;
                    changed += 1;
                }
            }

            sweeps += 1;
            flips += changed;
            trace.push(energy(self.weights, &state));
            log::trace!("sweep {}: {} units changed", sweeps, changed);

            if changed == 0 {
                converged = true;
                break;
            }
        }

        log::debug!(
            "Recall finished after {} sweeps ({} flips, converged: {})",
            sweeps,
            flips,
            converged
        );

        Ok(RecallOutcome {
            pattern: Pattern::from_state(&state),
            energy_trace: trace,
            converged,
            sweeps,
            flips,
        })
    }
}

/// One-call recall: relax `probe` against `weights` for at most `max_sweeps`
pub fn recall<O>(
    weights: &WeightMatrix,
    probe: &Pattern,
    max_sweeps: usize,
    order: &mut O,
) -> Result<RecallOutcome>
where
    O: UpdateOrder + ?Sized,
{
    RecallEngine::new(weights, max_sweeps)?.recall(probe, order)
}
