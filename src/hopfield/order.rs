//! Unit visiting order for asynchronous updates
//!
//! One sweep visits every unit exactly once. The order is supplied by an
//! [`UpdateOrder`] strategy owned by the caller, so a recall can be made
//! reproducible by choosing a seeded or fixed order.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{HopfieldError, Result};

/// Strategy producing the visiting order of each sweep
pub trait UpdateOrder {
    /// Write the order of the next sweep into `order`
    ///
    /// `order` has one slot per unit; on return it must hold a permutation
    /// of `0..order.len()`.
    fn next_sweep(&mut self, order: &mut [usize]);

    /// Reject a network size the strategy cannot serve
    fn check_dimension(&self, _dimension: usize) -> Result<()> {
        Ok(())
    }
}

impl<O: UpdateOrder + ?Sized> UpdateOrder for Box<O> {
    fn next_sweep(&mut self, order: &mut [usize]) {
        (**self).next_sweep(order)
    }

    fn check_dimension(&self, dimension: usize) -> Result<()> {
        (**self).check_dimension(dimension)
    }
}

/// Verify that `order` is a permutation of `0..order.len()`
///
/// `seen` is scratch space of the same length; it is cleared before use so
/// one buffer can be reused across sweeps.
pub(crate) fn check_permutation(order: &[usize], seen: &mut [bool]) -> Result<()> {
    seen.fill(false);
    for &index in order {
        match seen.get_mut(index) {
            Some(slot) if !*slot => *slot = true,
            _ => {
                return Err(HopfieldError::InvalidConfig(format!(
                    "update order is not a permutation of 0..{}",
                    order.len()
                )))
            }
        }
    }
    Ok(())
}

/// Fresh uniformly random permutation for every sweep
#[derive(Debug, Clone)]
pub struct RandomOrder {
    rng: StdRng,
}

impl RandomOrder {
    /// Reproducible order driven by `seed`
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Order seeded from operating system entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Use an existing generator
    pub fn from_rng(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl UpdateOrder for RandomOrder {
    fn next_sweep(&mut self, order: &mut [usize]) {
        for (slot, index) in order.iter_mut().enumerate() {
            *index = slot;
        }
        order.shuffle(&mut self.rng);
    }
}

/// The same order for every sweep
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FixedOrder {
    /// Explicit permutation; `None` visits units in ascending index order
    sequence: Option<Vec<usize>>,
}

impl FixedOrder {
    /// Visit units `0, 1, ..., N-1`
    pub fn ascending() -> Self {
        Self { sequence: None }
    }

    /// Visit units in the given order
    ///
    /// # Errors
    ///
    /// Returns `HopfieldError::InvalidConfig` unless `sequence` is a
    /// permutation of `0..sequence.len()`.
    pub fn sequence(sequence: Vec<usize>) -> Result<Self> {
        check_permutation(&sequence, &mut vec![false; sequence.len()])?;
        Ok(Self {
            sequence: Some(sequence),
        })
    }
}

impl UpdateOrder for FixedOrder {
    fn next_sweep(&mut self, order: &mut [usize]) {
        match &self.sequence {
            Some(sequence) => order.copy_from_slice(sequence),
            None => {
                for (slot, index) in order.iter_mut().enumerate() {
                    *index = slot;
                }
            }
        }
    }

    fn check_dimension(&self, dimension: usize) -> Result<()> {
        match &self.sequence {
            Some(sequence) if sequence.len() != dimension => Err(HopfieldError::DimensionMismatch {
                expected: dimension,
                actual: sequence.len(),
            }),
            _ => Ok(()),
        }
    }
}

/// Serializable choice of update order, as found in configuration files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpdateOrderPolicy {
    /// Random permutation per sweep; seeded when `seed` is set
    Random {
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Ascending index order every sweep
    Fixed,
}

impl Default for UpdateOrderPolicy {
    fn default() -> Self {
        Self::Random { seed: None }
    }
}

impl UpdateOrderPolicy {
    /// Instantiate the strategy described by this policy
    pub fn build(&self) -> Box<dyn UpdateOrder + Send> {
        match self {
            Self::Random { seed: Some(seed) } => Box::new(RandomOrder::seeded(*seed)),
            Self::Random { seed: None } => Box::new(RandomOrder::from_entropy()),
            Self::Fixed => Box::new(FixedOrder::ascending()),
        }
    }
}
