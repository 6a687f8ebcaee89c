//! Corruption models for building probes
//!
//! The generator is always passed in, so probes are reproducible under a
//! seeded `StdRng`.

use rand::seq::index;
use rand::Rng;

use crate::error::{HopfieldError, Result};
use crate::hopfield::Pattern;

/// Flip exactly `count` distinct units chosen uniformly at random
///
/// # Errors
///
/// Returns `HopfieldError::DimensionMismatch` if `count` exceeds the
/// pattern length.
///
/// # Examples
///
/// ```rust
/// use hopfield_cam::utils::noise::flip_bits;
/// use hopfield_cam::utils::metrics::hamming_distance;
/// use hopfield_cam::Pattern;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let p = Pattern::new(vec![1; 20]).unwrap();
/// let noisy = flip_bits(&p, 5, &mut rng).unwrap();
/// assert_eq!(hamming_distance(&p, &noisy).unwrap(), 5);
/// ```
pub fn flip_bits<R: Rng + ?Sized>(pattern: &Pattern, count: usize, rng: &mut R) -> Result<Pattern> {
    let n = pattern.len();
    if count > n {
        return Err(HopfieldError::DimensionMismatch {
            expected: n,
            actual: count,
        });
    }

    let mut units = pattern.units().to_vec();
    for position in index::sample(rng, n, count) {
        units[position] = -units[position];
    }
    Ok(Pattern::from_units_unchecked(units))
}

/// Overwrite `len` consecutive units starting at `start` with `-1`
///
/// # Errors
///
/// Returns `HopfieldError::DimensionMismatch` if the block does not fit
/// inside the pattern.
pub fn mask_block(pattern: &Pattern, start: usize, len: usize) -> Result<Pattern> {
    let n = pattern.len();
    let end = start.checked_add(len).filter(|&end| end <= n).ok_or(
        HopfieldError::DimensionMismatch {
            expected: n,
            actual: start.saturating_add(len),
        },
    )?;

    let mut units = pattern.units().to_vec();
    units[start..end].fill(-1);
    Ok(Pattern::from_units_unchecked(units))
}
