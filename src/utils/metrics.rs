//! Recall quality measures

use serde::{Deserialize, Serialize};

use crate::error::{HopfieldError, Result};
use crate::hopfield::Pattern;

fn check_same_length(a: &Pattern, b: &Pattern) -> Result<()> {
    if a.len() != b.len() {
        return Err(HopfieldError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(())
}

/// Number of positions where the patterns differ
pub fn hamming_distance(a: &Pattern, b: &Pattern) -> Result<usize> {
    check_same_length(a, b)?;
    Ok(a.units()
        .iter()
        .zip(b.units())
        .filter(|(x, y)| x != y)
        .count())
}

/// Squared error Σ (a_i - b_i)^2
///
/// Each differing unit contributes 4, so the error is zero exactly when the
/// patterns are identical.
pub fn squared_error(original: &Pattern, recalled: &Pattern) -> Result<f64> {
    Ok(4.0 * hamming_distance(original, recalled)? as f64)
}

/// Overlap m = (1/N) Σ a_i b_i, in [-1, 1]
pub fn overlap(a: &Pattern, b: &Pattern) -> Result<f64> {
    check_same_length(a, b)?;
    let dot: i64 = a
        .units()
        .iter()
        .zip(b.units())
        .map(|(&x, &y)| (x as i64) * (y as i64))
        .sum();
    Ok(dot as f64 / a.len() as f64)
}

/// What kind of attractor a recalled state is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum Attractor {
    /// Equal to the stored pattern at this index
    Stored(usize),
    /// Equal to the negation of the stored pattern at this index
    Inverted(usize),
    /// Not a stored pattern nor its negation
    Spurious,
}

/// Match `state` against the stored patterns
pub fn classify_attractor(stored: &[Pattern], state: &Pattern) -> Result<Attractor> {
    for (index, pattern) in stored.iter().enumerate() {
        match hamming_distance(pattern, state)? {
            0 => return Ok(Attractor::Stored(index)),
            d if d == pattern.len() => return Ok(Attractor::Inverted(index)),
            _ => {}
        }
    }
    Ok(Attractor::Spurious)
}
