//! Bipolar patterns
//!
//! A [`Pattern`] is an immutable vector of `-1`/`+1` units. Every constructor
//! validates its input, so any `Pattern` in hand is known to be bipolar and
//! non-empty.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::PatternError;

/// Glyph used for a `+1` unit when rendering or parsing grids
pub const ON_GLYPH: char = '#';
/// Glyph used for a `-1` unit when rendering or parsing grids
pub const OFF_GLYPH: char = '.';

/// Fixed-length bipolar pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i8>", into = "Vec<i8>")]
pub struct Pattern {
    units: Vec<i8>,
}

impl Pattern {
    /// Create a pattern from `-1`/`+1` values
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hopfield_cam::Pattern;
    ///
    /// let p = Pattern::new(vec![1, -1, 1]).unwrap();
    /// assert_eq!(p.len(), 3);
    /// assert!(Pattern::new(vec![1, 0, 1]).is_err());
    /// ```
    pub fn new(units: Vec<i8>) -> Result<Self, PatternError> {
        if units.is_empty() {
            return Err(PatternError::EmptyPattern);
        }
        if let Some((position, &value)) = units
            .iter()
            .enumerate()
            .find(|&(_, &v)| v != 1 && v != -1)
        {
            return Err(PatternError::NonBipolar {
                position,
                value: value as f64,
            });
        }
        Ok(Self { units })
    }

    /// Create a pattern from real values that must be exactly `-1.0` or `+1.0`
    pub fn from_f64(values: &[f64]) -> Result<Self, PatternError> {
        if values.is_empty() {
            return Err(PatternError::EmptyPattern);
        }
        let mut units = Vec::with_capacity(values.len());
        for (position, &value) in values.iter().enumerate() {
            if value == 1.0 {
                units.push(1);
            } else if value == -1.0 {
                units.push(-1);
            } else {
                return Err(PatternError::NonBipolar { position, value });
            }
        }
        Ok(Self { units })
    }

    /// Parse a text grid where `#` is `+1` and `.` is `-1`
    ///
    /// Blank lines and surrounding whitespace are ignored; rows are
    /// concatenated in reading order. All rows must have the same width.
    pub fn from_grid(grid: &str) -> Result<Self, PatternError> {
        let mut units = Vec::new();
        let mut width = None;

        for (row, line) in grid
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
        {
            let row_width = line.chars().count();
            match width {
                None => width = Some(row_width),
                Some(expected) if expected != row_width => {
                    return Err(PatternError::RaggedGrid {
                        row,
                        expected,
                        actual: row_width,
                    });
                }
                Some(_) => {}
            }

            for glyph in line.chars() {
                units.push(match glyph {
                    ON_GLYPH => 1,
                    OFF_GLYPH => -1,
                    other => return Err(PatternError::InvalidGlyph(other)),
                });
            }
        }

        Self::new(units)
    }

    /// Build a pattern from a network state, mapping `x >= 0` to `+1`
    pub(crate) fn from_state(state: &Array1<f64>) -> Self {
        Self {
            units: state.iter().map(|&x| if x >= 0.0 { 1 } else { -1 }).collect(),
        }
    }

    /// Build a pattern from units already known to be bipolar
    pub(crate) fn from_units_unchecked(units: Vec<i8>) -> Self {
        debug_assert!(!units.is_empty() && units.iter().all(|&u| u == 1 || u == -1));
        Self { units }
    }

    /// Number of units
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Always false: a pattern has at least one unit
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Unit values
    pub fn units(&self) -> &[i8] {
        &self.units
    }

    /// Value of unit `index`, if in range
    pub fn get(&self, index: usize) -> Option<i8> {
        self.units.get(index).copied()
    }

    /// The pattern with every unit flipped
    pub fn negated(&self) -> Self {
        Self {
            units: self.units.iter().map(|&u| -u).collect(),
        }
    }

    /// Units as a real-valued vector, used for matrix arithmetic
    pub fn to_array(&self) -> Array1<f64> {
        self.units.iter().map(|&u| u as f64).collect()
    }

    /// Render as a text grid with `width` units per row
    pub fn to_grid_string(&self, width: usize) -> String {
        let width = width.max(1);
        self.units
            .chunks(width)
            .map(|row| {
                row.iter()
                    .map(|&u| if u > 0 { ON_GLYPH } else { OFF_GLYPH })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TryFrom<Vec<i8>> for Pattern {
    type Error = PatternError;

    fn try_from(units: Vec<i8>) -> Result<Self, Self::Error> {
        Self::new(units)
    }
}

impl From<Pattern> for Vec<i8> {
    fn from(pattern: Pattern) -> Self {
        pattern.units
    }
}
