//! Pattern sets fed to the network
//!
//! Provides the built-in letter glyphs and JSON loading of user-defined
//! pattern sets.

pub mod letters;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HopfieldError, PatternError, Result};
use crate::hopfield::Pattern;

/// A pattern with a display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedPattern {
    pub name: String,
    pub pattern: Pattern,
}

/// Patterns to memorize, with the grid width used to display them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSet {
    /// Units per displayed row
    pub width: usize,
    pub patterns: Vec<NamedPattern>,
}

impl PatternSet {
    /// The 7x7 letters `a`, `b` and `c`
    pub fn letters() -> Result<Self> {
        Ok(Self {
            width: letters::GRID_SIZE,
            patterns: letters::alphabet()?,
        })
    }

    /// Load a pattern set from a JSON file
    ///
    /// ```json
    /// { "width": 3, "patterns": [ { "name": "x", "pattern": [1, -1, 1] } ] }
    /// ```
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            HopfieldError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Parse a pattern set from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let set: Self = serde_json::from_str(json)
            .map_err(|e| HopfieldError::InvalidConfig(format!("invalid pattern set: {}", e)))?;
        set.validate()?;
        Ok(set)
    }

    /// Check the set is non-empty, uniformly sized and has a usable width
    pub fn validate(&self) -> Result<()> {
        let first = self.patterns.first().ok_or(PatternError::EmptySet)?;
        let n = first.pattern.len();

        for (index, named) in self.patterns.iter().enumerate() {
            if named.pattern.len() != n {
                return Err(PatternError::LengthMismatch {
                    index,
                    expected: n,
                    actual: named.pattern.len(),
                }
                .into());
            }
        }

        if self.width == 0 {
            return Err(HopfieldError::InvalidConfig(
                "pattern width must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of units per pattern
    pub fn dimension(&self) -> usize {
        self.patterns.first().map_or(0, |named| named.pattern.len())
    }

    /// The patterns without their names
    pub fn patterns(&self) -> Vec<Pattern> {
        self.patterns.iter().map(|named| named.pattern.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_letters_set() {
        let set = PatternSet::letters().unwrap();
        assert_eq!(set.width, 7);
        assert_eq!(set.len(), 3);
        assert_eq!(set.dimension(), 49);
        assert!(set.validate().is_ok());
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "width": 2,
            "patterns": [
                { "name": "x", "pattern": [1, -1, -1, 1] },
                { "name": "y", "pattern": [-1, 1, 1, 1] }
            ]
        }"#;
        let set = PatternSet::from_json_str(json).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.patterns()[1].units(), &[-1, 1, 1, 1]);
    }

    #[test]
    fn test_from_json_rejects_non_bipolar() {
        let json = r#"{ "width": 2, "patterns": [ { "name": "x", "pattern": [1, 0] } ] }"#;
        assert!(matches!(
            PatternSet::from_json_str(json),
            Err(HopfieldError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_mixed_lengths() {
        let json = r#"{
            "width": 2,
            "patterns": [
                { "name": "x", "pattern": [1, -1] },
                { "name": "y", "pattern": [1, -1, 1] }
            ]
        }"#;
        assert!(matches!(
            PatternSet::from_json_str(json),
            Err(HopfieldError::InvalidPattern(PatternError::LengthMismatch { index: 1, .. }))
        ));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let set = PatternSet::letters().unwrap();
        write!(file, "{}", serde_json::to_string(&set).unwrap()).unwrap();

        let loaded = PatternSet::from_json_file(file.path()).unwrap();
        assert_eq!(loaded, set);
    }
}
