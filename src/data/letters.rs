//! Built-in 7x7 letter glyphs
//!
//! Three lower-case letters drawn on a 7x7 grid (49 units). Three patterns
//! are well below the 0.15 * 49 capacity of a 49-unit network.

use super::NamedPattern;
use crate::error::PatternError;
use crate::hopfield::Pattern;

/// Width and height of every glyph
pub const GRID_SIZE: usize = 7;

const LETTER_A: &str = "
    .......
    .......
    .####..
    ....##.
    .#####.
    #...##.
    .###.##
";

const LETTER_B: &str = "
    ###....
    .##....
    .##....
    .#####.
    .##...#
    .##...#
    ##.###.
";

const LETTER_C: &str = "
    .......
    .......
    .####..
    ##..##.
    ##.....
    ##..##.
    .####..
";

/// The letters `a`, `b` and `c`
pub fn alphabet() -> Result<Vec<NamedPattern>, PatternError> {
    [("a", LETTER_A), ("b", LETTER_B), ("c", LETTER_C)]
        .into_iter()
        .map(|(name, grid)| {
            Ok(NamedPattern {
                name: name.to_string(),
                pattern: Pattern::from_grid(grid)?,
            })
        })
        .collect()
}
