//! Difficulty presets
//!
//! Grid sizes and pair counts for the four standard tiers. Pair counts
//! always fit the grid exactly (`columns * rows == 2 * pairs`).

use std::str::FromStr;

/// Standard difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    ExtraHard,
}

/// Board dimensions and pair count for one tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub columns: usize,
    pub rows: usize,
    pub pairs: usize,
}

impl GridSpec {
    /// Swap columns and rows (for portrait-oriented displays)
    pub fn transposed(self) -> Self {
        GridSpec {
            columns: self.rows,
            rows: self.columns,
            pairs: self.pairs,
        }
    }
}

impl Difficulty {
    pub fn grid(&self) -> GridSpec {
        match self {
            Difficulty::Easy => GridSpec {
                columns: 6,
                rows: 5,
                pairs: 15,
            },
            Difficulty::Medium => GridSpec {
                columns: 8,
                rows: 5,
                pairs: 20,
            },
            Difficulty::Hard => GridSpec {
                columns: 9,
                rows: 6,
                pairs: 25,
            },
            Difficulty::ExtraHard => GridSpec {
                columns: 10,
                rows: 7,
                pairs: 35,
            },
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "extra-hard" | "extrahard" => Ok(Difficulty::ExtraHard),
            _ => Err(format!(
                "invalid difficulty '{s}' (expected: easy, medium, hard, extra-hard)"
            )),
        }
    }
}
