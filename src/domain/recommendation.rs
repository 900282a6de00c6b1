//! Score to recommendation mapping.

use std::fmt;

use crate::domain::score::Score;

pub const STRONG_THRESHOLD: u8 = 75;
pub const WATCH_THRESHOLD: u8 = 55;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recommendation {
    Strong,
    Watch,
    HoldBack,
}

impl Recommendation {
    pub fn from_score(score: Score) -> Self {
        match score.value() {
            s if s >= STRONG_THRESHOLD => Recommendation::Strong,
            s if s >= WATCH_THRESHOLD => Recommendation::Watch,
            _ => Recommendation::HoldBack,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Recommendation::Strong => "AL",
            Recommendation::Watch => "TAKİP",
            Recommendation::HoldBack => "BEKLE",
        }
    }

    /// Display class used by presentation layers to style the label.
    pub fn class(self) -> &'static str {
        match self {
            Recommendation::Strong => "al",
            Recommendation::Watch => "bekle",
            Recommendation::HoldBack => "sat",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
