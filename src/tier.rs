use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative band of a 0-100 score, shared by the overall score and every sub-metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub const MEDIUM_FLOOR: u8 = 50;
    pub const HIGH_FLOOR: u8 = 80;

    pub fn of(score: u8) -> Self {
        if score >= Self::HIGH_FLOOR {
            Tier::High
        } else if score >= Self::MEDIUM_FLOOR {
            Tier::Medium
        } else {
            Tier::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Low => "low",
            Tier::Medium => "medium",
            Tier::High => "high",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
