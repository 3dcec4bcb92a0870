//! Four-level ordinal severity taxonomy for symptom frequency.
//!
//! The levels only exist here to be written into the instructions. Nothing in
//! the crate classifies answers; the model does.

use serde::{Deserialize, Serialize};

/// Symptom frequency over the recall window, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Never,
    SeveralDays,
    MoreThanHalfTheDays,
    NearlyEveryDay,
}

impl SeverityLevel {
    /// All levels in ordinal order.
    pub const ALL: [SeverityLevel; 4] = [
        SeverityLevel::Never,
        SeverityLevel::SeveralDays,
        SeverityLevel::MoreThanHalfTheDays,
        SeverityLevel::NearlyEveryDay,
    ];

    /// Label the model is told to use.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Never => "NUNCA",
            Self::SeveralDays => "VARIOS DIAS",
            Self::MoreThanHalfTheDays => "MÁS DE LA MITAD DE LOS DÍAS",
            Self::NearlyEveryDay => "CASI TODOS LOS DÍAS",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Never => "La persona nunca ha experimentado el síntoma",
            Self::SeveralDays => {
                "La persona ha experimentado el síntoma algunos días, pero menos de 7 días"
            }
            Self::MoreThanHalfTheDays => {
                "La persona ha experimentado el síntoma más de 7 días"
            }
            Self::NearlyEveryDay => {
                "La persona ha experimentado el síntoma siempre o casi siempre"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_by_frequency() {
        let mut sorted = SeverityLevel::ALL;
        sorted.sort();
        assert_eq!(sorted, SeverityLevel::ALL);
        assert!(SeverityLevel::Never < SeverityLevel::NearlyEveryDay);
    }

    #[test]
    fn every_level_has_name_and_description() {
        for level in SeverityLevel::ALL {
            assert!(!level.name().is_empty());
            assert!(level.description().starts_with("La persona"));
        }
    }
}
