//! Fitness level scoring.
//!
//! The questionnaire average decides which of the three program tracks the
//! user follows. Boundaries are inclusive on the lower tier:
//! `avg <= 1.5` beginner, `avg <= 2.5` intermediate, above that advanced.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::QuestionnaireAnswers;
use crate::domain::foundation::ValidationError;

/// Fitness level assigned from the intake questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    /// Program track for this level; the mapping is one-to-one.
    pub fn program_level(&self) -> ProgramLevel {
        match self {
            FitnessLevel::Beginner => ProgramLevel(1),
            FitnessLevel::Intermediate => ProgramLevel(2),
            FitnessLevel::Advanced => ProgramLevel(3),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "beginner",
            FitnessLevel::Intermediate => "intermediate",
            FitnessLevel::Advanced => "advanced",
        }
    }
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FitnessLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(FitnessLevel::Beginner),
            "intermediate" => Ok(FitnessLevel::Intermediate),
            "advanced" => Ok(FitnessLevel::Advanced),
            other => Err(ValidationError::invalid_format(
                "level",
                format!("unknown level '{}'", other),
            )),
        }
    }
}

/// Program track number, 1 to 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ProgramLevel(u8);

impl ProgramLevel {
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if !(1..=3).contains(&value) {
            return Err(ValidationError::out_of_range("program_level", 1, 3, value as i64));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

}

impl TryFrom<u8> for ProgramLevel {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProgramLevel> for u8 {
    fn from(level: ProgramLevel) -> Self {
        level.0
    }
}

impl fmt::Display for ProgramLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scores a completed questionnaire.
///
/// Compares `2 * sum` against `3 * n` and `5 * n` so the 1.5 and 2.5
/// boundaries are exact.
pub fn compute_level(answers: &QuestionnaireAnswers) -> (FitnessLevel, ProgramLevel) {
    let level = level_for_total(answers.total(), answers.len() as u32);
    (level, level.program_level())
}

fn level_for_total(total: u32, count: u32) -> FitnessLevel {
    let doubled = total * 2;
    if doubled <= count * 3 {
        FitnessLevel::Beginner
    } else if doubled <= count * 5 {
        FitnessLevel::Intermediate
    } else {
        FitnessLevel::Advanced
    }
}
