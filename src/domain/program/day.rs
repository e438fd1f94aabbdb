//! Program calendar: 28 days grouped in 4 weeks of 7.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Length of the program in days.
pub const PROGRAM_DAYS: u8 = 28;

/// Days per program week.
pub const DAYS_PER_WEEK: u8 = 7;

/// Number of weeks in the program.
pub const PROGRAM_WEEKS: u8 = 4;

/// A day of the program, always within `1..=28`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ProgramDay(u8);

impl ProgramDay {
    /// Day one of the program.
    pub const FIRST: ProgramDay = ProgramDay(1);

    /// Last day of the program.
    pub const LAST: ProgramDay = ProgramDay(PROGRAM_DAYS);

    pub fn new(day: u8) -> Result<Self, ValidationError> {
        if !(1..=PROGRAM_DAYS).contains(&day) {
            return Err(ValidationError::out_of_range(
                "day",
                1,
                PROGRAM_DAYS as i64,
                day as i64,
            ));
        }
        Ok(Self(day))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Week this day belongs to: `ceil(day / 7)`, at most 4.
    pub fn week(&self) -> u8 {
        self.0.div_ceil(DAYS_PER_WEEK).min(PROGRAM_WEEKS)
    }

    /// The following day, clamped at the last program day.
    pub fn next(&self) -> ProgramDay {
        ProgramDay((self.0 + 1).min(PROGRAM_DAYS))
    }

    /// Iterates every program day in order.
    pub fn all() -> impl Iterator<Item = ProgramDay> {
        (1..=PROGRAM_DAYS).map(ProgramDay)
    }
}

impl Default for ProgramDay {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u8> for ProgramDay {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProgramDay> for u8 {
    fn from(day: ProgramDay) -> Self {
        day.0
    }
}

impl fmt::Display for ProgramDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
