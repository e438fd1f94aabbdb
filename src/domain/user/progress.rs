//! Read-only dashboard views derived from a profile.

use crate::domain::program::{ProgramDay, DAYS_PER_WEEK, PROGRAM_DAYS, PROGRAM_WEEKS};

use super::UserProfile;

/// How a calendar cell is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    /// Finalized.
    Completed,
    /// The day the user is on.
    Current,
    /// Not reached yet.
    Upcoming,
    /// Before the current day but never finalized.
    Past,
}

/// Status of `day` for this profile. Completion wins over being current.
pub fn day_status(profile: &UserProfile, day: ProgramDay) -> DayStatus {
    if profile.is_day_completed(day) {
        DayStatus::Completed
    } else if day == profile.current_day() {
        DayStatus::Current
    } else if day > profile.current_day() {
        DayStatus::Upcoming
    } else {
        DayStatus::Past
    }
}

/// Aggregate numbers shown on the progress tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSummary {
    pub current_day: ProgramDay,
    pub current_week: u8,
    pub streak: u32,
    pub points: u32,
    /// Completed days per week (days 1-7, 8-14, 15-21, 22-28).
    pub completed_per_week: [u8; PROGRAM_WEEKS as usize],
    /// Share of the current week already completed, 0-100.
    pub week_progress_percent: u8,
    /// Share of the whole program completed, 0-100.
    pub total_progress_percent: u8,
}

impl ProgressSummary {
    pub fn from_profile(profile: &UserProfile) -> Self {
        let mut completed_per_week = [0u8; PROGRAM_WEEKS as usize];
        for day in profile.completed_days() {
            completed_per_week[day.week() as usize - 1] += 1;
        }

        let current_week = profile.current_week();
        let this_week = completed_per_week[current_week as usize - 1];
        let total = profile.completed_days().len();

        Self {
            current_day: profile.current_day(),
            current_week,
            streak: profile.streak(),
            points: profile.points(),
            completed_per_week,
            week_progress_percent: percent(this_week as usize, DAYS_PER_WEEK as usize),
            total_progress_percent: percent(total, PROGRAM_DAYS as usize),
        }
    }
}

/// Four rows of seven statuses, one row per program week.
pub fn calendar(profile: &UserProfile) -> Vec<Vec<(ProgramDay, DayStatus)>> {
    let days: Vec<(ProgramDay, DayStatus)> = ProgramDay::all()
        .map(|day| (day, day_status(profile, day)))
        .collect();
    days.chunks(DAYS_PER_WEEK as usize)
        .map(|week| week.to_vec())
        .collect()
}

fn percent(part: usize, whole: usize) -> u8 {
    (part.min(whole) * 100 / whole) as u8
}
