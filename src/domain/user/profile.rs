//! UserProfile aggregate and the daily progress rules.
//!
//! The profile is created once from the questionnaire score and mutated only
//! through the methods here:
//! - checklist toggles move `points` by 10 (never below zero)
//! - completing a day needs all five checklist items and grants a streak
//!   step plus a 50 point bonus
//! - `is_premium` only ever goes from false to true
//!
//! `current_week` is not stored; it is derived from `current_day`.

use crate::domain::foundation::ValidationError;
use crate::domain::program::{ChecklistProgress, FitnessLevel, ProgramDay, ProgramLevel};

use super::AvatarColor;

/// Points for checking one checklist item (taken back when unchecked).
pub const CHECKLIST_ITEM_POINTS: u32 = 10;

/// Bonus granted when a day is completed.
pub const DAY_COMPLETION_BONUS: u32 = 50;

/// Which progress photo slot to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoSlot {
    Before,
    After,
}

/// Outcome of a checklist toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistToggle {
    /// State of the item after the toggle.
    pub checked: bool,
    /// Points total after the toggle.
    pub points: u32,
}

/// Outcome of a successful day completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCompletion {
    /// The day that was finalized.
    pub completed_day: ProgramDay,
    /// The day the user is on now (unchanged when already on day 28).
    pub current_day: ProgramDay,
    pub streak: u32,
    pub points: u32,
}

/// Raw field values for rebuilding a stored profile.
#[derive(Debug, Clone)]
pub struct ProfileParts {
    pub level: FitnessLevel,
    pub is_premium: bool,
    pub current_day: ProgramDay,
    pub streak: u32,
    pub points: u32,
    pub completed_days: Vec<ProgramDay>,
    pub checklist: ChecklistProgress,
    pub before_photo: Option<String>,
    pub after_photo: Option<String>,
    pub avatar_color: AvatarColor,
}

/// A user's program state and progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    level: FitnessLevel,
    is_premium: bool,
    current_day: ProgramDay,
    streak: u32,
    points: u32,
    completed_days: Vec<ProgramDay>,
    checklist: ChecklistProgress,
    before_photo: Option<String>,
    after_photo: Option<String>,
    avatar_color: AvatarColor,
}

impl UserProfile {
    /// Fresh profile for a just-scored user: day 1, no points, not premium.
    pub fn from_assessment(level: FitnessLevel, avatar_color: AvatarColor) -> Self {
        Self {
            level,
            is_premium: false,
            current_day: ProgramDay::FIRST,
            streak: 0,
            points: 0,
            completed_days: Vec::new(),
            checklist: ChecklistProgress::new(),
            before_photo: None,
            after_photo: None,
            avatar_color,
        }
    }

    /// Rebuilds a profile from stored values.
    ///
    /// Fails if `completed_days` lists a day twice.
    pub fn restore(parts: ProfileParts) -> Result<Self, ValidationError> {
        for (i, day) in parts.completed_days.iter().enumerate() {
            if parts.completed_days[..i].contains(day) {
                return Err(ValidationError::invalid_format(
                    "completed_days",
                    format!("day {} listed more than once", day),
                ));
            }
        }

        Ok(Self {
            level: parts.level,
            is_premium: parts.is_premium,
            current_day: parts.current_day,
            streak: parts.streak,
            points: parts.points,
            completed_days: parts.completed_days,
            checklist: parts.checklist,
            before_photo: parts.before_photo,
            after_photo: parts.after_photo,
            avatar_color: parts.avatar_color,
        })
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn level(&self) -> FitnessLevel {
        self.level
    }

    pub fn program_level(&self) -> ProgramLevel {
        self.level.program_level()
    }

    pub fn is_premium(&self) -> bool {
        self.is_premium
    }

    pub fn current_day(&self) -> ProgramDay {
        self.current_day
    }

    /// Always `ceil(current_day / 7)`, at most 4.
    pub fn current_week(&self) -> u8 {
        self.current_day.week()
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    /// Finalized days, in completion order.
    pub fn completed_days(&self) -> &[ProgramDay] {
        &self.completed_days
    }

    pub fn is_day_completed(&self, day: ProgramDay) -> bool {
        self.completed_days.contains(&day)
    }

    pub fn checklist(&self) -> &ChecklistProgress {
        &self.checklist
    }

    pub fn before_photo(&self) -> Option<&str> {
        self.before_photo.as_deref()
    }

    pub fn after_photo(&self) -> Option<&str> {
        self.after_photo.as_deref()
    }

    pub fn avatar_color(&self) -> &AvatarColor {
        &self.avatar_color
    }

    // ───────────────────────────────────────────────────────────────
    // Mutations
    // ───────────────────────────────────────────────────────────────

    /// Unlocks the program. Returns false if the profile was already premium.
    pub fn mark_premium(&mut self) -> bool {
        let changed = !self.is_premium;
        self.is_premium = true;
        changed
    }

    /// Flips one checklist item and adjusts points by 10, floored at zero.
    pub fn toggle_checklist_item(&mut self, item_id: &str) -> ChecklistToggle {
        let checked = self.checklist.toggle(item_id);
        self.points = if checked {
            self.points.saturating_add(CHECKLIST_ITEM_POINTS)
        } else {
            self.points.saturating_sub(CHECKLIST_ITEM_POINTS)
        };
        ChecklistToggle {
            checked,
            points: self.points,
        }
    }

    /// True when every fixed checklist item is checked.
    pub fn can_complete_day(&self) -> bool {
        self.checklist.all_required_checked()
    }

    /// Finalizes the current day.
    ///
    /// Returns `None` without touching anything unless all five checklist
    /// items are checked. On day 28 the day stays at 28 and the day is
    /// recorded only once, but streak and bonus are still granted.
    pub fn complete_day(&mut self) -> Option<DayCompletion> {
        if !self.can_complete_day() {
            return None;
        }

        let completed_day = self.current_day;
        if !self.completed_days.contains(&completed_day) {
            self.completed_days.push(completed_day);
        }
        self.current_day = completed_day.next();
        self.streak = self.streak.saturating_add(1);
        self.points = self.points.saturating_add(DAY_COMPLETION_BONUS);
        self.checklist.clear();

        Some(DayCompletion {
            completed_day,
            current_day: self.current_day,
            streak: self.streak,
            points: self.points,
        })
    }

    /// Sets or clears a progress photo (an encoded image string).
    pub fn set_photo(&mut self, slot: PhotoSlot, photo: Option<String>) {
        match slot {
            PhotoSlot::Before => self.before_photo = photo,
            PhotoSlot::After => self.after_photo = photo,
        }
    }
}
