//! User module - the per-user program profile.
//!
//! # Module Organization
//!
//! - `profile` - `UserProfile` aggregate with checklist and day-completion rules
//! - `avatar` - avatar color value object
//! - `progress` - derived dashboard views (summary, calendar)

mod avatar;
mod profile;
mod progress;

pub use avatar::AvatarColor;
pub use profile::{
    ChecklistToggle, DayCompletion, PhotoSlot, ProfileParts, UserProfile, CHECKLIST_ITEM_POINTS,
    DAY_COMPLETION_BONUS,
};
pub use progress::{calendar, day_status, DayStatus, ProgressSummary};
