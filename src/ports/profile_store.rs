//! Profile store port: the hosted database seen from the client.
//!
//! `ProfileRecord` is the flattened snake_case row stored in
//! `user_profiles`. It mirrors `UserProfile` field for field and also
//! carries the redundant `program_level` / `current_week` columns and a
//! server-side `updated_at`.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::foundation::{Timestamp, UserId, ValidationError};
use crate::domain::program::{
    ChecklistProgress, FitnessLevel, ProgramDay, ProgramLevel, QuestionnaireAnswers,
};
use crate::domain::user::{AvatarColor, ProfileParts, UserProfile};

/// Row in `user_profiles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub user_id: UserId,
    pub level: FitnessLevel,
    pub program_level: u8,
    pub is_premium: bool,
    pub current_day: u8,
    pub current_week: u8,
    pub streak: u32,
    pub points: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed_days: Vec<u8>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub checklist_progress: BTreeMap<String, bool>,
    #[serde(default)]
    pub before_photo: Option<String>,
    #[serde(default)]
    pub after_photo: Option<String>,
    pub avatar_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl ProfileRecord {
    /// Flattens a profile into a row, stamped with `updated_at`.
    pub fn from_profile(user_id: &UserId, profile: &UserProfile, updated_at: Timestamp) -> Self {
        Self {
            user_id: user_id.clone(),
            level: profile.level(),
            program_level: profile.program_level().value(),
            is_premium: profile.is_premium(),
            current_day: profile.current_day().value(),
            current_week: profile.current_week(),
            streak: profile.streak(),
            points: profile.points(),
            completed_days: profile.completed_days().iter().map(|d| d.value()).collect(),
            checklist_progress: profile.checklist().as_map().clone(),
            before_photo: profile.before_photo().map(str::to_string),
            after_photo: profile.after_photo().map(str::to_string),
            avatar_color: profile.avatar_color().as_str().to_string(),
            updated_at: Some(updated_at),
        }
    }

    /// Rebuilds the in-memory profile.
    ///
    /// `program_level` must agree with `level`. `current_week` is re-derived
    /// from `current_day`; a stale stored value is only logged.
    pub fn into_profile(self) -> Result<UserProfile, ValidationError> {
        let program_level = ProgramLevel::new(self.program_level)?;
        if program_level != self.level.program_level() {
            return Err(ValidationError::invalid_format(
                "program_level",
                format!(
                    "program level {} does not match level {}",
                    program_level, self.level
                ),
            ));
        }

        let current_day = ProgramDay::new(self.current_day)?;
        if current_day.week() != self.current_week {
            tracing::warn!(
                user_id = %self.user_id,
                stored_week = self.current_week,
                derived_week = current_day.week(),
                "Stored current_week disagrees with current_day; using derived value"
            );
        }

        let completed_days = self
            .completed_days
            .iter()
            .map(|day| ProgramDay::new(*day))
            .collect::<Result<Vec<_>, _>>()?;

        UserProfile::restore(ProfileParts {
            level: self.level,
            is_premium: self.is_premium,
            current_day,
            streak: self.streak,
            points: self.points,
            completed_days,
            checklist: ChecklistProgress::from(self.checklist_progress),
            before_photo: self.before_photo,
            after_photo: self.after_photo,
            avatar_color: AvatarColor::new(self.avatar_color)?,
        })
    }
}

/// Row in `questionnaire_answers`, kept as an audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireRecord {
    pub user_id: UserId,
    pub answers: QuestionnaireAnswers,
}

/// Profile store failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Profile store unavailable: {0}")]
    Unavailable(String),

    #[error("Profile store rejected the request: {0}")]
    Rejected(String),

    #[error("Stored profile is invalid: {0}")]
    Corrupt(#[from] ValidationError),
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }
}

/// Database backend for profiles.
///
/// Writes are last-write-wins; the store does no merging.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Loads the profile row for a user, `None` if the user has none yet.
    async fn fetch_profile(&self, user_id: &UserId) -> Result<Option<ProfileRecord>, StoreError>;

    /// Inserts or replaces the row keyed by `record.user_id`.
    async fn upsert_profile(&self, record: &ProfileRecord) -> Result<(), StoreError>;

    /// Appends a questionnaire audit row.
    async fn insert_questionnaire_record(
        &self,
        record: &QuestionnaireRecord,
    ) -> Result<(), StoreError>;
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::program::ChecklistItem;
    use crate::domain::user::PhotoSlot;
    use serde_json::json;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn busy_profile() -> UserProfile {
        let mut profile =
            UserProfile::from_assessment(FitnessLevel::Advanced, AvatarColor::from_hue(42));
        profile.mark_premium();
        for _ in 0..8 {
            for item in ChecklistItem::ALL {
                profile.toggle_checklist_item(item.id());
            }
            profile.complete_day();
        }
        profile.toggle_checklist_item("breathing");
        profile.set_photo(PhotoSlot::Before, Some("data:image/jpeg;base64,/9j/".into()));
        profile
    }

    #[test]
    fn record_round_trip_preserves_profile() {
        let profile = busy_profile();
        let record = ProfileRecord::from_profile(&user(), &profile, Timestamp::now());

        assert_eq!(record.program_level, 3);
        assert_eq!(record.current_day, 9);
        assert_eq!(record.current_week, 2);

        assert_eq!(record.into_profile().unwrap(), profile);
    }

    #[test]
    fn record_survives_json_round_trip() {
        let profile = busy_profile();
        let record = ProfileRecord::from_profile(&user(), &profile, Timestamp::now());

        let json = serde_json::to_string(&record).unwrap();
        let back: ProfileRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(back, record);
        assert_eq!(back.into_profile().unwrap(), profile);
    }

    #[test]
    fn record_uses_snake_case_columns() {
        let record = ProfileRecord::from_profile(&user(), &busy_profile(), Timestamp::now());
        let value = serde_json::to_value(&record).unwrap();
        for column in [
            "user_id",
            "program_level",
            "is_premium",
            "current_day",
            "current_week",
            "completed_days",
            "checklist_progress",
            "before_photo",
            "after_photo",
            "avatar_color",
            "updated_at",
        ] {
            assert!(value.get(column).is_some(), "missing column {}", column);
        }
        assert_eq!(value["level"], "advanced");
    }

    #[test]
    fn null_collections_load_as_empty() {
        let row = json!({
            "user_id": "user-1",
            "level": "beginner",
            "program_level": 1,
            "is_premium": false,
            "current_day": 1,
            "current_week": 1,
            "streak": 0,
            "points": 0,
            "completed_days": null,
            "checklist_progress": null,
            "before_photo": null,
            "avatar_color": "hsl(1, 70%, 80%)",
            "updated_at": "2025-03-01T12:00:00Z"
        });
        let record: ProfileRecord = serde_json::from_value(row).unwrap();
        let profile = record.into_profile().unwrap();
        assert!(profile.completed_days().is_empty());
        assert!(profile.checklist().is_empty());
        assert_eq!(profile.after_photo(), None);
    }

    #[test]
    fn stale_week_is_rederived() {
        let mut record =
            ProfileRecord::from_profile(&user(), &busy_profile(), Timestamp::now());
        record.current_week = 1;
        let profile = record.into_profile().unwrap();
        assert_eq!(profile.current_week(), 2);
    }

    #[test]
    fn mismatched_program_level_is_rejected() {
        let mut record =
            ProfileRecord::from_profile(&user(), &busy_profile(), Timestamp::now());
        record.program_level = 1;
        assert_eq!(record.into_profile().unwrap_err().field(), "program_level");
    }

    #[test]
    fn out_of_range_day_is_rejected() {
        let mut record =
            ProfileRecord::from_profile(&user(), &busy_profile(), Timestamp::now());
        record.completed_days.push(31);
        assert!(record.into_profile().is_err());
    }

    #[test]
    fn negative_points_fail_to_parse() {
        let mut value = serde_json::to_value(ProfileRecord::from_profile(
            &user(),
            &busy_profile(),
            Timestamp::now(),
        ))
        .unwrap();
        value["points"] = json!(-5);
        assert!(serde_json::from_value::<ProfileRecord>(value).is_err());
    }

    #[test]
    fn profile_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn ProfileStore) {}
    }
}
