//! Mirrors the in-memory profile to the profile store.
//!
//! The in-memory profile is authoritative for the running session. Writes
//! here are best-effort: a failed upsert is logged and the caller carries on.

use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::program::QuestionnaireAnswers;
use crate::domain::user::UserProfile;
use crate::ports::{ProfileRecord, ProfileStore, QuestionnaireRecord, StoreError};

#[derive(Clone)]
pub struct ProfileSync {
    store: Arc<dyn ProfileStore>,
}

impl ProfileSync {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Loads and validates the stored profile.
    pub async fn load(&self, user_id: &UserId) -> Result<Option<UserProfile>, StoreError> {
        match self.store.fetch_profile(user_id).await? {
            Some(record) => Ok(Some(record.into_profile()?)),
            None => Ok(None),
        }
    }

    /// Upserts the whole profile. Returns whether the write landed.
    pub async fn save(&self, user_id: &UserId, profile: &UserProfile) -> bool {
        let record = ProfileRecord::from_profile(user_id, profile, Timestamp::now());
        match self.store.upsert_profile(&record).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Failed to save profile");
                false
            }
        }
    }

    /// Stores the questionnaire answers as an audit row. Best-effort.
    pub async fn record_questionnaire(
        &self,
        user_id: &UserId,
        answers: &QuestionnaireAnswers,
    ) -> bool {
        let record = QuestionnaireRecord {
            user_id: user_id.clone(),
            answers: answers.clone(),
        };
        match self.store.insert_questionnaire_record(&record).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Failed to record questionnaire");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryProfileStore;
    use crate::domain::program::{FitnessLevel, Questionnaire};
    use crate::domain::user::AvatarColor;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn profile() -> UserProfile {
        UserProfile::from_assessment(FitnessLevel::Intermediate, AvatarColor::from_hue(200))
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = InMemoryProfileStore::new();
        let sync = ProfileSync::new(Arc::new(store.clone()));

        assert!(sync.save(&user(), &profile()).await);

        let loaded = sync.load(&user()).await.unwrap();
        assert_eq!(loaded, Some(profile()));
        assert_eq!(store.upsert_count().await, 1);
    }

    #[tokio::test]
    async fn load_missing_profile_is_none() {
        let sync = ProfileSync::new(Arc::new(InMemoryProfileStore::new()));
        assert_eq!(sync.load(&user()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_failure_is_swallowed() {
        let store = InMemoryProfileStore::new();
        store.set_error(StoreError::unavailable("offline")).await;
        let sync = ProfileSync::new(Arc::new(store.clone()));

        assert!(!sync.save(&user(), &profile()).await);
        assert_eq!(store.record(&user()).await, None);
    }

    #[tokio::test]
    async fn corrupt_row_fails_load() {
        let mut record = ProfileRecord::from_profile(&user(), &profile(), Timestamp::now());
        record.current_day = 0;
        let store = InMemoryProfileStore::new().with_record(record);
        let sync = ProfileSync::new(Arc::new(store));

        assert!(matches!(
            sync.load(&user()).await,
            Err(StoreError::Corrupt(_))
        ));
    }

    #[tokio::test]
    async fn records_questionnaire() {
        let store = InMemoryProfileStore::new();
        let sync = ProfileSync::new(Arc::new(store.clone()));
        let mut questionnaire = Questionnaire::new();
        for id in 1..=12 {
            questionnaire.answer(id, 1).unwrap();
        }
        let answers = questionnaire.finish().unwrap();

        assert!(sync.record_questionnaire(&user(), &answers).await);

        let records = store.questionnaire_records().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].answers, answers);
    }
}
