//! In-memory profile store.
//!
//! Stores profile rows keyed by user and keeps every questionnaire audit row.
//! Useful for testing and offline runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{ProfileRecord, ProfileStore, QuestionnaireRecord, StoreError};

/// In-memory `ProfileStore`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<HashMap<UserId, ProfileRecord>>>,
    questionnaires: Arc<RwLock<Vec<QuestionnaireRecord>>>,
    upserts: Arc<RwLock<usize>>,
    /// Optional error to return for all calls (for error testing)
    force_error: Arc<RwLock<Option<StoreError>>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a stored row.
    pub fn with_record(mut self, record: ProfileRecord) -> Self {
        if let Some(profiles) = Arc::get_mut(&mut self.profiles) {
            profiles.get_mut().insert(record.user_id.clone(), record);
        }
        self
    }

    /// Forces all calls to return the specified error.
    pub async fn set_error(&self, error: StoreError) {
        *self.force_error.write().await = Some(error);
    }

    /// Clears the forced error and returns to normal operation.
    pub async fn clear_error(&self) {
        *self.force_error.write().await = None;
    }

    /// The stored row for a user, bypassing forced errors.
    pub async fn record(&self, user_id: &UserId) -> Option<ProfileRecord> {
        self.profiles.read().await.get(user_id).cloned()
    }

    pub async fn questionnaire_records(&self) -> Vec<QuestionnaireRecord> {
        self.questionnaires.read().await.clone()
    }

    /// Number of successful upserts so far.
    pub async fn upsert_count(&self) -> usize {
        *self.upserts.read().await
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.profiles.write().await.clear();
        self.questionnaires.write().await.clear();
        *self.upserts.write().await = 0;
    }

    async fn check_error(&self) -> Result<(), StoreError> {
        match self.force_error.read().await.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<Option<ProfileRecord>, StoreError> {
        self.check_error().await?;
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn upsert_profile(&self, record: &ProfileRecord) -> Result<(), StoreError> {
        self.check_error().await?;

        let mut stored = record.clone();
        stored.updated_at = Some(Timestamp::now());
        self.profiles
            .write()
            .await
            .insert(stored.user_id.clone(), stored);
        *self.upserts.write().await += 1;
        Ok(())
    }

    async fn insert_questionnaire_record(
        &self,
        record: &QuestionnaireRecord,
    ) -> Result<(), StoreError> {
        self.check_error().await?;
        self.questionnaires.write().await.push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::program::{FitnessLevel, Questionnaire};
    use crate::domain::user::{AvatarColor, UserProfile};

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn record(points: u32) -> ProfileRecord {
        let profile = UserProfile::from_assessment(FitnessLevel::Beginner, AvatarColor::from_hue(10));
        let mut record = ProfileRecord::from_profile(&user(), &profile, Timestamp::now());
        record.points = points;
        record.updated_at = None;
        record
    }

    #[tokio::test]
    async fn fetch_missing_profile_returns_none() {
        let store = InMemoryProfileStore::new();
        assert_eq!(store.fetch_profile(&user()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn upsert_inserts_then_replaces() {
        let store = InMemoryProfileStore::new();

        store.upsert_profile(&record(0)).await.unwrap();
        store.upsert_profile(&record(40)).await.unwrap();

        let stored = store.fetch_profile(&user()).await.unwrap().unwrap();
        assert_eq!(stored.points, 40);
        assert_eq!(store.upsert_count().await, 2);
    }

    #[tokio::test]
    async fn upsert_stamps_updated_at() {
        let store = InMemoryProfileStore::new();
        let before = Timestamp::now();

        store.upsert_profile(&record(0)).await.unwrap();

        let stamped = store.record(&user()).await.unwrap().updated_at.unwrap();
        assert!(!stamped.is_before(&before));
    }

    #[tokio::test]
    async fn with_record_seeds_store() {
        let store = InMemoryProfileStore::new().with_record(record(70));
        let stored = store.fetch_profile(&user()).await.unwrap().unwrap();
        assert_eq!(stored.points, 70);
        assert_eq!(store.upsert_count().await, 0);
    }

    #[tokio::test]
    async fn questionnaire_records_accumulate() {
        let store = InMemoryProfileStore::new();
        let mut questionnaire = Questionnaire::new();
        for id in 1..=12 {
            questionnaire.answer(id, 2).unwrap();
        }
        let answers = questionnaire.finish().unwrap();

        for _ in 0..2 {
            store
                .insert_questionnaire_record(&QuestionnaireRecord {
                    user_id: user(),
                    answers: answers.clone(),
                })
                .await
                .unwrap();
        }

        assert_eq!(store.questionnaire_records().await.len(), 2);
    }

    #[tokio::test]
    async fn forced_error_blocks_calls() {
        let store = InMemoryProfileStore::new();
        store.set_error(StoreError::unavailable("offline")).await;

        assert!(store.fetch_profile(&user()).await.is_err());
        assert!(store.upsert_profile(&record(0)).await.is_err());
        assert_eq!(store.record(&user()).await, None);

        store.clear_error().await;
        assert!(store.upsert_profile(&record(0)).await.is_ok());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryProfileStore::new();
        let handle = store.clone();
        store.upsert_profile(&record(10)).await.unwrap();
        assert!(handle.record(&user()).await.is_some());

        handle.clear().await;
        assert_eq!(store.upsert_count().await, 0);
    }
}
