//! Profile store over a PostgREST-compatible REST API.
//!
//! Tables:
//! - `user_profiles` - one row per user, upserted on `user_id`
//! - `questionnaire_answers` - append-only audit rows

use async_trait::async_trait;
use reqwest::Method;

use crate::adapters::backend::{error_message, BackendClient};
use crate::domain::foundation::UserId;
use crate::ports::{ProfileRecord, ProfileStore, QuestionnaireRecord, StoreError};

const PROFILES_PATH: &str = "/rest/v1/user_profiles";
const QUESTIONNAIRES_PATH: &str = "/rest/v1/questionnaire_answers";

/// `ProfileStore` backed by the hosted database's REST API.
#[derive(Debug, Clone)]
pub struct PostgrestProfileStore {
    backend: BackendClient,
}

impl PostgrestProfileStore {
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }
}

/// Query selecting the single row owned by `user_id`.
fn profile_query(user_id: &UserId) -> [(&'static str, String); 2] {
    [
        ("user_id", format!("eq.{}", user_id)),
        ("select", "*".to_string()),
    ]
}

fn transport_error(e: reqwest::Error) -> StoreError {
    tracing::error!("Database request failed: {}", e);
    StoreError::unavailable(e.to_string())
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body);
    if status.is_server_error() {
        tracing::error!(%status, "Database returned {}", message);
        Err(StoreError::unavailable(format!("{}: {}", status, message)))
    } else {
        tracing::warn!(%status, "Database rejected request: {}", message);
        Err(StoreError::rejected(message))
    }
}

#[async_trait]
impl ProfileStore for PostgrestProfileStore {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<Option<ProfileRecord>, StoreError> {
        let response = self
            .backend
            .request(Method::GET, PROFILES_PATH)
            .await
            .query(&profile_query(user_id))
            .send()
            .await
            .map_err(transport_error)?;

        let rows: Vec<ProfileRecord> = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user_id, "Failed to parse profile row: {}", e);
                StoreError::rejected(format!("Unexpected profile row: {}", e))
            })?;

        Ok(rows.into_iter().next())
    }

    async fn upsert_profile(&self, record: &ProfileRecord) -> Result<(), StoreError> {
        let response = self
            .backend
            .request(Method::POST, PROFILES_PATH)
            .await
            .query(&[("on_conflict", "user_id")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(record)
            .send()
            .await
            .map_err(transport_error)?;

        ensure_success(response).await?;
        tracing::debug!(user_id = %record.user_id, "Profile upserted");
        Ok(())
    }

    async fn insert_questionnaire_record(
        &self,
        record: &QuestionnaireRecord,
    ) -> Result<(), StoreError> {
        let response = self
            .backend
            .request(Method::POST, QUESTIONNAIRES_PATH)
            .await
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await
            .map_err(transport_error)?;

        ensure_success(response).await?;
        Ok(())
    }
}
