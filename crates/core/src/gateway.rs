//! The persistence gateway seam.
//!
//! The store reacts differently to "the record does not exist" (fall back
//! to the preview cache, or treat a delete as already done) and "the
//! backend is unreachable" (fall back AND report), so the two are distinct
//! error kinds here rather than one opaque failure.
//!
//! Implementations: `formcraft_db` (Postgres/sqlx) for production,
//! [`crate::memory`] for tests and storage-less local runs. The handle is
//! constructed once at startup and injected; nothing re-acquires it
//! per request.

use async_trait::async_trait;
use serde_json::Value;

use crate::normalize::{FormPatch, RawForm};
use crate::submission::Submission;
use crate::types::FormId;

/// Errors crossing the gateway seam.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// No record exists for the requested id.
    #[error("record not found")]
    NotFound,

    /// The backend was unreachable or rejected the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Filter for list/count operations. Results are always ordered by
/// `created_at` descending (most recent first).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFilter {
    /// Restrict to drafts (`false`) or published documents (`true`).
    pub published: Option<bool>,
    /// Restrict to a single owner.
    pub user_id: Option<String>,
}

impl FormFilter {
    pub fn drafts() -> Self {
        FormFilter {
            published: Some(false),
            user_id: None,
        }
    }

    pub fn owned_by(user_id: &str) -> Self {
        FormFilter {
            published: None,
            user_id: Some(user_id.to_string()),
        }
    }
}

/// CRUD contract for form documents.
///
/// Reads return the boundary [`RawForm`] shape: rows may still carry the
/// legacy page representation, and hydration through the normalizer is the
/// caller's job (the store does it on every read path).
#[async_trait]
pub trait FormGateway: Send + Sync {
    /// Persist a new document under `form.id` (which must be set by the
    /// caller) and return the stored record.
    async fn create(&self, form: &RawForm) -> GatewayResult<RawForm>;

    /// Fetch one document; `Ok(None)` when no record exists.
    async fn find_by_id(&self, id: &str) -> GatewayResult<Option<RawForm>>;

    /// List documents matching `filter`, newest first.
    async fn list(&self, filter: &FormFilter) -> GatewayResult<Vec<RawForm>>;

    /// Merge `patch` into the record for `id`; absent patch fields are left
    /// unchanged. `updated_at` is refreshed. Fails with
    /// [`GatewayError::NotFound`] for an unknown id.
    async fn update(&self, id: &str, patch: &FormPatch) -> GatewayResult<RawForm>;

    /// Update-or-create under a caller-supplied id (draft seeding).
    async fn upsert(&self, id: &str, form: &RawForm) -> GatewayResult<RawForm>;

    /// Remove the record. Fails with [`GatewayError::NotFound`] for an
    /// unknown id; callers doing cleanup treat that as success.
    async fn delete(&self, id: &str) -> GatewayResult<()>;

    /// Liveness probe for health reporting.
    async fn ping(&self) -> GatewayResult<()>;
}

/// Ingestion and query contract for submissions.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// Store a submission; the backend assigns id and timestamp. Fails with
    /// [`GatewayError::NotFound`] when the form does not exist.
    async fn create(&self, form_id: &FormId, data: Value) -> GatewayResult<Submission>;

    /// All submissions for a form, ordered by timestamp ascending.
    async fn list_by_form(&self, form_id: &str) -> GatewayResult<Vec<Submission>>;

    /// Number of submissions recorded for a form.
    async fn count_by_form(&self, form_id: &str) -> GatewayResult<u64>;
}
