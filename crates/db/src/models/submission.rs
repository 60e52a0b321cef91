//! Submission row model.

use serde::Serialize;
use sqlx::FromRow;

use formcraft_core::types::Timestamp;

/// A row from the `submissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubmissionRow {
    pub id: i64,
    pub form_id: String,
    pub data: serde_json::Value,
    pub submitted_at: Timestamp,
}
