//! Repository for the `submissions` table.

use sqlx::PgPool;

use crate::models::submission::SubmissionRow;

const COLUMNS: &str = "id, form_id, data, submitted_at";

/// Provides ingestion and query operations for submissions.
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Insert a submission; the database assigns id and timestamp.
    pub async fn create(
        pool: &PgPool,
        form_id: &str,
        data: &serde_json::Value,
    ) -> Result<SubmissionRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO submissions (form_id, data)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SubmissionRow>(&query)
            .bind(form_id)
            .bind(data)
            .fetch_one(pool)
            .await
    }

    /// All submissions for a form, ordered by submission time ascending.
    pub async fn list_by_form(
        pool: &PgPool,
        form_id: &str,
    ) -> Result<Vec<SubmissionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM submissions
             WHERE form_id = $1
             ORDER BY submitted_at ASC, id ASC"
        );
        sqlx::query_as::<_, SubmissionRow>(&query)
            .bind(form_id)
            .fetch_all(pool)
            .await
    }

    /// Number of submissions recorded for a form.
    pub async fn count_by_form(pool: &PgPool, form_id: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM submissions WHERE form_id = $1")
            .bind(form_id)
            .fetch_one(pool)
            .await
    }
}
