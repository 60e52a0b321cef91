//! Repository for the `forms` table.

use sqlx::PgPool;

use crate::models::form::{CreateForm, FormRow, UpdateForm};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, user_id, pages, settings, published, created_at, updated_at";

/// Provides CRUD operations for forms.
pub struct FormRepo;

impl FormRepo {
    /// Insert a new form, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateForm) -> Result<FormRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO forms (id, name, user_id, pages, settings, published)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FormRow>(&query)
            .bind(&input.id)
            .bind(&input.name)
            .bind(&input.user_id)
            .bind(&input.pages)
            .bind(&input.settings)
            .bind(input.published)
            .fetch_one(pool)
            .await
    }

    /// Find a form by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<FormRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM forms WHERE id = $1");
        sqlx::query_as::<_, FormRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List forms, optionally filtered by publish state and/or owner,
    /// ordered by `created_at` descending (most recent first).
    pub async fn list(
        pool: &PgPool,
        published: Option<bool>,
        user_id: Option<&str>,
    ) -> Result<Vec<FormRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM forms
             WHERE ($1::boolean IS NULL OR published = $1)
               AND ($2::text IS NULL OR user_id = $2)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, FormRow>(&query)
            .bind(published)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a form. Only non-`None` fields in `input` are applied;
    /// `updated_at` is refreshed.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &UpdateForm,
    ) -> Result<Option<FormRow>, sqlx::Error> {
        let query = format!(
            "UPDATE forms SET
                name = COALESCE($2, name),
                pages = COALESCE($3, pages),
                settings = COALESCE($4, settings),
                published = COALESCE($5, published),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FormRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.pages)
            .bind(&input.settings)
            .bind(input.published)
            .fetch_optional(pool)
            .await
    }

    /// Insert-or-replace under a caller-supplied id (draft seeding).
    /// `created_at` is preserved on conflict; `updated_at` is refreshed.
    pub async fn upsert(pool: &PgPool, input: &CreateForm) -> Result<FormRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO forms (id, name, user_id, pages, settings, published)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                pages = EXCLUDED.pages,
                settings = EXCLUDED.settings,
                published = EXCLUDED.published,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FormRow>(&query)
            .bind(&input.id)
            .bind(&input.name)
            .bind(&input.user_id)
            .bind(&input.pages)
            .bind(&input.settings)
            .bind(input.published)
            .fetch_one(pool)
            .await
    }

    /// Delete a form by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM forms WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
