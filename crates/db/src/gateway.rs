//! Adapters from the sqlx repositories to the core gateway traits.
//!
//! Error classification happens here: `RowNotFound` (and the submission
//! foreign-key violation) become [`GatewayError::NotFound`]; everything
//! else is a transport failure the store may fall back from.

use async_trait::async_trait;
use serde_json::Value;

use formcraft_core::gateway::{
    FormFilter, FormGateway, GatewayError, GatewayResult, SubmissionGateway,
};
use formcraft_core::normalize::{FormPatch, RawForm};
use formcraft_core::submission::Submission;
use formcraft_core::types::{FormId, ANON_USER_ID};

use crate::models::form::{CreateForm, FormRow, UpdateForm};
use crate::models::submission::SubmissionRow;
use crate::repositories::{FormRepo, SubmissionRepo};
use crate::DbPool;

/// PostgreSQL error code for foreign-key violations.
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

fn classify(err: sqlx::Error) -> GatewayError {
    match &err {
        sqlx::Error::RowNotFound => GatewayError::NotFound,
        sqlx::Error::Database(db_err)
            if db_err.code().as_deref() == Some(PG_FOREIGN_KEY_VIOLATION) =>
        {
            GatewayError::NotFound
        }
        _ => {
            tracing::error!(error = %err, "database error");
            GatewayError::Unavailable(err.to_string())
        }
    }
}

fn json_value<T: serde::Serialize>(value: &T) -> GatewayResult<Value> {
    serde_json::to_value(value)
        .map_err(|err| GatewayError::Unavailable(format!("serialization failed: {err}")))
}

fn row_to_raw(row: FormRow) -> RawForm {
    RawForm {
        id: Some(row.id),
        name: row.name,
        // Corrupt JSONB hydrates as an absent source, which the normalizer
        // turns into an empty form rather than a hard error.
        pages: serde_json::from_value(row.pages).ok(),
        fields: None,
        settings: serde_json::from_value(row.settings).ok(),
        published: Some(row.published),
        is_draft: None,
        user_id: Some(row.user_id),
        created_at: Some(row.created_at),
        updated_at: Some(row.updated_at),
    }
}

fn raw_to_create(raw: &RawForm) -> GatewayResult<CreateForm> {
    let id = raw
        .id
        .clone()
        .ok_or_else(|| GatewayError::Unavailable("create requires an id".to_string()))?;
    let pages = match raw.pages.as_ref().or(raw.fields.as_ref()) {
        Some(source) => json_value(source)?,
        None => Value::Array(Vec::new()),
    };
    let settings = match raw.settings.as_ref() {
        Some(settings) => json_value(settings)?,
        None => Value::Object(serde_json::Map::new()),
    };
    Ok(CreateForm {
        id,
        name: raw.name.clone(),
        user_id: raw
            .user_id
            .clone()
            .unwrap_or_else(|| ANON_USER_ID.to_string()),
        pages,
        settings,
        published: raw.effective_published(),
    })
}

fn patch_to_update(patch: &FormPatch) -> GatewayResult<UpdateForm> {
    let pages = match patch.pages.as_ref().or(patch.fields.as_ref()) {
        Some(source) => Some(json_value(source)?),
        None => None,
    };
    let settings = match patch.settings.as_ref() {
        Some(settings) => Some(json_value(settings)?),
        None => None,
    };
    Ok(UpdateForm {
        name: patch.name.clone(),
        pages,
        settings,
        published: patch.effective_published(),
    })
}

fn row_to_submission(row: SubmissionRow) -> Submission {
    Submission {
        id: row.id,
        form_id: row.form_id,
        data: row.data,
        submitted_at: row.submitted_at,
    }
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

/// Postgres-backed [`FormGateway`]. Holds the pool created once at startup.
#[derive(Clone)]
pub struct PgFormGateway {
    pool: DbPool,
}

impl PgFormGateway {
    pub fn new(pool: DbPool) -> Self {
        PgFormGateway { pool }
    }
}

#[async_trait]
impl FormGateway for PgFormGateway {
    async fn create(&self, form: &RawForm) -> GatewayResult<RawForm> {
        let input = raw_to_create(form)?;
        let row = FormRepo::create(&self.pool, &input).await.map_err(classify)?;
        Ok(row_to_raw(row))
    }

    async fn find_by_id(&self, id: &str) -> GatewayResult<Option<RawForm>> {
        let row = FormRepo::find_by_id(&self.pool, id)
            .await
            .map_err(classify)?;
        Ok(row.map(row_to_raw))
    }

    async fn list(&self, filter: &FormFilter) -> GatewayResult<Vec<RawForm>> {
        let rows = FormRepo::list(&self.pool, filter.published, filter.user_id.as_deref())
            .await
            .map_err(classify)?;
        Ok(rows.into_iter().map(row_to_raw).collect())
    }

    async fn update(&self, id: &str, patch: &FormPatch) -> GatewayResult<RawForm> {
        let input = patch_to_update(patch)?;
        let row = FormRepo::update(&self.pool, id, &input)
            .await
            .map_err(classify)?
            .ok_or(GatewayError::NotFound)?;
        Ok(row_to_raw(row))
    }

    async fn upsert(&self, id: &str, form: &RawForm) -> GatewayResult<RawForm> {
        let mut with_id = form.clone();
        with_id.id = Some(id.to_string());
        let input = raw_to_create(&with_id)?;
        let row = FormRepo::upsert(&self.pool, &input).await.map_err(classify)?;
        Ok(row_to_raw(row))
    }

    async fn delete(&self, id: &str) -> GatewayResult<()> {
        let deleted = FormRepo::delete(&self.pool, id).await.map_err(classify)?;
        if deleted {
            Ok(())
        } else {
            Err(GatewayError::NotFound)
        }
    }

    async fn ping(&self) -> GatewayResult<()> {
        crate::health_check(&self.pool).await.map_err(classify)
    }
}

// ---------------------------------------------------------------------------
// Submissions
// ---------------------------------------------------------------------------

/// Postgres-backed [`SubmissionGateway`].
#[derive(Clone)]
pub struct PgSubmissionGateway {
    pool: DbPool,
}

impl PgSubmissionGateway {
    pub fn new(pool: DbPool) -> Self {
        PgSubmissionGateway { pool }
    }
}

#[async_trait]
impl SubmissionGateway for PgSubmissionGateway {
    async fn create(&self, form_id: &FormId, data: Value) -> GatewayResult<Submission> {
        let row = SubmissionRepo::create(&self.pool, form_id, &data)
            .await
            .map_err(classify)?;
        Ok(row_to_submission(row))
    }

    async fn list_by_form(&self, form_id: &str) -> GatewayResult<Vec<Submission>> {
        let rows = SubmissionRepo::list_by_form(&self.pool, form_id)
            .await
            .map_err(classify)?;
        Ok(rows.into_iter().map(row_to_submission).collect())
    }

    async fn count_by_form(&self, form_id: &str) -> GatewayResult<u64> {
        let count = SubmissionRepo::count_by_form(&self.pool, form_id)
            .await
            .map_err(classify)?;
        Ok(count.max(0) as u64)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
