//! Handlers for preview seeding and preview reads.
//!
//! Seeding is the one write path that tolerates a gateway outage quietly:
//! the preview cache takes the snapshot either way, so the editor keeps
//! working, and the reply stays positive.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use formcraft_core::error::CoreError;
use formcraft_core::form::FormDocument;
use formcraft_core::normalize::RawForm;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub ok: bool,
}

/// POST /api/v1/preview
///
/// Upserts a draft under its client-supplied id. Requires `id` in the
/// payload; a gateway failure is logged but does not fail the request --
/// the cache write already succeeded.
pub async fn seed(
    State(state): State<AppState>,
    Json(input): Json<RawForm>,
) -> AppResult<Json<SeedResponse>> {
    let id = input
        .id
        .clone()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("missing_id".to_string()))?;

    match state.store.upsert(&id, input).await {
        Ok(_) => {}
        Err(CoreError::Storage(reason)) => {
            tracing::warn!(%id, %reason, "preview seed persisted to cache only");
        }
        Err(err) => return Err(err.into()),
    }
    Ok(Json(SeedResponse { ok: true }))
}

/// GET /api/v1/forms/{id}/preview
///
/// Read precedence applies: live record first, cached snapshot second,
/// 404 when both miss.
pub async fn get_preview(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<FormDocument>> {
    let form = state.store.get(&id).await?;
    Ok(Json(form))
}
