//! Handlers for the `/forms` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use formcraft_core::embed::{embed_code, EmbedCode};
use formcraft_core::form::FormDocument;
use formcraft_core::normalize::{FormPatch, RawForm};

use crate::error::AppResult;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::state::AppState;

/// POST /api/v1/forms
///
/// Accepts both schema generations in the payload; the stored document is
/// always canonical. A verified identity becomes the owner; otherwise the
/// document is anonymous -- a client-supplied owner field is ignored.
pub async fn create(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    Json(input): Json<RawForm>,
) -> AppResult<(StatusCode, Json<FormDocument>)> {
    let form = state.store.create(input, user.user_id()).await?;
    Ok((StatusCode::CREATED, Json(form)))
}

/// GET /api/v1/forms
pub async fn list_mine(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<FormDocument>>> {
    let forms = state.store.list_by_owner(&user.user_id).await?;
    Ok(Json(forms))
}

/// GET /api/v1/forms/drafts
pub async fn list_drafts(State(state): State<AppState>) -> AppResult<Json<Vec<FormDocument>>> {
    let forms = state.store.list_drafts().await?;
    Ok(Json(forms))
}

/// GET /api/v1/forms/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<FormDocument>> {
    let form = state.store.get(&id).await?;
    Ok(Json(form))
}

/// PUT /api/v1/forms/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<FormPatch>,
) -> AppResult<Json<FormDocument>> {
    let form = state.store.update(&id, input).await?;
    Ok(Json(form))
}

/// DELETE /api/v1/forms/{id}
///
/// Cleanup semantics: deleting an id that is already gone still reports
/// success.
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    state.store.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/forms/{id}/publish
pub async fn publish(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<FormDocument>> {
    let form = state.store.publish(&id).await?;
    Ok(Json(form))
}

/// GET /api/v1/forms/{id}/embed
pub async fn embed(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<EmbedCode>> {
    Ok(Json(embed_code(&state.config.frontend_base_url, &id)))
}
