//! Handlers for the premade template catalog.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use formcraft_core::draft::generate_draft_id;
use formcraft_core::form::FormDocument;
use formcraft_core::template::{find_template, instantiate, premade_templates, FormTemplate};

use crate::error::AppResult;
use crate::middleware::auth::MaybeAuthUser;
use crate::state::AppState;

/// GET /api/v1/templates
pub async fn list() -> Json<Vec<FormTemplate>> {
    Json(premade_templates())
}

/// POST /api/v1/forms/from-template/{name}
///
/// Instantiates the named template as a fresh draft under a new draft id
/// and creates it through the store, so the editor can start from the
/// seeded shape immediately.
pub async fn create_from_template(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    Path(name): Path<String>,
) -> AppResult<(StatusCode, Json<FormDocument>)> {
    let template = find_template(&name)?;
    let mut doc = instantiate(&template);
    doc.id = Some(generate_draft_id());

    let form = state.store.create(doc.to_raw(), user.user_id()).await?;
    Ok((StatusCode::CREATED, Json(form)))
}
