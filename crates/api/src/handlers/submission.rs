//! Handlers for submission ingestion and analytics.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use formcraft_core::error::CoreError;
use formcraft_core::gateway::GatewayError;
use formcraft_core::submission::{Submission, SubmissionAnalytics};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn map_gateway(err: GatewayError, form_id: &str) -> AppError {
    match err {
        GatewayError::NotFound => AppError::Core(CoreError::NotFound {
            entity: "Form",
            id: form_id.to_string(),
        }),
        GatewayError::Unavailable(reason) => AppError::Core(CoreError::Storage(reason)),
    }
}

/// POST /api/v1/forms/{id}/submissions
///
/// Public ingestion. The payload is stored as-is, keyed by field names;
/// nothing cross-checks it against the form's declared fields.
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(data): Json<serde_json::Value>,
) -> AppResult<(StatusCode, Json<Submission>)> {
    let submission = state
        .submissions
        .create(&id, data)
        .await
        .map_err(|err| map_gateway(err, &id))?;
    Ok((StatusCode::CREATED, Json(submission)))
}

/// GET /api/v1/forms/{id}/submissions
pub async fn entries(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Submission>>> {
    let submissions = state
        .submissions
        .list_by_form(&id)
        .await
        .map_err(|err| map_gateway(err, &id))?;
    Ok(Json(submissions))
}

/// GET /api/v1/forms/{id}/analytics
pub async fn analytics(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<SubmissionAnalytics>> {
    let total = state
        .submissions
        .count_by_form(&id)
        .await
        .map_err(|err| map_gateway(err, &id))?;
    let submissions = state
        .submissions
        .list_by_form(&id)
        .await
        .map_err(|err| map_gateway(err, &id))?;
    Ok(Json(SubmissionAnalytics::from_submissions(
        total,
        &submissions,
    )))
}
