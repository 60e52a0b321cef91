//! Route definitions for the `/forms` resource and its sub-resources.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{form, preview, submission, template};
use crate::state::AppState;

/// Routes mounted at `/forms`.
///
/// ```text
/// POST   /                        -> create (optional auth)
/// GET    /                        -> list_mine (auth)
/// GET    /drafts                  -> list_drafts
/// POST   /from-template/{name}    -> create_from_template (optional auth)
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
/// POST   /{id}/publish            -> publish
/// GET    /{id}/embed              -> embed
/// GET    /{id}/preview            -> get_preview
/// POST   /{id}/submissions        -> submit (public)
/// GET    /{id}/submissions        -> entries (auth)
/// GET    /{id}/analytics          -> analytics (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(form::list_mine).post(form::create))
        .route("/drafts", get(form::list_drafts))
        .route(
            "/from-template/{name}",
            post(template::create_from_template),
        )
        .route(
            "/{id}",
            get(form::get_by_id).put(form::update).delete(form::delete),
        )
        .route("/{id}/publish", post(form::publish))
        .route("/{id}/embed", get(form::embed))
        .route("/{id}/preview", get(preview::get_preview))
        .route(
            "/{id}/submissions",
            get(submission::entries).post(submission::submit),
        )
        .route("/{id}/analytics", get(submission::analytics))
}
