pub mod form;
pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{preview, template};
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /forms                       create, list (see routes::form)
/// /forms/drafts                draft listing
/// /forms/from-template/{name}  template instantiation
/// /forms/{id}                  get, update, delete, publish, embed,
///                              preview, submissions, analytics
///
/// /preview                     seed a draft preview (public)
///
/// /templates                   premade template catalog
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/forms", form::router())
        .route("/preview", post(preview::seed))
        .route("/templates", get(template::list))
}
