//! Form row model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use formcraft_core::types::Timestamp;

/// A row from the `forms` table. `pages` is raw JSONB and may still be in
/// the legacy flat shape; hydration through the normalizer happens above
/// this layer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FormRow {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub pages: serde_json::Value,
    /// NOT NULL in the database; defaults to `{}`.
    pub settings: serde_json::Value,
    pub published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new form.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateForm {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub pages: serde_json::Value,
    pub settings: serde_json::Value,
    pub published: bool,
}

/// DTO for updating an existing form. All fields are optional; absent
/// fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateForm {
    pub name: Option<String>,
    pub pages: Option<serde_json::Value>,
    pub settings: Option<serde_json::Value>,
    pub published: Option<bool>,
}
