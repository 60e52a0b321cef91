//! Shape normalization between legacy and canonical document forms.
//!
//! Two generations of the same document schema exist in the wild:
//!
//! - canonical: `pages: [{pageName, fields: [...]}]` with a `published` flag;
//! - legacy: `fields: [[field, ...], ...]` (bare per-page field arrays,
//!   sometimes under the `pages` key) with an `isDraft` flag.
//!
//! [`RawForm`] is the single boundary adapter for both: every read path that
//! hydrates a document from any source (Postgres row, preview cache, API
//! payload) goes through [`FormDocument::from_raw`] before the document is
//! handed to a consumer. Internally only the canonical [`FormDocument`]
//! exists.

use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::form::{default_page_name, FormDocument, FormSettings, Page};
use crate::naming::derive_field_names;
use crate::types::{FormId, Timestamp};

// ---------------------------------------------------------------------------
// Page sources
// ---------------------------------------------------------------------------

/// Either of the two page representations found in stored documents.
///
/// Deserialization applies the detection rule: elements carrying a `fields`
/// property are real pages; bare arrays are per-page field lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageSource {
    Paginated(Vec<RawPage>),
    Flat(Vec<Vec<Field>>),
}

/// A page as found in canonical input; `pageName` may be missing and is
/// defaulted by position during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_name: Option<String>,

    pub fields: Vec<Field>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

/// Convert either page representation into the canonical page list.
///
/// Idempotent, order-preserving, and total: empty or absent input produces
/// exactly one empty page named `"Page 1"`.
pub fn normalize_pages(source: Option<PageSource>) -> Vec<Page> {
    let pages: Vec<Page> = match source {
        Some(PageSource::Paginated(raw)) => raw
            .into_iter()
            .enumerate()
            .map(|(i, p)| Page {
                page_name: p.page_name.unwrap_or_else(|| default_page_name(i)),
                fields: p.fields,
                style: p.style,
            })
            .collect(),
        Some(PageSource::Flat(lists)) => lists
            .into_iter()
            .enumerate()
            .map(|(i, fields)| Page {
                page_name: default_page_name(i),
                fields,
                style: None,
            })
            .collect(),
        None => Vec::new(),
    };

    if pages.is_empty() {
        vec![Page::empty(0)]
    } else {
        pages
    }
}

// ---------------------------------------------------------------------------
// Raw form (boundary shape)
// ---------------------------------------------------------------------------

/// A form document as it arrives from any boundary: API payload, stored
/// row, or preview snapshot. Accepts both schema generations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FormId>,

    #[serde(default)]
    pub name: String,

    /// Canonical pages, or (legacy) bare field arrays under the same key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<PageSource>,

    /// Legacy key: per-page field arrays (or already-paginated pages).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<PageSource>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<FormSettings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,

    /// Legacy inverse of `published`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_draft: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl RawForm {
    /// The publish flag, reconciling both historical names.
    /// `published` wins when both are present; absent means unpublished.
    pub fn effective_published(&self) -> bool {
        self.published
            .or(self.is_draft.map(|draft| !draft))
            .unwrap_or(false)
    }

    /// The page source, preferring the canonical key over the legacy one.
    pub fn take_page_source(&mut self) -> Option<PageSource> {
        self.pages.take().or_else(|| self.fields.take())
    }
}

impl FormDocument {
    /// Hydrate a boundary document into the canonical shape: normalize the
    /// page representation, reconcile the publish flag, and derive field
    /// names. Runs on every read path.
    pub fn from_raw(mut raw: RawForm) -> FormDocument {
        let published = raw.effective_published();
        let mut pages = normalize_pages(raw.take_page_source());
        derive_field_names(&mut pages);

        FormDocument {
            id: raw.id,
            name: raw.name,
            pages,
            settings: raw.settings.unwrap_or_default(),
            published,
            user_id: raw
                .user_id
                .unwrap_or_else(|| crate::types::ANON_USER_ID.to_string()),
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        }
    }

    /// The boundary representation of a canonical document. Always emits
    /// the canonical schema generation (`pages` + `published`).
    pub fn to_raw(&self) -> RawForm {
        RawForm {
            id: self.id.clone(),
            name: self.name.clone(),
            pages: Some(PageSource::Paginated(
                self.pages
                    .iter()
                    .map(|p| RawPage {
                        page_name: Some(p.page_name.clone()),
                        fields: p.fields.clone(),
                        style: p.style.clone(),
                    })
                    .collect(),
            )),
            fields: None,
            settings: Some(self.settings.clone()),
            published: Some(self.published),
            is_draft: None,
            user_id: Some(self.user_id.clone()),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Partial updates
// ---------------------------------------------------------------------------

/// A partial update to an existing document. Absent fields are left
/// unchanged by the gateway's merge semantics. Accepts the same legacy
/// aliases as [`RawForm`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<PageSource>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<PageSource>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<FormSettings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_draft: Option<bool>,
}

impl FormPatch {
    /// The publish flag this patch is trying to set, if any.
    pub fn effective_published(&self) -> Option<bool> {
        self.published.or(self.is_draft.map(|draft| !draft))
    }

    /// The page update this patch carries, if any, in canonical shape with
    /// field names derived.
    pub fn normalized_pages(&self) -> Option<Vec<Page>> {
        let source = self.pages.clone().or_else(|| self.fields.clone())?;
        let mut pages = normalize_pages(Some(source));
        derive_field_names(&mut pages);
        Some(pages)
    }

    /// Apply this patch to a document in place (used for the best-effort
    /// cache snapshot when the gateway is unreachable).
    pub fn apply_to(&self, doc: &mut FormDocument) {
        if let Some(name) = &self.name {
            doc.name = name.clone();
        }
        if let Some(pages) = self.normalized_pages() {
            doc.pages = pages;
        }
        if let Some(settings) = &self.settings {
            doc.settings = settings.clone();
        }
        if let Some(published) = self.effective_published() {
            doc.published = published;
        }
        doc.updated_at = Some(chrono::Utc::now());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
