//! The canonical form document model.
//!
//! A form is a named, ordered collection of pages, each an ordered
//! collection of fields. This is the ONE internal representation; the
//! legacy flat-fields / `isDraft` shape exists only as a boundary adapter
//! in [`crate::normalize`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::field::Field;
use crate::types::{FormId, Timestamp, ANON_USER_ID};

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// Display name for the page at the given 0-based position.
pub fn default_page_name(index: usize) -> String {
    format!("Page {}", index + 1)
}

/// An ordered group of fields with its own display name and style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub page_name: String,

    #[serde(default)]
    pub fields: Vec<Field>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl Page {
    /// An empty page named for the given 0-based position.
    pub fn empty(index: usize) -> Self {
        Page {
            page_name: default_page_name(index),
            fields: Vec::new(),
            style: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Form-level settings: a style declaration plus optional rendering hooks.
/// Unrecognized keys pass through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    #[serde(
        rename = "submitLabel",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub submit_label: Option<String>,

    #[serde(rename = "fieldClass", default, skip_serializing_if = "Option::is_none")]
    pub field_class: Option<String>,

    #[serde(
        rename = "fieldContainer",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub field_container: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Form document
// ---------------------------------------------------------------------------

/// The persisted object describing a form's pages, settings, and lifecycle
/// state. `id` is `None` until the document is first created; after that it
/// is either a server-assigned UUID or a client-generated draft id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FormId>,

    #[serde(default)]
    pub name: String,

    pub pages: Vec<Page>,

    #[serde(default, skip_serializing_if = "is_default_settings")]
    pub settings: FormSettings,

    #[serde(default)]
    pub published: bool,

    #[serde(default = "anon_user")]
    pub user_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

fn anon_user() -> String {
    ANON_USER_ID.to_string()
}

fn is_default_settings(settings: &FormSettings) -> bool {
    *settings == FormSettings::default()
}

impl FormDocument {
    /// A new unsaved document: one empty page, unpublished, anonymous owner.
    pub fn new(name: &str) -> Self {
        FormDocument {
            id: None,
            name: name.to_string(),
            pages: vec![Page::empty(0)],
            settings: FormSettings::default(),
            published: false,
            user_id: anon_user(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Whether any page carries at least one field.
    pub fn has_any_field(&self) -> bool {
        self.pages.iter().any(|p| !p.fields.is_empty())
    }

    /// The savable gate: a non-empty name AND at least one field somewhere.
    ///
    /// This is a client-side gate; the persistence gateway does not enforce
    /// it (drafts are seeded with empty pages).
    pub fn is_savable(&self) -> bool {
        !self.name.trim().is_empty() && self.has_any_field()
    }

    /// Savable gate as a validation result, for callers that surface errors.
    pub fn validate_savable(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("form must have a name".to_string()));
        }
        if !self.has_any_field() {
            return Err(CoreError::Validation(
                "form must have at least one field".to_string(),
            ));
        }
        Ok(())
    }

    /// Append an empty page named after its position.
    pub fn add_page(&mut self) -> &mut Page {
        let page = Page::empty(self.pages.len());
        self.pages.push(page);
        self.pages.last_mut().unwrap()
    }

    /// Remove the page at `index`. Removing the last remaining page is
    /// rejected: a form always has at least one page.
    pub fn remove_page(&mut self, index: usize) -> CoreResult<()> {
        if self.pages.len() <= 1 {
            return Err(CoreError::Validation(
                "a form must keep at least one page".to_string(),
            ));
        }
        if index >= self.pages.len() {
            return Err(CoreError::Validation(format!(
                "no page at index {index}"
            )));
        }
        self.pages.remove(index);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_field(name: &str) -> FormDocument {
        let mut doc = FormDocument::new(name);
        doc.pages[0].fields.push(Field::new("text"));
        doc
    }

    // -- savable gate --------------------------------------------------------

    #[test]
    fn empty_name_is_not_savable() {
        let doc = doc_with_field("");
        assert!(!doc.is_savable());
    }

    #[test]
    fn whitespace_name_is_not_savable() {
        let doc = doc_with_field("   ");
        assert!(!doc.is_savable());
    }

    #[test]
    fn named_form_with_only_empty_pages_is_not_savable() {
        let mut doc = FormDocument::new("X");
        doc.add_page();
        assert!(!doc.is_savable());
    }

    #[test]
    fn one_field_in_any_page_is_savable() {
        let mut doc = FormDocument::new("X");
        doc.add_page();
        doc.pages[1].fields.push(Field::new("text"));
        assert!(doc.is_savable());
    }

    #[test]
    fn validate_savable_reports_missing_name_first() {
        let doc = FormDocument::new("");
        let err = doc.validate_savable().unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    // -- page invariants -----------------------------------------------------

    #[test]
    fn new_document_has_one_empty_page() {
        let doc = FormDocument::new("X");
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.pages[0].page_name, "Page 1");
        assert!(doc.pages[0].fields.is_empty());
    }

    #[test]
    fn added_pages_are_named_by_position() {
        let mut doc = FormDocument::new("X");
        doc.add_page();
        doc.add_page();
        assert_eq!(doc.pages[1].page_name, "Page 2");
        assert_eq!(doc.pages[2].page_name, "Page 3");
    }

    #[test]
    fn removing_the_last_page_is_rejected() {
        let mut doc = FormDocument::new("X");
        assert!(doc.remove_page(0).is_err());
        assert_eq!(doc.pages.len(), 1);
    }

    #[test]
    fn removing_a_middle_page_preserves_order() {
        let mut doc = FormDocument::new("X");
        doc.add_page();
        doc.add_page();
        doc.remove_page(1).unwrap();
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.pages[1].page_name, "Page 3");
    }
}
