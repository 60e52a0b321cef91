//! Deterministic field-name derivation.
//!
//! Every field must carry a non-empty `name` before a document reaches any
//! consumer: submission payloads are keyed by it. Derivation is pure and
//! restartable: the same page content always yields the same names.

use crate::field::Field;
use crate::form::Page;

/// Derive a name from a field label: trim, collapse whitespace runs to
/// single underscores, lowercase. Returns `None` for empty or
/// whitespace-only labels.
pub fn name_from_label(label: &str) -> Option<String> {
    let parts: Vec<&str> = label.split_whitespace().collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("_").to_lowercase())
}

/// Positional fallback name for the field at the given 0-based index.
pub fn positional_name(index: usize) -> String {
    format!("field_{}", index + 1)
}

/// The derived name for one field, before collision handling:
/// an existing non-empty `name` wins, then the label, then the position.
fn candidate_name(field: &Field, index: usize) -> String {
    if field.is_named() {
        return field.name.clone();
    }
    field
        .label
        .as_deref()
        .and_then(name_from_label)
        .unwrap_or_else(|| positional_name(index))
}

/// Ensure every field in `page` has a non-empty, page-unique name.
///
/// The positional index resets at each page boundary, so this runs
/// per-page. Two fields deriving the same candidate are disambiguated with
/// deterministic `_2`, `_3`, ... suffixes in document order; explicit names
/// set by the user are never rewritten.
pub fn derive_page_field_names(page: &mut Page) {
    let mut used: Vec<String> = Vec::with_capacity(page.fields.len());
    for (index, field) in page.fields.iter_mut().enumerate() {
        let explicit = field.is_named();
        let mut name = candidate_name(field, index);
        if !explicit {
            let mut suffix = 2;
            while used.contains(&name) {
                name = format!("{}_{suffix}", candidate_name(field, index));
                suffix += 1;
            }
        }
        used.push(name.clone());
        field.name = name;
    }
}

/// Apply [`derive_page_field_names`] to every page of a document.
pub fn derive_field_names(pages: &mut [Page]) {
    for page in pages.iter_mut() {
        derive_page_field_names(page);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
