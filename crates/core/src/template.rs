//! Premade form templates.
//!
//! A static catalog of starter forms. Templates express their content the
//! legacy way (per-page field arrays), so instantiation runs the shape
//! normalizer like any other boundary input.

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::field::{Field, FieldOption, FieldProps, FIELD_DATE, FIELD_DROPDOWN, FIELD_NUMBER, FIELD_TEXT};
use crate::form::{FormDocument, FormSettings};
use crate::normalize::{normalize_pages, PageSource};
use crate::naming::derive_field_names;

/// A premade template: a name plus page content in either representation.
#[derive(Debug, Clone, Serialize)]
pub struct FormTemplate {
    pub name: String,
    pub pages: PageSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<FormSettings>,
}

fn required_field(field_type: &str, label: &str) -> Field {
    Field {
        label: Some(label.to_string()),
        props: FieldProps {
            required: true,
            ..FieldProps::default()
        },
        ..Field::new(field_type)
    }
}

fn choice_field(field_type: &str, label: &str, options: &[&str]) -> Field {
    Field {
        options: options
            .iter()
            .map(|o| FieldOption::Bare(o.to_string()))
            .collect(),
        ..required_field(field_type, label)
    }
}

/// The premade template catalog.
pub fn premade_templates() -> Vec<FormTemplate> {
    vec![
        FormTemplate {
            name: "License Application".to_string(),
            pages: PageSource::Flat(vec![vec![
                required_field(FIELD_TEXT, "Full Name"),
                required_field(FIELD_DATE, "Date of Birth"),
                choice_field(FIELD_DROPDOWN, "License Type", &["A", "B", "C"]),
            ]]),
            settings: None,
        },
        FormTemplate {
            name: "Payment Request".to_string(),
            pages: PageSource::Flat(vec![vec![
                required_field(FIELD_NUMBER, "Amount"),
                choice_field(
                    FIELD_DROPDOWN,
                    "Payment Method",
                    &["Credit Card", "Bank Transfer"],
                ),
            ]]),
            settings: None,
        },
    ]
}

/// Look up a premade template by exact name.
pub fn find_template(name: &str) -> CoreResult<FormTemplate> {
    premade_templates()
        .into_iter()
        .find(|t| t.name == name)
        .ok_or(CoreError::NotFound {
            entity: "Template",
            id: name.to_string(),
        })
}

/// Produce a new document from a template, ready for the create operation:
/// normalized pages with derived field names, unpublished, empty settings
/// unless the template overrides them, no id yet.
pub fn instantiate(template: &FormTemplate) -> FormDocument {
    let mut pages = normalize_pages(Some(template.pages.clone()));
    derive_field_names(&mut pages);

    FormDocument {
        pages,
        settings: template.settings.clone().unwrap_or_default(),
        ..FormDocument::new(&template.name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
