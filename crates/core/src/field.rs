//! Form field model.
//!
//! A field's `type` is an open string so documents round-trip without data
//! loss: the known types below get dedicated rendering, anything else is
//! treated as a plain text input by consumers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Field type constants
// ---------------------------------------------------------------------------

pub const FIELD_TEXT: &str = "text";
pub const FIELD_TEXTAREA: &str = "textarea";
pub const FIELD_NUMBER: &str = "number";
pub const FIELD_DATE: &str = "date";
pub const FIELD_CHECKBOX: &str = "checkbox";
pub const FIELD_DROPDOWN: &str = "dropdown";
pub const FIELD_RADIO: &str = "radio";
pub const FIELD_FILE: &str = "file";
pub const FIELD_BUTTON: &str = "button";
pub const FIELD_SUBMIT: &str = "submit";
pub const FIELD_RESET: &str = "reset";

/// All field types with dedicated rendering.
pub const FIELD_TYPES: &[&str] = &[
    FIELD_TEXT,
    FIELD_TEXTAREA,
    FIELD_NUMBER,
    FIELD_DATE,
    FIELD_CHECKBOX,
    FIELD_DROPDOWN,
    FIELD_RADIO,
    FIELD_FILE,
    FIELD_BUTTON,
    FIELD_SUBMIT,
    FIELD_RESET,
];

/// Field types that carry an `options` list.
pub const CHOICE_FIELD_TYPES: &[&str] = &[FIELD_DROPDOWN, FIELD_RADIO];

/// Resolve a field type to the type consumers should render.
///
/// Unknown types fall back to a plain text input; the stored document keeps
/// the original string.
pub fn input_kind(field_type: &str) -> &str {
    if FIELD_TYPES.contains(&field_type) {
        field_type
    } else {
        FIELD_TEXT
    }
}

fn default_field_type() -> String {
    FIELD_TEXT.to_string()
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// A choice-field option: either a bare string or a `{value, label}` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldOption {
    Pair { value: String, label: String },
    Bare(String),
}

impl FieldOption {
    /// The submitted value for this option.
    pub fn value(&self) -> &str {
        match self {
            Self::Pair { value, .. } => value,
            Self::Bare(s) => s,
        }
    }

    /// The display label for this option.
    pub fn label(&self) -> &str {
        match self {
            Self::Pair { label, .. } => label,
            Self::Bare(s) => s,
        }
    }
}

// ---------------------------------------------------------------------------
// Props
// ---------------------------------------------------------------------------

/// Auxiliary field attributes. `required` is the only one the core reads;
/// everything else passes through untouched for renderers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldProps {
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl FieldProps {
    pub fn is_default(&self) -> bool {
        !self.required && self.extra.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// A single input descriptor.
///
/// `name` is the stable submission key, unique within a page. An empty
/// `name` means "not yet derived"; the name deriver guarantees it is
/// non-empty before the field reaches any consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,

    #[serde(default, skip_serializing_if = "FieldProps::is_default")]
    pub props: FieldProps,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl Default for Field {
    fn default() -> Self {
        Field {
            field_type: default_field_type(),
            label: None,
            name: String::new(),
            options: Vec::new(),
            props: FieldProps::default(),
            validation: None,
            default: None,
            style: None,
        }
    }
}

impl Field {
    /// A bare field of the given type with no label or name.
    pub fn new(field_type: &str) -> Self {
        Field {
            field_type: field_type.to_string(),
            ..Field::default()
        }
    }

    /// Whether this field type carries an options list.
    pub fn is_choice(&self) -> bool {
        CHOICE_FIELD_TYPES.contains(&self.field_type.as_str())
    }

    /// Whether the field already has a stable name.
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
