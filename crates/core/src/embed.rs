//! Embed code generation.
//!
//! Pure function of `(base_url, form_id)`: no state, no I/O beyond the
//! caller supplying the configured public base URL.

use serde::Serialize;

/// The three ways to embed a published form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedCode {
    /// Inline iframe snippet.
    pub iframe: String,
    /// Script-tag widget snippet.
    pub widget: String,
    /// Direct link to the hosted form.
    pub link: String,
}

/// Generate the embed snippets for a form hosted under `base_url`.
pub fn embed_code(base_url: &str, form_id: &str) -> EmbedCode {
    EmbedCode {
        iframe: format!(
            r#"<iframe src="{base_url}/embed/{form_id}" width="100%" height="500"></iframe>"#
        ),
        widget: format!(r#"<script src="{base_url}/widget.js" data-form-id="{form_id}"></script>"#),
        link: format!("{base_url}/embed/{form_id}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippets_embed_base_url_and_form_id() {
        let code = embed_code("http://localhost:5173", "abc-123");
        assert_eq!(
            code.iframe,
            r#"<iframe src="http://localhost:5173/embed/abc-123" width="100%" height="500"></iframe>"#
        );
        assert_eq!(
            code.widget,
            r#"<script src="http://localhost:5173/widget.js" data-form-id="abc-123"></script>"#
        );
        assert_eq!(code.link, "http://localhost:5173/embed/abc-123");
    }

    #[test]
    fn generation_is_stateless_and_repeatable() {
        let a = embed_code("https://forms.example.com", "f1");
        let b = embed_code("https://forms.example.com", "f1");
        assert_eq!(a, b);
    }
}
