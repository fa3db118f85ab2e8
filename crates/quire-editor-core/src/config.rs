use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, EditorError};
use crate::platform::ParagraphSeparator;

/// Editor options, read once when the editor is initialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Whether the surface starts out editable.
    pub editable: bool,
    /// Browser spellcheck hint for the surface.
    pub spellcheck: bool,
    /// Text shown while the editor is empty.
    pub placeholder: String,
    /// Whether hosts should render the toolbar at all.
    pub show_toolbar: bool,
    /// Endpoint forwarded to the upload collaborator.
    pub upload_url: Option<String>,
    /// When set, `init` forces `p` paragraphs regardless of the value.
    pub default_paragraph_separator: Option<ParagraphSeparator>,
    /// Applied once after first render.
    pub default_font_name: Option<String>,
    /// Applied once after first render.
    pub default_font_size: Option<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            editable: true,
            spellcheck: true,
            placeholder: String::new(),
            show_toolbar: true,
            upload_url: None,
            default_paragraph_separator: None,
            default_font_name: None,
            default_font_size: None,
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config object. Unknown keys are ignored.
    pub fn from_json(input: &str) -> Result<Self, EditorError> {
        serde_json::from_str(input).map_err(|e| {
            tracing::warn!(target: "quire::config", error = %e, "rejecting editor config");
            ConfigError::from_json(&e, "editor config", input).into()
        })
    }

    pub fn to_json(&self) -> String {
        // Plain struct of strings and bools; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}
