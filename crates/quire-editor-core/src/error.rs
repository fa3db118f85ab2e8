//! Error types for the editor engine

use miette::{Diagnostic, NamedSource, SourceOffset, SourceSpan};

use crate::platform::PlatformError;

/// Main error type for editor operations
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum EditorError {
    /// Host DOM operation failed
    #[error("platform error: {0}")]
    #[diagnostic(code(quire::platform))]
    Platform(#[from] PlatformError),

    /// Configuration could not be parsed
    #[error(transparent)]
    #[diagnostic_source]
    Config(#[from] ConfigError),
}

/// Configuration parse error with source location
#[derive(thiserror::Error, Debug, Diagnostic)]
#[error("invalid editor config: {message}")]
#[diagnostic(code(quire::config))]
pub struct ConfigError {
    message: String,
    #[source_code]
    src: NamedSource<String>,
    #[label("here")]
    location: SourceSpan,
    #[help]
    advice: Option<String>,
}

impl ConfigError {
    /// Build from a `serde_json` failure on `input`.
    pub fn from_json(err: &serde_json::Error, name: &str, input: &str) -> Self {
        // serde_json reports 1-based lines and columns; 0 means "unknown".
        let offset = if err.line() == 0 {
            0
        } else {
            SourceOffset::from_location(input, err.line(), err.column().max(1)).offset()
        };
        let advice = match err.classify() {
            serde_json::error::Category::Data => {
                Some("check the option's type against EditorConfig".to_string())
            }
            serde_json::error::Category::Syntax | serde_json::error::Category::Eof => {
                Some("the config must be a single JSON object".to_string())
            }
            serde_json::error::Category::Io => None,
        };
        Self {
            message: err.to_string(),
            src: NamedSource::new(name, input.to_string()),
            location: SourceSpan::new(offset.into(), 0),
            advice,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn offset(&self) -> usize {
        self.location.offset()
    }
}

pub type Result<T, E = EditorError> = std::result::Result<T, E>;
