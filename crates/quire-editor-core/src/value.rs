//! The bound form value and its normalization.

/// Markup a contenteditable region leaves behind when the user clears it.
pub const LINE_BREAK: &str = "<br>";

/// Whether `html` counts as an empty document.
///
/// Missing values, the empty string, and a lone line break all collapse to
/// the same empty state.
pub fn is_blank_markup(html: Option<&str>) -> bool {
    match html {
        None => true,
        Some(s) => s.is_empty() || s == LINE_BREAK,
    }
}

/// Normalized editor value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorValue {
    #[default]
    Empty,
    Html(String),
}

impl EditorValue {
    /// Normalize a raw external value.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if !is_blank_markup(Some(s)) => EditorValue::Html(s.to_string()),
            _ => EditorValue::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, EditorValue::Empty)
    }

    /// Markup to put on the surface. Empty renders as the empty string.
    pub fn as_markup(&self) -> &str {
        match self {
            EditorValue::Empty => "",
            EditorValue::Html(s) => s,
        }
    }
}

impl From<Option<&str>> for EditorValue {
    fn from(raw: Option<&str>) -> Self {
        EditorValue::from_raw(raw)
    }
}

impl From<&str> for EditorValue {
    fn from(raw: &str) -> Self {
        EditorValue::from_raw(Some(raw))
    }
}
