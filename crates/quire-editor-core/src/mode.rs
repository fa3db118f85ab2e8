//! Editor modes

/// Editor mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditorMode {
    /// Rendered WYSIWYG editing
    #[default]
    Visual,
    /// Raw markup editing inside a code block
    Source,
}

impl EditorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditorMode::Visual => "VISUAL",
            EditorMode::Source => "SOURCE",
        }
    }

    /// Payload of the mode-change notification: `true` for visual.
    pub fn is_visual(&self) -> bool {
        matches!(self, EditorMode::Visual)
    }

    pub fn toggled(self) -> Self {
        match self {
            EditorMode::Visual => EditorMode::Source,
            EditorMode::Source => EditorMode::Visual,
        }
    }
}
