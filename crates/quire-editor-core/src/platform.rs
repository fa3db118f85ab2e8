//! Platform abstraction traits for the editor engine.
//!
//! These traits define the interface between the synchronization engine and
//! platform-specific hosts (browser DOM, the in-memory DOM, native UI). The
//! engine never touches a document directly; every read and write of the
//! editable region goes through [`EditorSurface`], every formatting operation
//! through [`CommandExecutor`], and every caret lookup through
//! [`SelectionSource`].

use smol_str::SmolStr;

/// Error type for platform operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformError(pub String);

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for PlatformError {}

impl From<&str> for PlatformError {
    fn from(s: &str) -> Self {
        PlatformError(s.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(s: String) -> Self {
        PlatformError(s)
    }
}

/// Id of the code block mounted in source mode.
pub const SOURCE_BLOCK_ID: &str = "sourceText";

/// Inline style of the `pre` wrapping the source block.
pub const SOURCE_PRE_STYLE: &str = "margin: 0; outline: none;";

/// Inline style of the source `code` block.
pub const SOURCE_CODE_STYLE: &str = "white-space: pre-wrap; word-break: keep-all; margin: 0; outline: none; background-color: #fff5b9;";

/// Which element a presentation class is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerTarget {
    /// The editable region itself.
    Surface,
    /// The container wrapping the surface and the placeholder.
    Wrapper,
}

/// How the source block's text is turned back into surface markup.
///
/// Hosts pick one by feature detection. Both must yield the literal text that
/// was captured on entry into source mode, plus whatever the user typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SerializeBackend {
    /// Read the rendered text of the whole surface in one call.
    InnerText,
    /// Select the contents of the surface's first child and stringify the range.
    #[default]
    Range,
}

/// Paragraph element the host inserts on Enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParagraphSeparator {
    #[default]
    P,
    Div,
}

impl ParagraphSeparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParagraphSeparator::P => "p",
            ParagraphSeparator::Div => "div",
        }
    }
}

/// The single editable region owned by the editor.
///
/// Only the value binding and the mode state machine write through this
/// trait, and both are reached via `&mut RichTextEditor`, so writes never
/// interleave.
pub trait EditorSurface {
    /// Current inner markup of the surface.
    fn inner_html(&self) -> String;

    /// Replace the surface's inner markup. The host parses it as it sees fit.
    fn set_inner_html(&mut self, html: &str);

    /// Toggle `contentEditable` on the surface.
    fn set_content_editable(&mut self, editable: bool);

    /// Whether the surface currently accepts edits.
    fn is_content_editable(&self) -> bool;

    /// Clear the surface and mount `pre > code#sourceText` holding `text`
    /// as a literal text node. The code block is independently editable.
    fn mount_source_block(&mut self, text: &str) -> Result<(), PlatformError>;

    /// Serialize the source block back into markup using `backend`.
    fn serialize_source(&self, backend: SerializeBackend) -> Result<String, PlatformError>;

    /// The backend this host supports, detected once by the host.
    fn serialize_backend(&self) -> SerializeBackend {
        SerializeBackend::Range
    }

    /// Add or remove a presentation class.
    fn set_marker(&mut self, target: MarkerTarget, class: &str, on: bool);

    /// Move focus to the surface.
    fn focus_surface(&mut self);

    /// Move focus into the mounted source block.
    fn focus_source_block(&mut self);
}

/// Read access to the caret and the node tree around it.
pub trait SelectionSource {
    /// Node handle. Cheap to clone (an id or a refcounted DOM handle).
    type Node: Clone;

    /// Node holding the selection focus, if there is a selection at all.
    fn focus_node(&self) -> Option<Self::Node>;

    /// Parent of `node`, if any.
    fn parent_node(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Whether `node` is the editor root element.
    fn is_editor_root(&self, node: &Self::Node) -> bool;

    /// Lowercase node name: a tag name for elements, `#text` for text nodes.
    fn node_name(&self, node: &Self::Node) -> SmolStr;
}

/// Formatting command port.
///
/// In a browser this is `document.execCommand` plus selection bookkeeping;
/// the engine only names what should happen.
pub trait CommandExecutor {
    /// Apply a named formatting command to the current selection.
    fn execute(&mut self, command: &str);

    /// Set the element inserted on paragraph breaks.
    fn set_paragraph_separator(&mut self, separator: ParagraphSeparator);

    fn set_font_name(&mut self, name: &str);

    fn set_font_size(&mut self, size: &str);

    /// Remember the current selection so a later toolbar command can restore it.
    fn save_selection(&mut self);

    /// Endpoint used by the upload collaborator.
    fn set_upload_url(&mut self, url: Option<&str>);
}
