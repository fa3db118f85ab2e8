//! Toolbar synchronization.
//!
//! The toolbar is an external collaborator: the editor tells it the mode,
//! the font defaults, and the ancestor chain under the caret, and the toolbar
//! decides which buttons are active. [`ToolbarState`] is a headless
//! implementation that hosts can render from directly.

use serde::Serialize;
use smol_str::SmolStr;

use crate::selection::AncestorChain;

/// Receiver of editor state for a formatting toolbar.
pub trait Toolbar<N> {
    /// Id of the editor this toolbar drives.
    fn set_editor_id(&mut self, id: &str);

    /// `true` while the editor is in source mode; formatting controls should
    /// be disabled until it is `false` again.
    fn set_editor_mode(&mut self, source: bool);

    /// Re-query per-command state after a command ran.
    fn trigger_buttons(&mut self);

    /// New ancestor chain under the caret, outermost first.
    fn trigger_blocks(&mut self, chain: &AncestorChain<N>);

    /// Font name shown in the font picker.
    fn set_font_name(&mut self, name: &str);

    /// Font size shown in the size picker.
    fn set_font_size(&mut self, size: &str);
}

const BLOCK_TAGS: &[&str] = &[
    "p",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "pre",
    "blockquote",
    "div",
];

/// Inline and block formats present under the caret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveFormats {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub subscript: bool,
    pub superscript: bool,
    pub ordered_list: bool,
    pub unordered_list: bool,
    pub link: bool,
    /// Innermost block element (`p`, `h1`..`h6`, `pre`, `blockquote`, `div`).
    pub block: Option<SmolStr>,
}

impl ActiveFormats {
    /// Derive formats from a chain's node names.
    pub fn from_chain<N>(chain: &AncestorChain<N>) -> Self {
        let mut formats = ActiveFormats::default();
        for name in chain.names() {
            let name = name.to_ascii_lowercase();
            match name.as_str() {
                "b" | "strong" => formats.bold = true,
                "i" | "em" => formats.italic = true,
                "u" => formats.underline = true,
                "s" | "strike" | "del" => formats.strikethrough = true,
                "sub" => formats.subscript = true,
                "sup" => formats.superscript = true,
                "ol" => formats.ordered_list = true,
                "ul" => formats.unordered_list = true,
                "a" => formats.link = true,
                // Outermost first, so later blocks are nested deeper.
                tag if BLOCK_TAGS.contains(&tag) => formats.block = Some(SmolStr::new(tag)),
                _ => {}
            }
        }
        formats
    }
}

/// Headless toolbar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolbarState {
    pub editor_id: String,
    pub source_mode: bool,
    pub active: ActiveFormats,
    pub font_name: Option<String>,
    pub font_size: Option<String>,
    /// Bumped on every `trigger_buttons` so renderers know to re-query.
    pub refreshes: u64,
}

impl ToolbarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Formatting buttons are usable only in visual mode.
    pub fn formatting_enabled(&self) -> bool {
        !self.source_mode
    }
}

impl<N> Toolbar<N> for ToolbarState {
    fn set_editor_id(&mut self, id: &str) {
        self.editor_id = id.to_string();
    }

    fn set_editor_mode(&mut self, source: bool) {
        self.source_mode = source;
        if source {
            self.active = ActiveFormats::default();
        }
    }

    fn trigger_buttons(&mut self) {
        self.refreshes += 1;
    }

    fn trigger_blocks(&mut self, chain: &AncestorChain<N>) {
        self.active = ActiveFormats::from_chain(chain);
    }

    fn set_font_name(&mut self, name: &str) {
        self.font_name = Some(name.to_string());
    }

    fn set_font_size(&mut self, size: &str) {
        self.font_size = Some(size.to_string());
    }
}
