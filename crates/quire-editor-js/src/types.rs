//! Types exposed to JavaScript via wasm-bindgen.

use quire_editor_browser::{ActiveFormats, ToolbarState};
use serde::Serialize;
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

/// Formats present under the caret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsActiveFormats {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub subscript: bool,
    pub superscript: bool,
    pub ordered_list: bool,
    pub unordered_list: bool,
    pub link: bool,
    /// Innermost block tag, e.g. `"p"` or `"h2"`.
    pub block: Option<String>,
}

impl From<&ActiveFormats> for JsActiveFormats {
    fn from(formats: &ActiveFormats) -> Self {
        Self {
            bold: formats.bold,
            italic: formats.italic,
            underline: formats.underline,
            strikethrough: formats.strikethrough,
            subscript: formats.subscript,
            superscript: formats.superscript,
            ordered_list: formats.ordered_list,
            unordered_list: formats.unordered_list,
            link: formats.link,
            block: formats.block.as_ref().map(|b| b.to_string()),
        }
    }
}

/// Snapshot of the toolbar model for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsToolbarState {
    pub editor_id: String,
    pub source_mode: bool,
    /// Formatting buttons are disabled while editing source.
    pub formatting_enabled: bool,
    pub active: JsActiveFormats,
    pub font_name: Option<String>,
    pub font_size: Option<String>,
}

impl From<&ToolbarState> for JsToolbarState {
    fn from(state: &ToolbarState) -> Self {
        Self {
            editor_id: state.editor_id.clone(),
            source_mode: state.source_mode,
            formatting_enabled: state.formatting_enabled(),
            active: JsActiveFormats::from(&state.active),
            font_name: state.font_name.clone(),
            font_size: state.font_size.clone(),
        }
    }
}
