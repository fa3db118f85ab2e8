//! Browser DOM host for the quire rich-text editor.
//!
//! Implements the core host traits over `web-sys`. It assumes a
//! `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `surface`: the contenteditable root, source block, and Selection API reads
//! - `commands`: `document.execCommand` formatting with selection save/restore
//!
//! # Re-exports
//!
//! This crate re-exports `quire-editor-core` for convenience, so consumers
//! only need to depend on `quire-editor-browser`.

// Re-export core crate
pub use quire_editor_core;
pub use quire_editor_core::*;

pub mod commands;
pub mod surface;

pub use commands::DocumentCommands;
pub use surface::{BrowserSurface, detect_serialize_backend};

/// Editor bound to live DOM elements, with a headless toolbar model.
pub type BrowserEditor = RichTextEditor<BrowserSurface, DocumentCommands, ToolbarState>;

/// Attach an editor to the root element `editor_id` inside `wrapper_id`,
/// then run both initialisation phases.
pub fn mount(
    editor_id: &str,
    wrapper_id: &str,
    config: EditorConfig,
) -> Result<BrowserEditor, EditorError> {
    let surface = BrowserSurface::from_ids(editor_id, wrapper_id)?;
    attach_surface(surface, config).map_err(EditorError::from)
}

/// Like [`mount`], for element handles the host already holds.
pub fn attach(
    root: web_sys::HtmlElement,
    wrapper: web_sys::HtmlElement,
    config: EditorConfig,
) -> Result<BrowserEditor, EditorError> {
    let surface = BrowserSurface::new(root, wrapper)?;
    attach_surface(surface, config).map_err(EditorError::from)
}

fn attach_surface(
    surface: BrowserSurface,
    config: EditorConfig,
) -> Result<BrowserEditor, PlatformError> {
    let commands = DocumentCommands::new(surface.document().clone())?;
    let id = surface.root().id();
    let mut editor = RichTextEditor::new(id, config, surface, commands, ToolbarState::new());
    editor.init();
    editor.after_content_init();
    Ok(editor)
}
