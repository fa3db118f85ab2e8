//! quire-editor-core: the rich-text editor's state synchronization engine,
//! without framework dependencies.
//!
//! This crate provides:
//! - `EditorSurface`, `SelectionSource`, `CommandExecutor` - host traits
//! - `ValueBinding` - form-control value contract with empty normalization
//! - `PlaceholderController` - placeholder visibility
//! - `RichTextEditor` - visual/source mode state machine and command dispatch
//! - `ancestor_chain` / `Toolbar` - caret-driven toolbar state
//! - `MemorySurface` - an in-memory DOM host for headless use and tests

pub mod binding;
pub mod config;
pub mod dom;
pub mod editor;
pub mod error;
pub mod log_buffer;
pub mod mode;
pub mod placeholder;
pub mod platform;
pub mod selection;
pub mod toolbar;
pub mod value;

pub use binding::{DISABLED_CLASS, ValueBinding};
pub use config::EditorConfig;
pub use dom::{FocusTarget, MemoryDom, MemorySurface, NodeId};
pub use editor::{RichTextEditor, TOGGLE_EDITOR_MODE};
pub use error::{ConfigError, EditorError};
pub use log_buffer::{LOG_CAPACITY, LogCaptureLayer, LogEntry, clear_logs, get_logs, logs_for};
pub use mode::EditorMode;
pub use placeholder::{PLACEHOLDER_CLASS, PlaceholderController};
pub use platform::{
    CommandExecutor, EditorSurface, MarkerTarget, ParagraphSeparator, PlatformError,
    SOURCE_BLOCK_ID, SOURCE_CODE_STYLE, SOURCE_PRE_STYLE, SelectionSource, SerializeBackend,
};
pub use selection::{AncestorChain, ChainEntry, ancestor_chain};
pub use smol_str::SmolStr;
pub use toolbar::{ActiveFormats, Toolbar, ToolbarState};
pub use value::{EditorValue, LINE_BREAK, is_blank_markup};

/// Command executor that records what it was asked to do.
///
/// Useful for headless hosts that apply formatting elsewhere, and for tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingExecutor {
    pub commands: Vec<String>,
    pub paragraph_separator: Option<ParagraphSeparator>,
    pub font_name: Option<String>,
    pub font_size: Option<String>,
    pub upload_url: Option<String>,
    pub saved_selections: usize,
}

impl CommandExecutor for RecordingExecutor {
    fn execute(&mut self, command: &str) {
        self.commands.push(command.to_string());
    }

    fn set_paragraph_separator(&mut self, separator: ParagraphSeparator) {
        self.paragraph_separator = Some(separator);
    }

    fn set_font_name(&mut self, name: &str) {
        self.font_name = Some(name.to_string());
    }

    fn set_font_size(&mut self, size: &str) {
        self.font_size = Some(size.to_string());
    }

    fn save_selection(&mut self) {
        self.saved_selections += 1;
    }

    fn set_upload_url(&mut self, url: Option<&str>) {
        self.upload_url = url.map(str::to_string);
    }
}

/// Editor over the in-memory host, with a headless toolbar.
pub type HeadlessEditor = RichTextEditor<MemorySurface, RecordingExecutor, ToolbarState>;

impl HeadlessEditor {
    /// Build and initialise a headless editor whose root element is `id`.
    pub fn headless(id: &str, config: EditorConfig) -> Self {
        let mut editor = RichTextEditor::new(
            id,
            config,
            MemorySurface::new(id),
            RecordingExecutor::default(),
            ToolbarState::new(),
        );
        editor.init();
        editor.after_content_init();
        editor
    }
}
