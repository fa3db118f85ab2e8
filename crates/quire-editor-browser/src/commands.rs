//! Formatting commands via `document.execCommand`.

use quire_editor_core::{CommandExecutor, ParagraphSeparator, PlatformError};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlDocument, Range};

/// Commands applied with `formatBlock` instead of their own name.
const FORMAT_BLOCK_COMMANDS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "p", "pre"];

/// Command executor backed by the live document.
pub struct DocumentCommands {
    document: HtmlDocument,
    saved_range: Option<Range>,
    upload_url: Option<String>,
}

impl DocumentCommands {
    pub fn new(document: Document) -> Result<Self, PlatformError> {
        let document = document
            .dyn_into::<HtmlDocument>()
            .map_err(|_| "document is not an HTML document")?;
        Ok(Self {
            document,
            saved_range: None,
            upload_url: None,
        })
    }

    /// Executor for the current window's document.
    pub fn from_window() -> Result<Self, PlatformError> {
        let document = web_sys::window()
            .ok_or("no window")?
            .document()
            .ok_or("no document")?;
        Self::new(document)
    }

    pub fn upload_url(&self) -> Option<&str> {
        self.upload_url.as_deref()
    }

    /// The range captured by the last [`CommandExecutor::save_selection`].
    pub fn saved_range(&self) -> Option<&Range> {
        self.saved_range.as_ref()
    }

    fn exec(&self, command: &str, value: Option<&str>) {
        let result = match value {
            Some(value) => self
                .document
                .exec_command_with_show_ui_and_value(command, false, value),
            None => self.document.exec_command(command),
        };
        match result {
            Ok(true) => tracing::trace!(command, value, "exec_command applied"),
            Ok(false) => tracing::debug!(command, "exec_command not supported"),
            Err(e) => tracing::warn!(command, "exec_command failed: {:?}", e),
        }
    }

    fn restore_selection(&self) -> Result<(), PlatformError> {
        let Some(range) = &self.saved_range else {
            return Ok(());
        };
        let selection = web_sys::window()
            .ok_or("no window")?
            .get_selection()
            .map_err(|e| format!("get_selection failed: {:?}", e))?
            .ok_or("no selection object")?;
        selection
            .remove_all_ranges()
            .map_err(|e| format!("remove_all_ranges failed: {:?}", e))?;
        selection
            .add_range(range)
            .map_err(|e| format!("add_range failed: {:?}", e))?;
        Ok(())
    }
}

impl CommandExecutor for DocumentCommands {
    fn execute(&mut self, command: &str) {
        if let Err(e) = self.restore_selection() {
            tracing::warn!(command, "selection restore failed: {}", e);
        }
        if FORMAT_BLOCK_COMMANDS.contains(&command) {
            self.exec("formatBlock", Some(command));
        } else {
            self.exec(command, None);
        }
    }

    fn set_paragraph_separator(&mut self, separator: ParagraphSeparator) {
        self.exec("defaultParagraphSeparator", Some(separator.as_str()));
    }

    fn set_font_name(&mut self, name: &str) {
        self.exec("fontName", Some(name));
    }

    fn set_font_size(&mut self, size: &str) {
        self.exec("fontSize", Some(size));
    }

    fn save_selection(&mut self) {
        self.saved_range = web_sys::window()
            .and_then(|w| w.get_selection().ok().flatten())
            .filter(|s| s.range_count() > 0)
            .and_then(|s| s.get_range_at(0).ok());
        tracing::trace!(saved = self.saved_range.is_some(), "selection saved");
    }

    fn set_upload_url(&mut self, url: Option<&str>) {
        self.upload_url = url.map(str::to_string);
    }
}
