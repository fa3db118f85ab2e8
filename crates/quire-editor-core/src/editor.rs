//! The editor: mode state machine, command dispatch, and lifecycle.
//!
//! `RichTextEditor` owns the surface and is the only thing that writes to it.
//! All entry points take `&mut self`, so a value write and a mode transition
//! can never overlap.

use crate::binding::ValueBinding;
use crate::config::EditorConfig;
use crate::error::Result;
use crate::mode::EditorMode;
use crate::platform::{CommandExecutor, EditorSurface, ParagraphSeparator, SelectionSource};
use crate::selection::{AncestorChain, ancestor_chain};
use crate::toolbar::Toolbar;

/// Command name that flips between visual and source mode.
pub const TOGGLE_EDITOR_MODE: &str = "toggleEditorMode";

pub type ViewModeCallback = Box<dyn FnMut(bool)>;

pub struct RichTextEditor<S, C, T>
where
    S: EditorSurface + SelectionSource,
    C: CommandExecutor,
    T: Toolbar<S::Node>,
{
    id: String,
    config: EditorConfig,
    surface: S,
    commands: C,
    toolbar: T,
    binding: ValueBinding,
    mode: EditorMode,
    view_mode_listeners: Vec<ViewModeCallback>,
}

impl<S, C, T> std::fmt::Debug for RichTextEditor<S, C, T>
where
    S: EditorSurface + SelectionSource,
    C: CommandExecutor,
    T: Toolbar<S::Node>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RichTextEditor")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .field("binding", &self.binding)
            .field("view_mode_listeners", &self.view_mode_listeners.len())
            .finish_non_exhaustive()
    }
}

impl<S, C, T> RichTextEditor<S, C, T>
where
    S: EditorSurface + SelectionSource,
    C: CommandExecutor,
    T: Toolbar<S::Node>,
{
    pub fn new(
        id: impl Into<String>,
        config: EditorConfig,
        surface: S,
        commands: C,
        toolbar: T,
    ) -> Self {
        Self {
            id: id.into(),
            config,
            surface,
            commands,
            toolbar,
            binding: ValueBinding::new(),
            mode: EditorMode::Visual,
            view_mode_listeners: Vec::new(),
        }
    }

    // === Accessors ===

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn show_placeholder(&self) -> bool {
        self.binding.show_placeholder()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for host event plumbing (caret placement, simulated
    /// typing). Writes made here bypass the value pipeline; follow them with
    /// [`Self::on_content_change`].
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn commands(&self) -> &C {
        &self.commands
    }

    pub fn toolbar(&self) -> &T {
        &self.toolbar
    }

    // === Lifecycle ===

    /// One-time setup once the host elements exist.
    ///
    /// Setting `defaultParagraphSeparator` at all puts the host in `p` mode;
    /// the configured value only matters as a presence flag.
    pub fn init(&mut self) {
        self.toolbar.set_editor_id(&self.id);
        self.commands.set_upload_url(self.config.upload_url.as_deref());
        if self.config.default_paragraph_separator.is_some() {
            self.commands.set_paragraph_separator(ParagraphSeparator::P);
        }
        self.surface.set_content_editable(self.config.editable);
        self.binding.sync_placeholder(&mut self.surface);
        tracing::debug!(target: "quire::editor", id = %self.id, "editor initialised");
    }

    /// Apply font defaults after the first render.
    pub fn after_content_init(&mut self) {
        if let Some(font_name) = self.config.default_font_name.clone() {
            self.toolbar.set_font_name(&font_name);
            self.surface.focus_surface();
            self.commands.set_font_name(&font_name);
        }
        if let Some(font_size) = self.config.default_font_size.clone() {
            self.toolbar.set_font_size(&font_size);
            self.surface.focus_surface();
            self.commands.set_font_size(&font_size);
        }
    }

    // === Value binding ===

    pub fn register_on_change(&mut self, f: impl FnMut(&str) + 'static) {
        self.binding.register_on_change(f);
    }

    pub fn register_on_touched(&mut self, f: impl FnMut() + 'static) {
        self.binding.register_on_touched(f);
    }

    pub fn write_value(&mut self, value: Option<&str>) {
        self.binding.write_value(&mut self.surface, value);
    }

    pub fn set_disabled_state(&mut self, disabled: bool) {
        self.binding.set_disabled_state(&mut self.surface, disabled);
    }

    /// The user edited the surface; `html` is its current markup.
    pub fn on_content_change(&mut self, html: &str) {
        self.binding.on_content_change(&mut self.surface, html);
    }

    /// Re-read the surface and run the change pipeline with it.
    pub fn sync_from_surface(&mut self) {
        let html = self.surface.inner_html();
        self.on_content_change(&html);
    }

    /// The surface lost focus.
    pub fn on_blur(&mut self) {
        self.commands.save_selection();
        self.binding.touched();
    }

    /// Forward focus to the editable surface.
    pub fn on_focus(&mut self) {
        self.surface.focus_surface();
    }

    // === Mode ===

    /// Subscribe to mode changes: `true` when visual mode is entered,
    /// `false` when source mode is.
    pub fn on_view_mode(&mut self, f: impl FnMut(bool) + 'static) {
        self.view_mode_listeners.push(Box::new(f));
    }

    fn emit_view_mode(&mut self, visual: bool) {
        for listener in self.view_mode_listeners.iter_mut() {
            listener(visual);
        }
    }

    /// Run one mode transition. `to_source` is the caller's view of the
    /// current state: `true` means "we are visual, go to source".
    ///
    /// This does not consult [`Self::mode`]; calling it twice with the same
    /// flag performs the same transformation twice.
    pub fn toggle_editor_mode(&mut self, to_source: bool) -> Result<()> {
        if to_source {
            self.enter_source()?;
        } else {
            self.enter_visual()?;
        }
        self.toolbar.set_editor_mode(!self.mode.is_visual());
        Ok(())
    }

    fn enter_source(&mut self) -> Result<()> {
        let markup = self.surface.inner_html();
        self.surface.mount_source_block(&markup)?;
        self.surface.set_content_editable(false);
        self.commands.set_paragraph_separator(ParagraphSeparator::Div);

        self.mode = EditorMode::Source;
        tracing::debug!(
            target: "quire::editor",
            id = %self.id,
            len = markup.len(),
            "entered source mode"
        );
        self.emit_view_mode(false);
        self.surface.focus_source_block();
        Ok(())
    }

    fn enter_visual(&mut self) -> Result<()> {
        let backend = self.surface.serialize_backend();
        let markup = self.surface.serialize_source(backend)?;
        self.surface.set_inner_html(&markup);
        self.surface.set_content_editable(true);

        self.mode = EditorMode::Visual;
        tracing::debug!(
            target: "quire::editor",
            id = %self.id,
            ?backend,
            len = markup.len(),
            "entered visual mode"
        );
        self.emit_view_mode(true);

        let html = self.surface.inner_html();
        self.on_content_change(&html);
        self.surface.focus_surface();
        Ok(())
    }

    // === Commands ===

    /// Run a toolbar command.
    ///
    /// `"toggleEditorMode"` flips the mode, `""` only refocuses, and anything
    /// else goes to the command executor followed by a toolbar refresh.
    pub fn execute_command(&mut self, command: &str) -> Result<()> {
        match command {
            TOGGLE_EDITOR_MODE => self.toggle_editor_mode(self.mode.is_visual())?,
            "" => {}
            _ => {
                tracing::trace!(target: "quire::editor", command, "forwarding command");
                self.commands.execute(command);
                self.refresh_toolbar();
            }
        }
        self.surface.focus_surface();
        Ok(())
    }

    /// Recompute the ancestor chain under the caret and hand it to the toolbar.
    pub fn refresh_toolbar(&mut self) {
        self.toolbar.trigger_buttons();
        let chain = ancestor_chain(&self.surface);
        self.toolbar.trigger_blocks(&chain);
    }

    /// Ancestor chain under the caret, without notifying the toolbar.
    pub fn ancestor_chain(&self) -> AncestorChain<S::Node> {
        ancestor_chain(&self.surface)
    }
}
