//! End-to-end behaviour of the editor over the in-memory host.

use std::cell::RefCell;
use std::rc::Rc;

use quire_editor_core::{
    CommandExecutor, EditorConfig, EditorMode, EditorSurface, FocusTarget, HeadlessEditor,
    MarkerTarget, MemorySurface, NodeId, PLACEHOLDER_CLASS, ParagraphSeparator, PlatformError,
    RecordingExecutor, RichTextEditor, SelectionSource, SerializeBackend, SmolStr,
    TOGGLE_EDITOR_MODE, ToolbarState,
};

fn editor() -> HeadlessEditor {
    HeadlessEditor::headless("editor", EditorConfig::default())
}

fn record_modes(editor: &mut HeadlessEditor) -> Rc<RefCell<Vec<bool>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    editor.on_view_mode(move |visual| sink.borrow_mut().push(visual));
    seen
}

// === Value binding ===

#[test]
fn blank_values_show_placeholder_and_render_nothing() {
    for raw in [None, Some(""), Some("<br>")] {
        let mut editor = editor();
        editor.write_value(Some("<p>something</p>"));
        editor.write_value(raw);

        assert!(editor.show_placeholder(), "raw = {raw:?}");
        assert_eq!(editor.surface().inner_html(), "");
        assert!(editor.surface().wrapper_has_class(PLACEHOLDER_CLASS));
    }
}

#[test]
fn non_blank_values_render_verbatim() {
    for raw in ["<p>Hello</p>", "plain text", "<br/>", "<br> ", "<div><br></div>"] {
        let mut editor = editor();
        editor.write_value(None);
        editor.write_value(Some(raw));

        assert!(!editor.show_placeholder(), "raw = {raw:?}");
        assert_eq!(editor.surface().inner_html(), raw);
    }
}

#[test]
fn user_edits_flow_out_through_on_change() {
    let mut editor = editor();
    let values = Rc::new(RefCell::new(Vec::<String>::new()));
    let sink = values.clone();
    editor.register_on_change(move |html| sink.borrow_mut().push(html.to_string()));

    editor.surface_mut().set_inner_html("<p>typed</p>");
    editor.sync_from_surface();
    editor.surface_mut().set_inner_html("<br>");
    editor.sync_from_surface();

    assert_eq!(
        *values.borrow(),
        vec!["<p>typed</p>".to_string(), "<br>".to_string()]
    );
    assert!(editor.show_placeholder());
}

#[test]
fn content_change_before_subscription_is_harmless() {
    let mut editor = editor();
    editor.on_content_change("<br>");
    assert!(editor.show_placeholder());
    editor.on_content_change("<p>x</p>");
    assert!(!editor.show_placeholder());
}

#[test]
fn blur_saves_selection_then_touches() {
    let mut editor = editor();
    editor.on_blur();
    assert_eq!(editor.commands().saved_selections, 1);

    let touched = Rc::new(RefCell::new(0));
    let sink = touched.clone();
    editor.register_on_touched(move || *sink.borrow_mut() += 1);
    editor.on_blur();
    assert_eq!(editor.commands().saved_selections, 2);
    assert_eq!(*touched.borrow(), 1);
}

// === Mode state machine ===

#[test]
fn source_mode_shows_markup_as_text() {
    let mut editor = editor();
    editor.write_value(Some("<p>Hi <b>there</b></p>"));
    editor.toggle_editor_mode(true).unwrap();

    assert_eq!(editor.mode(), EditorMode::Source);
    assert!(!editor.surface().is_content_editable());
    assert_eq!(editor.surface().focused(), Some(FocusTarget::SourceBlock));
    assert_eq!(
        editor.commands().paragraph_separator,
        Some(ParagraphSeparator::Div)
    );
    assert!(editor.toolbar().source_mode);

    insta::assert_snapshot!(
        editor.surface().inner_html(),
        @r#"<pre style="margin: 0; outline: none;"><code id="sourceText" style="white-space: pre-wrap; word-break: keep-all; margin: 0; outline: none; background-color: #fff5b9;" contenteditable="true">&lt;p&gt;Hi &lt;b&gt;there&lt;/b&gt;&lt;/p&gt;</code></pre>"#
    );
}

#[test]
fn toggle_command_ends_focused_on_surface() {
    let mut editor = editor();
    editor.write_value(Some("<p>x</p>"));
    editor.execute_command(TOGGLE_EDITOR_MODE).unwrap();
    assert_eq!(editor.mode(), EditorMode::Source);
    assert_eq!(editor.surface().focused(), Some(FocusTarget::Surface));
}

#[test]
fn round_trip_reproduces_markup_exactly() {
    let original = "<h1 class=\"t\">Title</h1><p>a &amp; b<br>c</p>";
    for backend in [SerializeBackend::Range, SerializeBackend::InnerText] {
        let mut editor = RichTextEditor::new(
            "editor",
            EditorConfig::default(),
            MemorySurface::new("editor").with_backend(backend),
            RecordingExecutor::default(),
            ToolbarState::new(),
        );
        editor.init();
        editor.write_value(Some(original));

        editor.execute_command(TOGGLE_EDITOR_MODE).unwrap();
        editor.execute_command(TOGGLE_EDITOR_MODE).unwrap();

        assert_eq!(editor.mode(), EditorMode::Visual);
        assert_eq!(editor.surface().inner_html(), original, "backend = {backend:?}");
        assert!(editor.surface().is_content_editable());
        assert_eq!(editor.surface().focused(), Some(FocusTarget::Surface));
        assert!(!editor.toolbar().source_mode);
    }
}

#[test]
fn source_edits_are_applied_and_emitted() {
    let mut editor = editor();
    let values = Rc::new(RefCell::new(Vec::<String>::new()));
    let sink = values.clone();
    editor.register_on_change(move |html| sink.borrow_mut().push(html.to_string()));
    editor.write_value(Some("<p>old</p>"));

    editor.execute_command(TOGGLE_EDITOR_MODE).unwrap();
    editor
        .surface_mut()
        .set_source_text("<p>new <i>text</i></p>")
        .unwrap();
    editor.execute_command(TOGGLE_EDITOR_MODE).unwrap();

    assert_eq!(editor.surface().inner_html(), "<p>new <i>text</i></p>");
    assert_eq!(*values.borrow(), vec!["<p>new <i>text</i></p>".to_string()]);
}

#[test]
fn clearing_source_shows_placeholder_on_return() {
    let mut editor = editor();
    editor.write_value(Some("<p>text</p>"));
    editor.execute_command(TOGGLE_EDITOR_MODE).unwrap();
    editor.surface_mut().set_source_text("").unwrap();
    editor.execute_command(TOGGLE_EDITOR_MODE).unwrap();

    assert_eq!(editor.surface().inner_html(), "");
    assert!(editor.show_placeholder());
}

#[test]
fn mode_notifications_fire_once_per_transition() {
    let mut editor = editor();
    let seen = record_modes(&mut editor);
    editor.write_value(Some("<p>x</p>"));

    editor.execute_command("").unwrap();
    editor.execute_command("bold").unwrap();
    assert!(seen.borrow().is_empty());

    editor.execute_command(TOGGLE_EDITOR_MODE).unwrap();
    assert_eq!(*seen.borrow(), vec![false]);
    editor.execute_command(TOGGLE_EDITOR_MODE).unwrap();
    assert_eq!(*seen.borrow(), vec![false, true]);
    editor.execute_command(TOGGLE_EDITOR_MODE).unwrap();
    assert_eq!(*seen.borrow(), vec![false, true, false]);
}

#[test]
fn raw_toggle_repeats_the_same_transformation() {
    let mut editor = editor();
    let seen = record_modes(&mut editor);
    editor.write_value(Some("<b>x</b>"));

    editor.toggle_editor_mode(true).unwrap();
    editor.toggle_editor_mode(true).unwrap();

    // The second pass escapes the already-escaped source view.
    assert_eq!(*seen.borrow(), vec![false, false]);
    let html = editor.surface().inner_html();
    assert!(html.contains("&amp;lt;b&amp;gt;x&amp;lt;/b&amp;gt;"), "{html}");
}

// === Commands and toolbar ===

#[test]
fn empty_command_only_refocuses() {
    let mut editor = editor();
    editor.write_value(Some("<p>x</p>"));
    let before_html = editor.surface().inner_html();
    let before_toolbar = editor.toolbar().clone();
    let before_commands = editor.commands().clone();

    editor.execute_command("").unwrap();

    assert_eq!(editor.surface().focused(), Some(FocusTarget::Surface));
    assert_eq!(editor.surface().inner_html(), before_html);
    assert_eq!(editor.toolbar(), &before_toolbar);
    assert_eq!(editor.commands(), &before_commands);
    assert_eq!(editor.mode(), EditorMode::Visual);
}

#[test]
fn formatting_commands_forward_and_refresh_toolbar() {
    let mut editor = editor();
    let surface = editor.surface_mut();
    let root = surface.root();
    let dom = surface.dom_mut();
    let p = dom.create_element("p");
    let b = dom.create_element("b");
    let text = dom.create_text("bold");
    dom.append_child(root, p);
    dom.append_child(p, b);
    dom.append_child(b, text);
    surface.set_caret(Some(text));

    editor.execute_command("bold").unwrap();

    assert_eq!(editor.commands().commands, vec!["bold".to_string()]);
    assert_eq!(editor.toolbar().refreshes, 1);
    assert!(editor.toolbar().active.bold);
    assert_eq!(editor.toolbar().active.block.as_deref(), Some("p"));
    assert_eq!(editor.surface().focused(), Some(FocusTarget::Surface));
}

#[test]
fn refresh_without_selection_clears_active_formats() {
    let mut editor = editor();
    editor.surface_mut().set_caret(None);
    editor.refresh_toolbar();
    assert!(editor.ancestor_chain().is_empty());
    assert!(!editor.toolbar().active.bold);
}

// === Lifecycle ===

#[test]
fn init_and_font_defaults_reach_collaborators() {
    let config = EditorConfig::from_json(
        r#"{
            "uploadUrl": "https://example.test/upload",
            "defaultParagraphSeparator": "p",
            "defaultFontName": "Arial",
            "defaultFontSize": "3"
        }"#,
    )
    .unwrap();
    let editor = HeadlessEditor::headless("my-editor", config);

    assert_eq!(editor.toolbar().editor_id, "my-editor");
    assert_eq!(
        editor.commands().upload_url.as_deref(),
        Some("https://example.test/upload")
    );
    assert_eq!(
        editor.commands().paragraph_separator,
        Some(ParagraphSeparator::P)
    );
    assert_eq!(editor.toolbar().font_name.as_deref(), Some("Arial"));
    assert_eq!(editor.commands().font_name.as_deref(), Some("Arial"));
    assert_eq!(editor.toolbar().font_size.as_deref(), Some("3"));
    assert_eq!(editor.commands().font_size.as_deref(), Some("3"));
    assert_eq!(editor.surface().focused(), Some(FocusTarget::Surface));
}

#[test]
fn any_configured_separator_forces_paragraphs() {
    let config = EditorConfig::from_json(r#"{"defaultParagraphSeparator": "div"}"#).unwrap();
    let editor = HeadlessEditor::headless("editor", config);
    assert_eq!(
        editor.commands().paragraph_separator,
        Some(ParagraphSeparator::P)
    );
}

#[test]
fn fresh_editor_shows_placeholder_over_empty_surface() {
    let editor = editor();
    assert_eq!(editor.surface().inner_html(), "");
    assert!(editor.show_placeholder());
    assert!(editor.surface().wrapper_has_class(PLACEHOLDER_CLASS));
}

#[test]
fn init_matches_placeholder_to_prefilled_surface() {
    let mut surface = MemorySurface::new("editor");
    surface.set_inner_html("<p>server rendered</p>");
    let mut editor = RichTextEditor::new(
        "editor",
        EditorConfig::default(),
        surface,
        RecordingExecutor::default(),
        ToolbarState::new(),
    );
    let changes = Rc::new(RefCell::new(0));
    let sink = changes.clone();
    editor.register_on_change(move |_| *sink.borrow_mut() += 1);

    editor.init();
    assert!(!editor.show_placeholder());
    assert!(!editor.surface().wrapper_has_class(PLACEHOLDER_CLASS));
    assert_eq!(*changes.borrow(), 0);
}

#[test]
fn no_defaults_means_no_font_calls() {
    let editor = editor();
    assert_eq!(editor.commands().font_name, None);
    assert_eq!(editor.commands().paragraph_separator, None);
    assert_eq!(editor.surface().focused(), None);
}

// === Host failures ===

/// Surface whose source block cannot be mounted.
struct BrokenSurface(MemorySurface);

impl EditorSurface for BrokenSurface {
    fn inner_html(&self) -> String {
        self.0.inner_html()
    }
    fn set_inner_html(&mut self, html: &str) {
        self.0.set_inner_html(html)
    }
    fn set_content_editable(&mut self, editable: bool) {
        self.0.set_content_editable(editable)
    }
    fn is_content_editable(&self) -> bool {
        self.0.is_content_editable()
    }
    fn mount_source_block(&mut self, _text: &str) -> Result<(), PlatformError> {
        Err("createElement failed".into())
    }
    fn serialize_source(&self, backend: SerializeBackend) -> Result<String, PlatformError> {
        self.0.serialize_source(backend)
    }
    fn set_marker(&mut self, target: MarkerTarget, class: &str, on: bool) {
        self.0.set_marker(target, class, on)
    }
    fn focus_surface(&mut self) {
        self.0.focus_surface()
    }
    fn focus_source_block(&mut self) {
        self.0.focus_source_block()
    }
}

impl SelectionSource for BrokenSurface {
    type Node = NodeId;

    fn focus_node(&self) -> Option<NodeId> {
        self.0.focus_node()
    }
    fn parent_node(&self, node: &NodeId) -> Option<NodeId> {
        self.0.parent_node(node)
    }
    fn is_editor_root(&self, node: &NodeId) -> bool {
        self.0.is_editor_root(node)
    }
    fn node_name(&self, node: &NodeId) -> SmolStr {
        self.0.node_name(node)
    }
}

#[test]
fn failed_transition_keeps_mode() {
    let mut editor = RichTextEditor::new(
        "editor",
        EditorConfig::default(),
        BrokenSurface(MemorySurface::new("editor")),
        RecordingExecutor::default(),
        ToolbarState::new(),
    );
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    editor.on_view_mode(move |visual| sink.borrow_mut().push(visual));

    let err = editor.execute_command(TOGGLE_EDITOR_MODE).unwrap_err();
    assert_eq!(err.to_string(), "platform error: createElement failed");
    assert_eq!(editor.mode(), EditorMode::Visual);
    assert!(seen.borrow().is_empty());
    assert!(!editor.toolbar().source_mode);
}

#[test]
fn recording_executor_is_a_command_executor() {
    let mut exec = RecordingExecutor::default();
    exec.set_upload_url(None);
    exec.execute("insertOrderedList");
    assert_eq!(exec.commands, vec!["insertOrderedList".to_string()]);
    assert_eq!(exec.upload_url, None);
}

#[test]
fn mode_switches_are_logged_against_the_editor() {
    use quire_editor_core::{LogCaptureLayer, clear_logs, logs_for};
    use tracing_subscriber::layer::SubscriberExt;

    let subscriber = tracing_subscriber::Registry::default().with(LogCaptureLayer);
    tracing::subscriber::with_default(subscriber, || {
        clear_logs();
        let mut editor = HeadlessEditor::headless("logged", EditorConfig::default());
        editor.write_value(Some("<p>x</p>"));
        editor.toggle_editor_mode(true).unwrap();

        let history = logs_for("logged");
        let lines: Vec<_> = history.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "[DEBUG] editor#logged: editor initialised");
        assert_eq!(lines[1], "[DEBUG] editor#logged: entered source mode, len=8");
        assert_eq!(logs_for("editor"), "");
    });
}
