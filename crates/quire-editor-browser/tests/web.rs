//! WASM browser tests for quire-editor-browser.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use quire_editor_browser::{
    BrowserEditor, DISABLED_CLASS, EditorConfig, EditorMode, EditorSurface, PLACEHOLDER_CLASS,
    SOURCE_BLOCK_ID, SerializeBackend, TOGGLE_EDITOR_MODE, detect_serialize_backend, mount,
};
use web_sys::{Document, Element};

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Append `div#<id>-wrapper > div#<id>` to the body and mount an editor on it.
fn mount_fixture(id: &str) -> (BrowserEditor, Element, Element) {
    let document = document();
    let wrapper = document.create_element("div").unwrap();
    wrapper.set_id(&format!("{id}-wrapper"));
    let root = document.create_element("div").unwrap();
    root.set_id(id);
    wrapper.append_child(&root).unwrap();
    document.body().unwrap().append_child(&wrapper).unwrap();

    let editor = mount(id, &format!("{id}-wrapper"), EditorConfig::default()).unwrap();
    (editor, root, wrapper)
}

// === Surface ===

#[wasm_bindgen_test]
fn test_mount_makes_root_editable() {
    let (editor, root, _) = mount_fixture("mount-editable");
    assert_eq!(root.get_attribute("contenteditable").as_deref(), Some("true"));
    assert!(editor.surface().is_content_editable());
}

#[wasm_bindgen_test]
fn test_mount_on_empty_root_shows_placeholder() {
    let (editor, _, wrapper) = mount_fixture("mount-placeholder");
    assert!(editor.show_placeholder());
    assert!(wrapper.class_list().contains(PLACEHOLDER_CLASS));
}

#[wasm_bindgen_test]
fn test_mount_missing_element_fails() {
    let err = mount("no-such-editor", "no-such-wrapper", EditorConfig::default()).unwrap_err();
    assert!(err.to_string().contains("no-such-editor"));
}

#[wasm_bindgen_test]
fn test_modern_engines_use_range_serializer() {
    assert_eq!(detect_serialize_backend(&document()), SerializeBackend::Range);
}

// === Value binding ===

#[wasm_bindgen_test]
fn test_write_value_renders_markup() {
    let (mut editor, root, wrapper) = mount_fixture("write-value");
    editor.write_value(Some("<p>Hello</p>"));
    assert_eq!(root.inner_html(), "<p>Hello</p>");
    assert!(!wrapper.class_list().contains(PLACEHOLDER_CLASS));
}

#[wasm_bindgen_test]
fn test_blank_value_shows_placeholder() {
    let (mut editor, root, wrapper) = mount_fixture("blank-value");
    editor.write_value(Some("<br>"));
    assert_eq!(root.inner_html(), "");
    assert!(wrapper.class_list().contains(PLACEHOLDER_CLASS));
    assert!(editor.show_placeholder());
}

#[wasm_bindgen_test]
fn test_disabled_state_toggles_class() {
    let (mut editor, root, _) = mount_fixture("disabled");
    editor.set_disabled_state(true);
    assert!(root.class_list().contains(DISABLED_CLASS));
    editor.set_disabled_state(false);
    assert!(!root.class_list().contains(DISABLED_CLASS));
}

// === Mode ===

#[wasm_bindgen_test]
fn test_source_mode_round_trip() {
    let (mut editor, root, _) = mount_fixture("round-trip");
    let markup = "<p>Hi <b>there</b></p>";
    editor.write_value(Some(markup));

    editor.execute_command(TOGGLE_EDITOR_MODE).unwrap();
    assert_eq!(editor.mode(), EditorMode::Source);
    assert_eq!(root.get_attribute("contenteditable").as_deref(), Some("false"));
    let code = document().get_element_by_id(SOURCE_BLOCK_ID).unwrap();
    assert_eq!(code.text_content().as_deref(), Some(markup));
    assert!(root.contains(Some(&code)));

    editor.execute_command(TOGGLE_EDITOR_MODE).unwrap();
    assert_eq!(editor.mode(), EditorMode::Visual);
    assert_eq!(root.inner_html(), markup);
    assert!(document().get_element_by_id(SOURCE_BLOCK_ID).is_none());
}

// === Selection ===

#[wasm_bindgen_test]
fn test_caret_inside_bold_updates_toolbar() {
    let (mut editor, root, _) = mount_fixture("caret-bold");
    editor.write_value(Some("<p>plain <b>bold</b></p>"));

    let text = root.query_selector("b").unwrap().unwrap().first_child().unwrap();
    let range = document().create_range().unwrap();
    range.select_node_contents(&text).unwrap();
    let selection = web_sys::window().unwrap().get_selection().unwrap().unwrap();
    selection.remove_all_ranges().unwrap();
    selection.add_range(&range).unwrap();

    let chain = editor.ancestor_chain();
    assert_eq!(chain.names().collect::<Vec<_>>(), vec!["p", "b", "#text"]);
    editor.refresh_toolbar();
    assert!(editor.toolbar().active.bold);
    assert_eq!(editor.toolbar().active.block.as_deref(), Some("p"));
}
