//! QuireEditor - the form-control wrapper for JavaScript.

use quire_editor_browser::{BrowserEditor, EditorConfig, EditorError, attach, mount};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::types::JsToolbarState;

/// A rich-text editor bound to DOM elements, shaped like a form control.
#[wasm_bindgen]
pub struct QuireEditor {
    inner: BrowserEditor,
    on_toolbar_change: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl QuireEditor {
    /// Attach to the root element `editorId` inside `wrapperId`.
    ///
    /// `config` may be omitted, a JSON string, or a plain object.
    #[wasm_bindgen(constructor)]
    pub fn new(
        editor_id: &str,
        wrapper_id: &str,
        config: JsValue,
    ) -> Result<QuireEditor, JsError> {
        let config = parse_config(&config)?;
        let inner = mount(editor_id, wrapper_id, config).map_err(to_js_error)?;
        Ok(Self::wrap(inner))
    }

    /// Attach to element handles instead of ids.
    #[wasm_bindgen(js_name = fromElements)]
    pub fn from_elements(
        root: HtmlElement,
        wrapper: HtmlElement,
        config: JsValue,
    ) -> Result<QuireEditor, JsError> {
        let config = parse_config(&config)?;
        let inner = attach(root, wrapper, config).map_err(to_js_error)?;
        Ok(Self::wrap(inner))
    }

    // === Form control contract ===

    /// Render an externally supplied value. Falsy values clear the editor.
    #[wasm_bindgen(js_name = writeValue)]
    pub fn write_value(&mut self, value: JsValue) {
        let value = coerce_value(&value);
        self.inner.write_value(value.as_deref());
    }

    /// Called with the surface markup after each user edit.
    #[wasm_bindgen(js_name = registerOnChange)]
    pub fn register_on_change(&mut self, callback: js_sys::Function) {
        self.inner.register_on_change(move |html| {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(html)) {
                tracing::warn!("onChange callback threw: {:?}", e);
            }
        });
    }

    /// Called whenever the surface loses focus.
    #[wasm_bindgen(js_name = registerOnTouched)]
    pub fn register_on_touched(&mut self, callback: js_sys::Function) {
        self.inner.register_on_touched(move || {
            if let Err(e) = callback.call0(&JsValue::NULL) {
                tracing::warn!("onTouched callback threw: {:?}", e);
            }
        });
    }

    #[wasm_bindgen(js_name = setDisabledState)]
    pub fn set_disabled_state(&mut self, disabled: bool) {
        self.inner.set_disabled_state(disabled);
    }

    // === Events ===

    /// Wire to the surface's `input` event.
    #[wasm_bindgen(js_name = onContentChange)]
    pub fn on_content_change(&mut self) {
        self.inner.sync_from_surface();
    }

    /// Wire to the surface's `blur` event.
    #[wasm_bindgen(js_name = onBlur)]
    pub fn on_blur(&mut self) {
        self.inner.on_blur();
    }

    #[wasm_bindgen(js_name = focus)]
    pub fn focus(&mut self) {
        self.inner.on_focus();
    }

    /// Subscribe to mode changes: `true` on entering visual mode, `false` on
    /// entering source mode.
    #[wasm_bindgen(js_name = onViewMode)]
    pub fn on_view_mode(&mut self, callback: js_sys::Function) {
        self.inner.on_view_mode(move |visual| {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_bool(visual)) {
                tracing::warn!("onViewMode callback threw: {:?}", e);
            }
        });
    }

    /// Called with a toolbar snapshot after every command or refresh.
    #[wasm_bindgen(js_name = onToolbarChange)]
    pub fn on_toolbar_change(&mut self, callback: Option<js_sys::Function>) {
        self.on_toolbar_change = callback;
    }

    // === Commands ===

    /// Run a toolbar command such as `"bold"`, `"h1"` or `"toggleEditorMode"`.
    #[wasm_bindgen(js_name = executeCommand)]
    pub fn execute_command(&mut self, command: &str) -> Result<(), JsError> {
        self.inner.execute_command(command).map_err(to_js_error)?;
        self.notify_toolbar();
        Ok(())
    }

    /// Re-read the caret position; wire to `keyup` and `click`.
    #[wasm_bindgen(js_name = refreshToolbar)]
    pub fn refresh_toolbar(&mut self) {
        self.inner.refresh_toolbar();
        self.notify_toolbar();
    }

    // === State ===

    #[wasm_bindgen(js_name = toolbarState)]
    pub fn toolbar_state(&self) -> JsToolbarState {
        JsToolbarState::from(self.inner.toolbar())
    }

    #[wasm_bindgen(js_name = isSourceMode)]
    pub fn is_source_mode(&self) -> bool {
        !self.inner.mode().is_visual()
    }

    /// `"VISUAL"` or `"SOURCE"`.
    #[wasm_bindgen(js_name = mode)]
    pub fn mode(&self) -> String {
        self.inner.mode().as_str().to_string()
    }

    #[wasm_bindgen(js_name = showPlaceholder)]
    pub fn show_placeholder(&self) -> bool {
        self.inner.show_placeholder()
    }

    #[wasm_bindgen(js_name = editorId)]
    pub fn editor_id(&self) -> String {
        self.inner.id().to_string()
    }

    /// Recent log lines attributed to this editor, for bug reports.
    #[wasm_bindgen(js_name = recentLogs)]
    pub fn recent_logs(&self) -> String {
        quire_editor_browser::logs_for(self.inner.id())
    }

    /// The configuration in effect, as a JSON string.
    #[wasm_bindgen(js_name = configJson)]
    pub fn config_json(&self) -> String {
        self.inner.config().to_json()
    }
}

impl QuireEditor {
    fn wrap(inner: BrowserEditor) -> Self {
        Self {
            inner,
            on_toolbar_change: None,
        }
    }

    fn notify_toolbar(&self) {
        let Some(callback) = &self.on_toolbar_change else {
            return;
        };
        let state = JsToolbarState::from(self.inner.toolbar());
        match serde_wasm_bindgen::to_value(&state) {
            Ok(value) => {
                if let Err(e) = callback.call1(&JsValue::NULL, &value) {
                    tracing::warn!("onToolbarChange callback threw: {:?}", e);
                }
            }
            Err(e) => tracing::warn!("toolbar state serialization failed: {}", e),
        }
    }
}

/// Accept `undefined`/`null`, a JSON string, or a plain object.
fn parse_config(value: &JsValue) -> Result<EditorConfig, JsError> {
    if value.is_undefined() || value.is_null() {
        return Ok(EditorConfig::default());
    }
    if let Some(json) = value.as_string() {
        return EditorConfig::from_json(&json).map_err(to_js_error);
    }
    serde_wasm_bindgen::from_value(value.clone())
        .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))
}

/// Falsy values become "no value"; strings pass through; anything else is
/// stringified the way JavaScript would.
fn coerce_value(value: &JsValue) -> Option<String> {
    if !value.is_truthy() {
        return None;
    }
    Some(value.as_string().unwrap_or_else(|| {
        String::from(value.unchecked_ref::<js_sys::Object>().to_string())
    }))
}

fn to_js_error(err: EditorError) -> JsError {
    tracing::error!("{}", err);
    JsError::new(&err.to_string())
}
