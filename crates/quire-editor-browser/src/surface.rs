//! Browser implementation of the editable surface.
//!
//! Wraps the `contenteditable` root element and its wrapper, and reads the
//! caret through the DOM Selection API.

use quire_editor_core::{
    EditorSurface, MarkerTarget, PlatformError, SOURCE_BLOCK_ID, SOURCE_CODE_STYLE,
    SOURCE_PRE_STYLE, SelectionSource, SerializeBackend,
};
use smol_str::SmolStr;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, Node};

/// The editor's root element and wrapper in a live document.
pub struct BrowserSurface {
    document: Document,
    root: HtmlElement,
    wrapper: HtmlElement,
    source_block: Option<HtmlElement>,
    backend: SerializeBackend,
}

impl BrowserSurface {
    /// Wrap an existing root element and the container around it.
    pub fn new(root: HtmlElement, wrapper: HtmlElement) -> Result<Self, PlatformError> {
        let document = root
            .owner_document()
            .ok_or("editor root has no owner document")?;
        let backend = detect_serialize_backend(&document);
        tracing::debug!(?backend, id = %root.id(), "browser surface attached");
        Ok(Self {
            document,
            root,
            wrapper,
            source_block: None,
            backend,
        })
    }

    /// Look up the root and wrapper by element id in the window's document.
    pub fn from_ids(root_id: &str, wrapper_id: &str) -> Result<Self, PlatformError> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let root = html_element_by_id(&document, root_id)?;
        let wrapper = html_element_by_id(&document, wrapper_id)?;
        Self::new(root, wrapper)
    }

    pub fn root(&self) -> &HtmlElement {
        &self.root
    }

    pub fn wrapper(&self) -> &HtmlElement {
        &self.wrapper
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The mounted `code#sourceText` element, while in source mode.
    pub fn source_block(&self) -> Option<&HtmlElement> {
        self.source_block.as_ref()
    }

    fn build_source_block(&self, text: &str) -> Result<(HtmlElement, HtmlElement), PlatformError> {
        let pre = self
            .document
            .create_element("pre")
            .map_err(|e| format!("create_element(pre) failed: {:?}", e))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| "pre is not HtmlElement")?;
        pre.set_attribute("style", SOURCE_PRE_STYLE)
            .map_err(|e| format!("set_attribute failed: {:?}", e))?;

        let code = self
            .document
            .create_element("code")
            .map_err(|e| format!("create_element(code) failed: {:?}", e))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| "code is not HtmlElement")?;
        code.set_id(SOURCE_BLOCK_ID);
        code.set_attribute("style", SOURCE_CODE_STYLE)
            .map_err(|e| format!("set_attribute failed: {:?}", e))?;
        code.set_content_editable("true");

        let content = self.document.create_text_node(text);
        code.append_child(&content)
            .map_err(|e| format!("append_child failed: {:?}", e))?;
        pre.append_child(&code)
            .map_err(|e| format!("append_child failed: {:?}", e))?;
        Ok((pre, code))
    }

    fn marker_element(&self, target: MarkerTarget) -> &HtmlElement {
        match target {
            MarkerTarget::Surface => &self.root,
            MarkerTarget::Wrapper => &self.wrapper,
        }
    }
}

impl EditorSurface for BrowserSurface {
    fn inner_html(&self) -> String {
        self.root.inner_html()
    }

    fn set_inner_html(&mut self, html: &str) {
        self.root.set_inner_html(html);
        self.source_block = None;
    }

    fn set_content_editable(&mut self, editable: bool) {
        self.root
            .set_content_editable(if editable { "true" } else { "false" });
    }

    fn is_content_editable(&self) -> bool {
        self.root.is_content_editable()
    }

    fn mount_source_block(&mut self, text: &str) -> Result<(), PlatformError> {
        // Build first so a failure leaves the surface untouched.
        let (pre, code) = self.build_source_block(text)?;
        self.root.set_inner_html("");
        self.root
            .append_child(&pre)
            .map_err(|e| format!("append_child failed: {:?}", e))?;
        self.source_block = Some(code);
        Ok(())
    }

    fn serialize_source(&self, backend: SerializeBackend) -> Result<String, PlatformError> {
        match backend {
            SerializeBackend::InnerText => Ok(self.root.inner_text()),
            SerializeBackend::Range => {
                let first = self
                    .root
                    .first_child()
                    .ok_or("surface has no child to serialize")?;
                let range = self
                    .document
                    .create_range()
                    .map_err(|e| format!("create_range failed: {:?}", e))?;
                range
                    .select_node_contents(&first)
                    .map_err(|e| format!("select_node_contents failed: {:?}", e))?;
                Ok(String::from(range.to_string()))
            }
        }
    }

    fn serialize_backend(&self) -> SerializeBackend {
        self.backend
    }

    fn set_marker(&mut self, target: MarkerTarget, class: &str, on: bool) {
        let class_list = self.marker_element(target).class_list();
        let result = if on {
            class_list.add_1(class)
        } else {
            class_list.remove_1(class)
        };
        if let Err(e) = result {
            tracing::warn!(class, ?target, "class toggle failed: {:?}", e);
        }
    }

    fn focus_surface(&mut self) {
        if let Err(e) = self.root.focus() {
            tracing::warn!("focus failed: {:?}", e);
        }
    }

    fn focus_source_block(&mut self) {
        let Some(code) = &self.source_block else {
            tracing::debug!("no source block to focus");
            return;
        };
        if let Err(e) = code.focus() {
            tracing::warn!("source block focus failed: {:?}", e);
        }
    }
}

impl SelectionSource for BrowserSurface {
    type Node = Node;

    fn focus_node(&self) -> Option<Node> {
        let window = web_sys::window()?;
        let selection = window.get_selection().ok()??;
        selection.focus_node()
    }

    fn parent_node(&self, node: &Node) -> Option<Node> {
        node.parent_node()
    }

    fn is_editor_root(&self, node: &Node) -> bool {
        let root: &Node = self.root.as_ref();
        root.is_same_node(Some(node))
    }

    fn node_name(&self, node: &Node) -> SmolStr {
        SmolStr::new(node.node_name().to_ascii_lowercase())
    }
}

/// Pick the serializer the way legacy engines are told apart: a truthy
/// `document.all` means `innerText` is available on the whole surface.
pub fn detect_serialize_backend(document: &Document) -> SerializeBackend {
    let all = js_sys::Reflect::get(document.as_ref(), &JsValue::from_str("all"))
        .map(|v| v.is_truthy())
        .unwrap_or(false);
    if all {
        SerializeBackend::InnerText
    } else {
        SerializeBackend::Range
    }
}

fn html_element_by_id(document: &Document, id: &str) -> Result<HtmlElement, PlatformError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| format!("element not found: {}", id))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| PlatformError(format!("{} is not HtmlElement", id)))
}
