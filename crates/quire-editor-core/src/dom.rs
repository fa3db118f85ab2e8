//! In-memory DOM host.
//!
//! A small arena-backed node tree plus [`MemorySurface`], an implementation
//! of the host traits that needs no browser. Headless embedders use it to run
//! the editor engine server-side, and the test suites drive the engine
//! through it.
//!
//! Markup handed to [`EditorSurface::set_inner_html`] is kept as an opaque
//! fragment node and serialized back verbatim; this host does not parse HTML.

use pulldown_cmark_escape::{escape_html, escape_html_body_text};
use smol_str::SmolStr;

use crate::platform::{
    EditorSurface, MarkerTarget, PlatformError, SOURCE_BLOCK_ID, SOURCE_CODE_STYLE,
    SOURCE_PRE_STYLE, SelectionSource, SerializeBackend,
};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Handle to a node in a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        tag: SmolStr,
        attrs: Vec<(SmolStr, String)>,
        classes: Vec<SmolStr>,
    },
    Text(String),
    /// Opaque markup fragment, serialized verbatim.
    Markup(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena node tree. Detached nodes stay allocated until the tree is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryDom {
    nodes: Vec<NodeData>,
}

impl MemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element {
            tag: SmolStr::new(tag.to_ascii_lowercase()),
            attrs: Vec::new(),
            classes: Vec::new(),
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    pub fn create_markup(&mut self, html: &str) -> NodeId {
        self.push(NodeKind::Markup(html.to_string()))
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    pub fn clear_children(&mut self, parent: NodeId) {
        let children = std::mem::take(&mut self.nodes[parent.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].children.first().copied()
    }

    /// Whether `node` is `ancestor` or lies beneath it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// Lowercase tag name, `#text` for text, `#markup` for opaque fragments.
    pub fn node_name(&self, node: NodeId) -> SmolStr {
        match &self.nodes[node.0].kind {
            NodeKind::Element { tag, .. } => tag.clone(),
            NodeKind::Text(_) => SmolStr::new_static("#text"),
            NodeKind::Markup(_) => SmolStr::new_static("#markup"),
        }
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let NodeKind::Element { attrs, .. } = &mut self.nodes[node.0].kind {
            match attrs.iter_mut().find(|(n, _)| n == name) {
                Some((_, v)) => *v = value.to_string(),
                None => attrs.push((SmolStr::new(name), value.to_string())),
            }
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let NodeKind::Element { classes, .. } = &mut self.nodes[node.0].kind {
            if !classes.iter().any(|c| c == class) {
                classes.push(SmolStr::new(class));
            }
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let NodeKind::Element { classes, .. } = &mut self.nodes[node.0].kind {
            classes.retain(|c| c != class);
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        match &self.nodes[node.0].kind {
            NodeKind::Element { classes, .. } => classes.iter().any(|c| c == class),
            _ => false,
        }
    }

    /// Concatenated text of `node` and its descendants.
    ///
    /// Exact over text and element nodes. Opaque markup is not parsed, so it
    /// contributes its source with tags stripped and entities undecoded.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Markup(html) => strip_tags(html, out),
            NodeKind::Element { .. } => {
                for child in &self.nodes[node.0].children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for child in &self.nodes[node.0].children {
            self.write_node(*child, &mut out);
        }
        out
    }

    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(node, &mut out);
        out
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        let data = &self.nodes[node.0];
        match &data.kind {
            NodeKind::Text(text) => escape_text(text, out),
            NodeKind::Markup(html) => out.push_str(html),
            NodeKind::Element {
                tag,
                attrs,
                classes,
            } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attrs {
                    write_attr(name, value, out);
                }
                if !classes.is_empty() {
                    write_attr("class", &classes.join(" "), out);
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                for child in &data.children {
                    self.write_node(*child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

fn write_attr(name: &str, value: &str, out: &mut String) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    escape_html(&mut *out, value).expect("writing to a String cannot fail");
    out.push('"');
}

fn escape_text(text: &str, out: &mut String) {
    escape_html_body_text(&mut *out, text).expect("writing to a String cannot fail");
}

/// Character data of an unparsed fragment: tags dropped, entity references
/// left as written.
fn strip_tags(html: &str, out: &mut String) {
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
}

/// Where keyboard focus currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Surface,
    SourceBlock,
}

/// [`EditorSurface`] and [`SelectionSource`] over a [`MemoryDom`].
///
/// The tree is `wrapper > root`, where `root` is the editable region.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    dom: MemoryDom,
    wrapper: NodeId,
    root: NodeId,
    source_block: Option<NodeId>,
    caret: Option<NodeId>,
    focused: Option<FocusTarget>,
    backend: SerializeBackend,
}

impl MemorySurface {
    /// Create a surface whose root element carries `editor_id`.
    pub fn new(editor_id: &str) -> Self {
        let mut dom = MemoryDom::new();
        let wrapper = dom.create_element("div");
        dom.add_class(wrapper, "quire-editor-wrapper");
        let root = dom.create_element("div");
        dom.set_attribute(root, "id", editor_id);
        dom.set_attribute(root, "contenteditable", "true");
        dom.add_class(root, "quire-editor-textarea");
        dom.append_child(wrapper, root);
        Self {
            dom,
            wrapper,
            root,
            source_block: None,
            caret: None,
            focused: None,
            backend: SerializeBackend::Range,
        }
    }

    /// Use a specific serializer backend instead of the default range path.
    pub fn with_backend(mut self, backend: SerializeBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn dom(&self) -> &MemoryDom {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut MemoryDom {
        &mut self.dom
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn wrapper(&self) -> NodeId {
        self.wrapper
    }

    pub fn source_block(&self) -> Option<NodeId> {
        self.source_block
    }

    /// Place the selection focus on `node`, or clear the selection.
    pub fn set_caret(&mut self, node: Option<NodeId>) {
        self.caret = node;
    }

    pub fn focused(&self) -> Option<FocusTarget> {
        self.focused
    }

    pub fn wrapper_has_class(&self, class: &str) -> bool {
        self.dom.has_class(self.wrapper, class)
    }

    pub fn surface_has_class(&self, class: &str) -> bool {
        self.dom.has_class(self.root, class)
    }

    /// Replace the text inside the mounted source block, as a user typing
    /// into it would.
    pub fn set_source_text(&mut self, text: &str) -> Result<(), PlatformError> {
        let code = self.source_block.ok_or("no source block mounted")?;
        self.dom.clear_children(code);
        let node = self.dom.create_text(text);
        self.dom.append_child(code, node);
        Ok(())
    }

    /// Drop the caret if the node it points at left the editable tree.
    fn prune_caret(&mut self) {
        if let Some(caret) = self.caret {
            if !self.dom.contains(self.root, caret) {
                self.caret = None;
            }
        }
    }
}

impl EditorSurface for MemorySurface {
    fn inner_html(&self) -> String {
        self.dom.inner_html(self.root)
    }

    fn set_inner_html(&mut self, html: &str) {
        self.dom.clear_children(self.root);
        self.source_block = None;
        if !html.is_empty() {
            let fragment = self.dom.create_markup(html);
            self.dom.append_child(self.root, fragment);
        }
        self.prune_caret();
    }

    fn set_content_editable(&mut self, editable: bool) {
        let value = if editable { "true" } else { "false" };
        self.dom.set_attribute(self.root, "contenteditable", value);
    }

    fn is_content_editable(&self) -> bool {
        self.dom.attribute(self.root, "contenteditable") == Some("true")
    }

    fn mount_source_block(&mut self, text: &str) -> Result<(), PlatformError> {
        self.dom.clear_children(self.root);

        let pre = self.dom.create_element("pre");
        self.dom.set_attribute(pre, "style", SOURCE_PRE_STYLE);
        let code = self.dom.create_element("code");
        self.dom.set_attribute(code, "id", SOURCE_BLOCK_ID);
        self.dom.set_attribute(code, "style", SOURCE_CODE_STYLE);
        self.dom.set_attribute(code, "contenteditable", "true");
        let content = self.dom.create_text(text);

        self.dom.append_child(code, content);
        self.dom.append_child(pre, code);
        self.dom.append_child(self.root, pre);

        self.source_block = Some(code);
        self.prune_caret();
        Ok(())
    }

    fn serialize_source(&self, backend: SerializeBackend) -> Result<String, PlatformError> {
        match backend {
            SerializeBackend::InnerText => Ok(self.dom.text_content(self.root)),
            SerializeBackend::Range => {
                let first = self
                    .dom
                    .first_child(self.root)
                    .ok_or("surface has no child to serialize")?;
                Ok(self.dom.text_content(first))
            }
        }
    }

    fn serialize_backend(&self) -> SerializeBackend {
        self.backend
    }

    fn set_marker(&mut self, target: MarkerTarget, class: &str, on: bool) {
        let node = match target {
            MarkerTarget::Surface => self.root,
            MarkerTarget::Wrapper => self.wrapper,
        };
        if on {
            self.dom.add_class(node, class);
        } else {
            self.dom.remove_class(node, class);
        }
    }

    fn focus_surface(&mut self) {
        self.focused = Some(FocusTarget::Surface);
    }

    fn focus_source_block(&mut self) {
        if self.source_block.is_some() {
            self.focused = Some(FocusTarget::SourceBlock);
        }
    }
}

impl SelectionSource for MemorySurface {
    type Node = NodeId;

    fn focus_node(&self) -> Option<NodeId> {
        self.caret
    }

    fn parent_node(&self, node: &NodeId) -> Option<NodeId> {
        self.dom.parent(*node)
    }

    fn is_editor_root(&self, node: &NodeId) -> bool {
        *node == self.root
    }

    fn node_name(&self, node: &NodeId) -> SmolStr {
        self.dom.node_name(*node)
    }
}
