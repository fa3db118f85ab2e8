//! Selection tracking: the ancestor chain from the editor root to the caret.

use smol_str::SmolStr;

use crate::platform::SelectionSource;

/// One node of an [`AncestorChain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainEntry<N> {
    pub node: N,
    /// Lowercase node name (`b`, `p`, `#text`, ...).
    pub name: SmolStr,
}

/// Nodes between the editor root (exclusive) and the caret (inclusive),
/// ordered outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorChain<N> {
    entries: Vec<ChainEntry<N>>,
}

impl<N> Default for AncestorChain<N> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<N> AncestorChain<N> {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ChainEntry<N>> {
        self.entries.iter()
    }

    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = &N> {
        self.entries.iter().map(|e| &e.node)
    }

    pub fn names(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Whether any node in the chain is named `name` (case-insensitive).
    pub fn contains_tag(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.name.eq_ignore_ascii_case(name))
    }
}

impl<N> From<Vec<ChainEntry<N>>> for AncestorChain<N> {
    fn from(entries: Vec<ChainEntry<N>>) -> Self {
        Self { entries }
    }
}

/// Walk from the selection focus up to the editor root.
///
/// The root is not part of the chain; the focus node is. If there is no
/// selection the chain is empty. If the walk runs out of parents before
/// reaching the root (the caret is outside the editor), whatever was
/// collected is returned.
pub fn ancestor_chain<S: SelectionSource>(source: &S) -> AncestorChain<S::Node> {
    let Some(mut current) = source.focus_node() else {
        tracing::trace!(target: "quire::selection", "no selection, empty ancestor chain");
        return AncestorChain::empty();
    };

    let mut collected = Vec::new();
    loop {
        if source.is_editor_root(&current) {
            break;
        }
        collected.push(ChainEntry {
            name: source.node_name(&current),
            node: current.clone(),
        });
        match source.parent_node(&current) {
            Some(parent) => current = parent,
            None => {
                tracing::trace!(
                    target: "quire::selection",
                    depth = collected.len(),
                    "walked off the tree without meeting the editor root"
                );
                break;
            }
        }
    }

    collected.reverse();
    AncestorChain::from(collected)
}
