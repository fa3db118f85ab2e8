//! Placeholder visibility.
//!
//! The controller never looks at content. Callers decide whether the new
//! content is empty and ask it to reconcile, which toggles only when the
//! answer disagrees with what is currently shown.

use crate::platform::{EditorSurface, MarkerTarget};

/// Class put on the wrapper while the placeholder is visible.
pub const PLACEHOLDER_CLASS: &str = "show-placeholder";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaceholderController {
    shown: bool,
}

impl PlaceholderController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Flip visibility given the state the caller observed.
    pub fn toggle<S: EditorSurface>(&mut self, surface: &mut S, currently_shown: bool) {
        self.shown = !currently_shown;
        surface.set_marker(MarkerTarget::Wrapper, PLACEHOLDER_CLASS, self.shown);
        tracing::trace!(target: "quire::placeholder", shown = self.shown, "placeholder toggled");
    }

    /// Toggle if `is_empty` disagrees with the shown state.
    ///
    /// Returns whether a toggle happened.
    pub fn reconcile<S: EditorSurface>(&mut self, surface: &mut S, is_empty: bool) -> bool {
        if is_empty != self.shown {
            self.toggle(surface, self.shown);
            true
        } else {
            false
        }
    }
}
