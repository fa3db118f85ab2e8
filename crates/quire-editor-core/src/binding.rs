//! Two-way binding between an external form value and the surface.
//!
//! Shaped like a reactive form control accessor: the form pushes values in
//! with `write_value`, and subscribes to user edits and blur through single
//! callback slots.

use crate::placeholder::PlaceholderController;
use crate::platform::{EditorSurface, MarkerTarget};
use crate::value::{EditorValue, is_blank_markup};

/// Class put on the surface while the bound control is disabled.
pub const DISABLED_CLASS: &str = "disabled";

pub type ChangeCallback = Box<dyn FnMut(&str)>;
pub type TouchedCallback = Box<dyn FnMut()>;

#[derive(Default)]
pub struct ValueBinding {
    on_change: Option<ChangeCallback>,
    on_touched: Option<TouchedCallback>,
    placeholder: PlaceholderController,
}

impl std::fmt::Debug for ValueBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueBinding")
            .field("on_change", &self.on_change.is_some())
            .field("on_touched", &self.on_touched.is_some())
            .field("placeholder", &self.placeholder)
            .finish()
    }
}

impl ValueBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the change callback. Only the last registration is kept.
    pub fn register_on_change(&mut self, f: impl FnMut(&str) + 'static) {
        self.on_change = Some(Box::new(f));
    }

    /// Replace the touched callback. Only the last registration is kept.
    pub fn register_on_touched(&mut self, f: impl FnMut() + 'static) {
        self.on_touched = Some(Box::new(f));
    }

    pub fn has_on_change(&self) -> bool {
        self.on_change.is_some()
    }

    pub fn show_placeholder(&self) -> bool {
        self.placeholder.is_shown()
    }

    /// Render an externally supplied value.
    ///
    /// The placeholder is reconciled before the surface is rewritten.
    pub fn write_value<S: EditorSurface>(&mut self, surface: &mut S, value: Option<&str>) {
        let value = EditorValue::from_raw(value);
        self.placeholder.reconcile(surface, value.is_empty());
        tracing::trace!(
            target: "quire::binding",
            empty = value.is_empty(),
            len = value.as_markup().len(),
            "write_value"
        );
        surface.set_inner_html(value.as_markup());
    }

    /// The user changed the surface; `html` is its new markup.
    pub fn on_content_change<S: EditorSurface>(&mut self, surface: &mut S, html: &str) {
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(html);
        }
        self.placeholder.reconcile(surface, is_blank_markup(Some(html)));
    }

    /// Re-derive the placeholder from what the surface currently holds,
    /// without notifying the change callback.
    pub fn sync_placeholder<S: EditorSurface>(&mut self, surface: &mut S) {
        let html = surface.inner_html();
        self.placeholder.reconcile(surface, is_blank_markup(Some(&html)));
    }

    /// Invoke the touched callback if one is registered.
    pub fn touched(&mut self) {
        if let Some(on_touched) = self.on_touched.as_mut() {
            on_touched();
        }
    }

    /// Presentation-only disabled marker. Editability and value are untouched.
    pub fn set_disabled_state<S: EditorSurface>(&mut self, surface: &mut S, disabled: bool) {
        surface.set_marker(MarkerTarget::Surface, DISABLED_CLASS, disabled);
    }
}
