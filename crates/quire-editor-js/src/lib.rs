//! WASM bindings for the quire rich-text editor.
//!
//! Exposes [`QuireEditor`], a form-control shaped wrapper around the browser
//! host, for JavaScript/TypeScript apps.

mod editor;
mod types;

pub use editor::*;
pub use types::*;

use wasm_bindgen::prelude::*;

/// Install the panic hook and the tracing subscriber.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    // Console output plus the ring buffer behind `getLogs`.
    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    {
        use quire_editor_browser::LogCaptureLayer;
        use tracing::Level;
        use tracing::subscriber::set_global_default;
        use tracing_subscriber::Registry;
        use tracing_subscriber::layer::SubscriberExt;

        let console_level = if cfg!(debug_assertions) {
            Level::DEBUG
        } else {
            Level::INFO
        };

        let wasm_layer = tracing_wasm::WASMLayer::new(
            tracing_wasm::WASMLayerConfigBuilder::new()
                .set_max_level(console_level)
                .build(),
        );

        let reg = Registry::default().with(wasm_layer).with(LogCaptureLayer);

        let _ = set_global_default(reg);
    }
}

/// Recent editor log lines, newest last, for attaching to bug reports.
#[wasm_bindgen(js_name = getLogs)]
pub fn get_logs() -> String {
    quire_editor_browser::get_logs()
}

#[wasm_bindgen(js_name = clearLogs)]
pub fn clear_logs() {
    quire_editor_browser::clear_logs();
}
