//! Recent editor activity, kept in memory for bug reports.
//!
//! [`LogCaptureLayer`] records debug-and-above events from the quire crates
//! into a bounded per-thread buffer. Events carrying an `id` field are
//! attributed to that editor, so a page with several editors can pull the
//! history of just the one that misbehaved via [`logs_for`].

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt::{self, Write as _};

use smol_str::SmolStr;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Entries kept before the oldest is dropped.
pub const LOG_CAPACITY: usize = 100;

/// Field that attributes an event to one editor instance.
const EDITOR_FIELD: &str = "id";

thread_local! {
    static ACTIVITY: RefCell<VecDeque<LogEntry>> = RefCell::new(VecDeque::with_capacity(LOG_CAPACITY));
}

/// One captured event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Level,
    /// Target with the crate prefix dropped, e.g. `editor` or `browser::surface`.
    pub source: SmolStr,
    pub editor: Option<SmolStr>,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.source)?;
        if let Some(editor) = &self.editor {
            write!(f, "#{editor}")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Short name for a quire target, or `None` for anyone else's.
fn quire_source(target: &str) -> Option<&str> {
    target
        .strip_prefix("quire::")
        .or_else(|| target.strip_prefix("quire_editor_"))
}

/// Tracing layer feeding the activity buffer. Console output is left to
/// whatever other layers the host stacks with it.
pub struct LogCaptureLayer;

impl<S: Subscriber> Layer<S> for LogCaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if *metadata.level() > Level::DEBUG {
            return;
        }
        let Some(source) = quire_source(metadata.target()) else {
            return;
        };

        let mut fields = EntryFields::default();
        event.record(&mut fields);
        let editor = fields.editor.take();
        let entry = LogEntry {
            level: *metadata.level(),
            source: source.into(),
            editor,
            message: fields.into_message(),
        };

        ACTIVITY.with(|buf| {
            let mut buf = buf.borrow_mut();
            if buf.len() == LOG_CAPACITY {
                buf.pop_front();
            }
            buf.push_back(entry);
        });
    }
}

#[derive(Default)]
struct EntryFields {
    editor: Option<SmolStr>,
    message: String,
    rest: String,
}

impl EntryFields {
    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.rest.is_empty() {
            self.rest.push_str(", ");
        }
        let _ = write!(self.rest, "{name}={value}");
    }

    /// Message first, then the remaining fields in recorded order.
    fn into_message(mut self) -> String {
        if !self.rest.is_empty() {
            if !self.message.is_empty() {
                self.message.push_str(", ");
            }
            self.message.push_str(&self.rest);
        }
        self.message
    }
}

impl Visit for EntryFields {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            // `id = %x` arrives here as a Display wrapper, so Debug prints it bare.
            EDITOR_FIELD => self.editor = Some(SmolStr::new(format!("{value:?}"))),
            name => self.push_field(name, format_args!("{value:?}")),
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            EDITOR_FIELD => self.editor = Some(SmolStr::new(value)),
            name => self.push_field(name, format_args!("{value}")),
        }
    }
}

fn render<'a>(entries: impl Iterator<Item = &'a LogEntry>) -> String {
    let mut out = String::new();
    for entry in entries {
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = write!(out, "{entry}");
    }
    out
}

/// Every captured entry, oldest first, one per line.
pub fn get_logs() -> String {
    ACTIVITY.with(|buf| render(buf.borrow().iter()))
}

/// Entries attributed to `editor_id`, oldest first, one per line.
pub fn logs_for(editor_id: &str) -> String {
    ACTIVITY.with(|buf| {
        render(
            buf.borrow()
                .iter()
                .filter(|e| e.editor.as_deref() == Some(editor_id)),
        )
    })
}

/// Snapshot of the raw entries.
pub fn entries() -> Vec<LogEntry> {
    ACTIVITY.with(|buf| buf.borrow().iter().cloned().collect())
}

pub fn clear_logs() {
    ACTIVITY.with(|buf| buf.borrow_mut().clear());
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    use super::*;

    fn capture(f: impl FnOnce()) {
        let subscriber = Registry::default().with(LogCaptureLayer);
        tracing::subscriber::with_default(subscriber, || {
            clear_logs();
            f();
        });
    }

    #[test]
    fn keeps_quire_events_at_debug_and_above() {
        capture(|| {
            tracing::debug!(target: "quire::editor", len = 3, "entered source mode");
            tracing::debug!(target: "other_crate", "ignored");
            tracing::debug!(target: "quirements", "ignored too");
            tracing::trace!(target: "quire::selection", "too verbose");
            tracing::warn!(target: "quire_editor_browser::surface", "focus failed");
        });

        insta::assert_snapshot!(get_logs(), @r"
        [DEBUG] editor: entered source mode, len=3
        [WARN] browser::surface: focus failed
        ");
    }

    #[test]
    fn events_with_an_id_belong_to_that_editor() {
        let first = SmolStr::new("first");
        capture(|| {
            tracing::debug!(target: "quire::editor", id = %first, "editor initialised");
            tracing::debug!(target: "quire::editor", id = "second", len = 0, "entered source mode");
            tracing::warn!(target: "quire::config", "rejecting editor config");
        });

        assert_eq!(logs_for("first"), "[DEBUG] editor#first: editor initialised");
        assert_eq!(
            logs_for("second"),
            "[DEBUG] editor#second: entered source mode, len=0"
        );
        assert_eq!(logs_for("third"), "");

        let all = entries();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].editor, None);
        assert_eq!(all[2].level, Level::WARN);
    }

    #[test]
    fn message_leads_the_other_fields() {
        capture(|| {
            tracing::debug!(target: "quire::editor", backend = "range", "entered visual mode");
        });
        assert_eq!(
            get_logs(),
            "[DEBUG] editor: entered visual mode, backend=range"
        );
    }

    #[test]
    fn oldest_entries_fall_off() {
        capture(|| {
            for i in 0..(LOG_CAPACITY + 5) {
                tracing::warn!(target: "quire::editor", i, "entry");
            }
        });

        let all = entries();
        assert_eq!(all.len(), LOG_CAPACITY);
        assert_eq!(all[0].message, "entry, i=5");
    }
}
