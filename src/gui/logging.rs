use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex};

use tracing::{Event, Subscriber, field::Visit};
use tracing_subscriber::layer::{Context, Layer};

/// Entries kept in memory, both in the capture buffer and in the log panel.
pub const MAX_LOG_ENTRIES: usize = 1000;

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub level: tracing::Level,
    pub timestamp: String,
    pub message: String,
    pub target: String,
}

impl LogEntry {
    pub fn new(level: tracing::Level, message: String, target: String) -> Self {
        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        Self {
            level,
            timestamp,
            message,
            target,
        }
    }

    /// `[12:00:01] INFO pixelenhance::io::gemini: message`
    pub fn to_line(&self) -> String {
        format!(
            "[{}] {} {}: {}",
            self.timestamp, self.level, self.target, self.message
        )
    }
}

static LOG_BUFFER: once_cell::sync::Lazy<Arc<Mutex<VecDeque<LogEntry>>>> =
    once_cell::sync::Lazy::new(|| Arc::new(Mutex::new(VecDeque::new())));

/// Take everything captured since the last call.
pub fn drain_log_buffer() -> Vec<LogEntry> {
    match LOG_BUFFER.lock() {
        Ok(mut buf) => buf.drain(..).collect(),
        Err(_) => Vec::new(),
    }
}

fn push_bounded(buf: &mut VecDeque<LogEntry>, entry: LogEntry) {
    buf.push_back(entry);
    while buf.len() > MAX_LOG_ENTRIES {
        buf.pop_front();
    }
}

/// Append to a panel's history, keeping the newest `MAX_LOG_ENTRIES`.
pub fn append_bounded(logs: &mut Vec<LogEntry>, new_entries: Vec<LogEntry>) {
    logs.extend(new_entries);
    let len = logs.len();
    if len > MAX_LOG_ENTRIES {
        logs.drain(0..(len - MAX_LOG_ENTRIES));
    }
}

/// Captures `tracing` events into the in-memory buffer the log panel reads.
#[derive(Default)]
pub struct GuiLogLayer;

impl GuiLogLayer {
    pub fn new() -> Self {
        Self
    }
}

/// Collects the `message` field plus any structured fields as `key=value`.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

impl<S> Layer<S> for GuiLogLayer
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let message = match (visitor.message.is_empty(), visitor.fields.is_empty()) {
            (false, _) => format!("{}{}", visitor.message, visitor.fields),
            (true, false) => visitor.fields.trim_start().to_string(),
            (true, true) => metadata.target().to_string(),
        };

        let entry = LogEntry::new(*metadata.level(), message, metadata.target().to_string());

        if let Ok(mut buf) = LOG_BUFFER.lock() {
            push_bounded(&mut buf, entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    fn entry(n: usize) -> LogEntry {
        LogEntry::new(Level::INFO, format!("entry {n}"), "test".to_string())
    }

    #[test]
    fn panel_history_is_bounded() {
        let mut logs = Vec::new();
        append_bounded(&mut logs, (0..MAX_LOG_ENTRIES + 5).map(entry).collect());
        assert_eq!(logs.len(), MAX_LOG_ENTRIES);
        assert_eq!(logs[0].message, "entry 5");
    }

    #[test]
    fn capture_buffer_drops_oldest() {
        let mut buf = VecDeque::new();
        for n in 0..MAX_LOG_ENTRIES + 2 {
            push_bounded(&mut buf, entry(n));
        }
        assert_eq!(buf.len(), MAX_LOG_ENTRIES);
        assert_eq!(buf.front().unwrap().message, "entry 2");
    }

    #[test]
    fn line_format_has_level_and_target() {
        let line = entry(1).to_line();
        assert!(line.ends_with("INFO test: entry 1"), "{line}");
    }
}
