//! Console events and where they go.

use std::fmt;
use std::io::{self, Write};
use std::sync::Mutex;

use crate::Item;

/// One line of user-visible output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Sending(Item),
    Received(Item),
    AllDone,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Sending(p) => write!(f, "Sending: {}", p),
            Event::Received(p) => write!(f, "Received: {}", p),
            Event::AllDone => write!(f, "All done!"),
        }
    }
}

/// Receives events from any thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &Event);
}

/// Writes each event as one line on stdout.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutSink;

impl EventSink for StdoutSink {
    fn emit(&self, event: &Event) {
        // One locked write per line. A closed stdout (e.g. piped into `head`) is not an error.
        if let Err(e) = writeln!(io::stdout().lock(), "{}", event) {
            log::debug!("stdout write failed: {}", e);
        }
    }
}

/// Keeps events in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Event>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Paths of `Sending` events.
    pub fn sent(&self) -> Vec<Item> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Sending(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    /// Paths of `Received` events.
    pub fn received(&self) -> Vec<Item> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Received(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    /// Rendered lines, as [`StdoutSink`] would print them.
    pub fn lines(&self) -> Vec<String> {
        self.events().iter().map(ToString::to_string).collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &Event) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_lines() {
        assert_eq!(Event::Sending("/tmp".into()).to_string(), "Sending: /tmp");
        assert_eq!(Event::Received("/tmp".into()).to_string(), "Received: /tmp");
        assert_eq!(Event::AllDone.to_string(), "All done!");
    }

    #[test]
    fn test_recording_sink_filters() {
        let sink = RecordingSink::new();
        sink.emit(&Event::Sending("/a".into()));
        sink.emit(&Event::Received("/a".into()));
        sink.emit(&Event::AllDone);
        assert_eq!(sink.sent(), vec!["/a".to_string()]);
        assert_eq!(sink.received(), vec!["/a".to_string()]);
        assert_eq!(sink.lines().last().map(String::as_str), Some("All done!"));
    }
}
