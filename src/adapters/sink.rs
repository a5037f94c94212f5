use crate::domain::ports::DisplaySink;
use std::collections::HashMap;
use std::sync::Mutex;

/// Prints each slot update as `<id>: <text>`.
#[derive(Debug, Clone, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl DisplaySink for ConsoleSink {
    fn set_text(&self, element_id: &str, text: &str) {
        println!("{}: {}", element_id, text);
    }
}

/// Keeps the latest text per slot; the last write wins.
#[derive(Debug, Default)]
pub struct MemorySink {
    slots: Mutex<HashMap<String, String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self, element_id: &str) -> Option<String> {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.get(element_id).cloned()
    }

    pub fn snapshot(&self) -> HashMap<String, String> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl DisplaySink for MemorySink {
    fn set_text(&self, element_id: &str, text: &str) {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.insert(element_id.to_string(), text.to_string());
    }
}
