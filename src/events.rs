use std::collections::VecDeque;

use crate::errors::Result;

/// One unit pulled from a markup reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent {
    Start {
        name: String,
        attributes: Vec<(String, String)>,
    },
    End {
        name: String,
    },
    /// Declarations, text, comments and anything else the map grammar does not use.
    Other,
}

impl MarkupEvent {
    pub fn start(name: &str, attributes: &[(&str, &str)]) -> Self {
        MarkupEvent::Start {
            name: name.to_string(),
            attributes: attributes
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }

    pub fn end(name: &str) -> Self {
        MarkupEvent::End {
            name: name.to_string(),
        }
    }
}

/// Pull-based event stream. `Ok(None)` means the input is exhausted.
pub trait EventSource {
    fn next_event(&mut self) -> Result<Option<MarkupEvent>>;
}

/// Events already held in memory.
#[derive(Debug, Default, Clone)]
pub struct EventQueue {
    events: VecDeque<MarkupEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: MarkupEvent) {
        self.events.push_back(event);
    }
}

impl FromIterator<MarkupEvent> for EventQueue {
    fn from_iter<I: IntoIterator<Item = MarkupEvent>>(iter: I) -> Self {
        EventQueue {
            events: iter.into_iter().collect(),
        }
    }
}

impl EventSource for EventQueue {
    fn next_event(&mut self) -> Result<Option<MarkupEvent>> {
        Ok(self.events.pop_front())
    }
}
