//! Greeting domain - numbered greetings backed by a process-wide counter

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Name used when the caller does not supply one
pub const DEFAULT_NAME: &str = "World";

/// A numbered greeting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Greeting {
    pub id: u64,
    pub content: String,
}

/// Issues greetings with monotonically increasing ids, starting at 1
#[derive(Debug, Default)]
pub struct GreetingCounter {
    issued: AtomicU64,
}

impl GreetingCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the next greeting. A missing or empty name falls back to [`DEFAULT_NAME`].
    pub fn greet(&self, name: Option<&str>) -> Greeting {
        let id = self.issued.fetch_add(1, Ordering::Relaxed) + 1;
        let name = name.filter(|n| !n.is_empty()).unwrap_or(DEFAULT_NAME);

        Greeting {
            id,
            content: format!("Hello, {}!", name),
        }
    }
}
