use shared::{domain::ConnectionStatus, protocol::GreetingPayload};

pub const DEFAULT_MESSAGES: [&str; 5] = [
    "Hello, World! This is Vue 3.js in action!",
    "Vue 3 is awesome! 🚀",
    "Reactive programming made easy!",
    "Building modern web apps with Vue 3!",
    "Hello from the frontend! 👋",
];

/// Fixed, non-empty sequence of strings with a wrapping cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCycle {
    messages: Vec<String>,
    cursor: usize,
}

impl MessageCycle {
    pub fn new<I, S>(messages: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let messages: Vec<String> = messages.into_iter().map(Into::into).collect();
        if messages.is_empty() {
            return None;
        }
        Some(Self {
            messages,
            cursor: 0,
        })
    }

    pub fn current(&self) -> &str {
        &self.messages[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn advance(&mut self) -> &str {
        self.cursor = (self.cursor + 1) % self.messages.len();
        self.current()
    }
}

impl Default for MessageCycle {
    fn default() -> Self {
        Self {
            messages: DEFAULT_MESSAGES.iter().map(|m| (*m).to_string()).collect(),
            cursor: 0,
        }
    }
}

/// Unbounded counter. Arithmetic wraps at the `i64` limits so that
/// increment and decrement always undo each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter(i64);

impl Counter {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }

    pub fn increment(&mut self) -> i64 {
        self.0 = self.0.wrapping_add(1);
        self.0
    }

    pub fn decrement(&mut self) -> i64 {
        self.0 = self.0.wrapping_sub(1);
        self.0
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClientState {
    pub status: ConnectionStatus,
    pub loading: bool,
    pub error: Option<String>,
    pub api_response: Option<GreetingPayload>,
    pub counter: Counter,
    pub messages: MessageCycle,
    pub user_name: String,
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
