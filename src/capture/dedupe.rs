//! Suppression of immediately repeated messages.
//!
//! Some chat sites render the same message node twice (for example a
//! wrapper and its inner message both match the container query). Dropping
//! a candidate whose text equals the previously accepted message removes the
//! duplicate. A user who really sent the same short text twice in a row loses
//! the second copy; that trade-off is accepted.

use crate::session::Message;

/// Accumulates messages, skipping text-identical repeats of the last one.
#[derive(Debug, Default)]
pub struct SuppressRepeats {
    messages: Vec<Message>,
    suppressed: usize,
}

impl SuppressRepeats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `message` unless its trimmed text repeats the last accepted one.
    ///
    /// Returns whether the message was kept.
    pub fn push(&mut self, message: Message) -> bool {
        let repeats = self
            .messages
            .last()
            .map(|last| last.text.trim() == message.text.trim())
            .unwrap_or(false);

        if repeats {
            self.suppressed += 1;
            return false;
        }
        self.messages.push(message);
        true
    }

    /// Number of candidates dropped so far.
    pub fn suppressed_count(&self) -> usize {
        self.suppressed
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}
