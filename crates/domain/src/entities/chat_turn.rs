//! Chat turn entity
//!
//! One completed exchange: what the user asked and what the assistant
//! answered. Turns are ephemeral — they exist to feed the conversation
//! history and to back a pending delivery action, never to be stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single question/answer exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// What the user sent
    pub user_message: String,
    /// What the assistant replied
    pub assistant_reply: String,
    /// When the reply was produced
    pub created_at: DateTime<Utc>,
}

impl ChatTurn {
    /// Create a turn stamped with the current time
    pub fn new(user_message: impl Into<String>, assistant_reply: impl Into<String>) -> Self {
        Self {
            user_message: user_message.into(),
            assistant_reply: assistant_reply.into(),
            created_at: Utc::now(),
        }
    }

    /// Whether the assistant produced any text for this turn
    pub fn has_reply(&self) -> bool {
        !self.assistant_reply.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_keeps_both_sides() {
        let turn = ChatTurn::new("¿Quién es Gandalf?", "Un Maia enviado por los Valar.");
        assert_eq!(turn.user_message, "¿Quién es Gandalf?");
        assert_eq!(turn.assistant_reply, "Un Maia enviado por los Valar.");
    }

    #[test]
    fn has_reply_for_non_empty_answer() {
        let turn = ChatTurn::new("q", "a");
        assert!(turn.has_reply());
    }

    #[test]
    fn has_reply_is_false_for_blank_answer() {
        let turn = ChatTurn::new("q", "   ");
        assert!(!turn.has_reply());
    }

    #[test]
    fn serialization_roundtrip() {
        let turn = ChatTurn::new("pregunta", "respuesta");
        let json = serde_json::to_string(&turn).unwrap();
        let parsed: ChatTurn = serde_json::from_str(&json).unwrap();
        assert_eq!(turn, parsed);
    }
}
