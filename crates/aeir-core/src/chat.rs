//! Chat transcript types.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// A single message in the chat transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    /// Create a message stamped with the current local time.
    pub fn new(id: u64, role: Role, text: impl Into<String>) -> Self {
        Self {
            id,
            role,
            text: text.into(),
            timestamp: Local::now(),
        }
    }
}

/// Progress of the most recent chat request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadingState {
    #[default]
    Idle,
    Loading,
    Error,
    Success,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        #[derive(Serialize)]
        struct Entry {
            role: Role,
        }
        let text = toml::to_string(&Entry { role: Role::Model }).unwrap();
        assert_eq!(text.trim(), "role = \"model\"");
    }

    #[test]
    fn test_new_message_keeps_text() {
        let msg = ChatMessage::new(7, Role::User, "hello");
        assert_eq!(msg.id, 7);
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.text, "hello");
        assert_eq!(LoadingState::default(), LoadingState::Idle);
    }
}
