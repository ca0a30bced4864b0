//! The core models for a chat session with the field data assistant.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::public::chat::{ChatTurn, TurnRole};

pub const GREETING: &str = "Hello! I'm your EASY TRACK assistant. I can help you make sense of \
your water, health, climate and environment field reports. What would you like to know?";

pub const NO_REPLY_FALLBACK: &str =
    "Sorry, I couldn't come up with a response. Please try asking again.";

pub const UNKNOWN_ERROR: &str = "Unknown error";

pub const QUICK_SUGGESTIONS: [&str; 4] = [
    "Summarize this week's field reports",
    "Which locations reported water issues?",
    "Show health trends by location",
    "How do I submit a new report?",
];

/// Assistant reply shown when a chat request fails
pub fn error_reply(reason: &str) -> String {
    format!(
        "Sorry, I ran into a problem: {}. Please try again, or check that the backend server is running.",
        reason
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl From<ChatRole> for TurnRole {
    fn from(role: ChatRole) -> Self {
        match role {
            ChatRole::User => TurnRole::User,
            ChatRole::Assistant => TurnRole::Assistant,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked: Option<bool>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.to_string(),
            timestamp: Utc::now(),
            liked: None,
        }
    }

    pub fn to_turn(&self) -> ChatTurn {
        ChatTurn::new(self.role.into(), &self.content)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChatState {
    #[default]
    Idle,
    AwaitingResponse,
}

/// Ordered log of a session's messages, oldest first.
#[derive(Clone, Debug, Default)]
pub struct Transcript(Vec<ChatMessage>);

impl Transcript {
    /// A fresh transcript holding only the assistant greeting
    pub fn greeting() -> Self {
        Self(vec![ChatMessage::new(ChatRole::Assistant, GREETING)])
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.0
    }

    pub fn push(&mut self, msg: ChatMessage) {
        self.0.push(msg)
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.0.last()
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut ChatMessage> {
        self.0.iter_mut().find(|m| m.id == id)
    }

    pub fn to_turns(&self) -> Vec<ChatTurn> {
        self.0.iter().map(ChatMessage::to_turn).collect()
    }
}
