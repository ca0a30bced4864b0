use serde::{Deserialize, Serialize};

use crate::api::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    System,
    User,
    Assistant,
}

/// One `{role, content}` entry of the conversation sent to the backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: TurnRole, content: &str) -> Self {
        Self {
            role,
            content: content.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatContext {
    pub timestamp: String,
    #[serde(rename = "userAgent")]
    pub user_agent: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatTurn>,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub context: ChatContext,
}

impl ChatRequest {
    /// The backend expects at least one turn and the last one to be a
    /// non-blank user message.
    pub fn validate(&self) -> Result<(), ApiError> {
        let last = self
            .messages
            .last()
            .ok_or_else(|| ApiError::validation("Chat request has no messages"))?;
        if last.role != TurnRole::User {
            return Err(ApiError::validation(
                "Chat request must end with a user message",
            ));
        }
        if last.content.trim().is_empty() {
            return Err(ApiError::validation("Chat message is empty"));
        }
        if self.user_id.trim().is_empty() {
            return Err(ApiError::validation("Chat request is missing a user id"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub message: Option<String>,
}
