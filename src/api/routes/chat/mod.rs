//! `POST /api/chat`

pub mod public;

use crate::api::{ApiClient, ApiError};
use public::{ChatRequest, ChatResponse};

/// Sends the whole conversation and returns the assistant's reply.
pub async fn send_message(
    client: &ApiClient,
    request: &ChatRequest,
) -> Result<ChatResponse, ApiError> {
    request.validate()?;
    tracing::debug!(turns = request.messages.len(), "Sending chat request");
    client.post("/api/chat", request).await
}
