//! State machine behind the chat widget.
//!
//! A session is either `Idle` or `AwaitingResponse`. `submit` moves
//! it to `AwaitingResponse` and hands back a [`PendingTurn`] holding
//! the request to send; `complete` applies the outcome and returns to
//! `Idle`. Only one turn can be pending at a time.
//!
//! Each session owns a cancellation token. Clearing or closing the
//! session cancels it, and any pending turn created under it is
//! dropped on completion instead of touching the new transcript.

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use super::models::{
    ChatMessage, ChatRole, ChatState, NO_REPLY_FALLBACK, QUICK_SUGGESTIONS, Transcript,
    UNKNOWN_ERROR, error_reply,
};
use crate::api::public::chat::{ChatContext, ChatRequest, ChatResponse, ChatTurn, TurnRole};
use crate::api::{ApiClient, ApiError, routes};
use crate::core::AppConfig;

/// Anything that can answer a chat request
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError>;
}

#[async_trait]
impl ChatBackend for ApiClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        routes::chat::send_message(self, request).await
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitRejected {
    #[error("Message is empty")]
    EmptyInput,
    #[error("Still waiting for the previous response")]
    Busy,
    #[error("Chat session is closed")]
    Closed,
}

/// A submitted user turn waiting for the backend's answer
#[derive(Debug)]
pub struct PendingTurn {
    pub request: ChatRequest,
    cancel: CancellationToken,
}

impl PendingTurn {
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[derive(Debug, PartialEq)]
pub enum Completion {
    /// The assistant message appended to the transcript
    Applied(ChatMessage),
    /// The session was cleared or closed while the request was out
    Dropped,
}

pub struct ChatController {
    user_id: String,
    user_agent: String,
    system_message: String,
    transcript: Transcript,
    state: ChatState,
    session: CancellationToken,
    closed: bool,
}

impl ChatController {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            user_id: config.default_user_id.clone(),
            user_agent: config.user_agent.clone(),
            system_message: config.system_message.clone(),
            transcript: Transcript::greeting(),
            state: ChatState::Idle,
            session: CancellationToken::new(),
            closed: false,
        }
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.transcript.messages()
    }

    /// Token for the current session. Cancelled by `clear` and `close`.
    pub fn session_token(&self) -> CancellationToken {
        self.session.clone()
    }

    /// Suggested first questions, only offered before the user has
    /// said anything.
    pub fn quick_suggestions(&self) -> &'static [&'static str] {
        if self.transcript.messages().len() == 1 {
            &QUICK_SUGGESTIONS
        } else {
            &[]
        }
    }

    /// Appends the user turn and builds the request carrying the
    /// system instruction followed by the whole transcript.
    pub fn submit(&mut self, input: &str) -> Result<PendingTurn, SubmitRejected> {
        if self.closed || self.session.is_cancelled() {
            return Err(SubmitRejected::Closed);
        }
        if self.state == ChatState::AwaitingResponse {
            tracing::debug!("Ignoring chat submission while a response is pending");
            return Err(SubmitRejected::Busy);
        }
        let input = input.trim();
        if input.is_empty() {
            return Err(SubmitRejected::EmptyInput);
        }

        self.transcript.push(ChatMessage::new(ChatRole::User, input));

        let mut messages = vec![ChatTurn::new(TurnRole::System, &self.system_message)];
        messages.extend(self.transcript.to_turns());
        let request = ChatRequest {
            messages,
            user_id: self.user_id.clone(),
            context: ChatContext {
                timestamp: Utc::now().to_rfc3339(),
                user_agent: self.user_agent.clone(),
            },
        };

        self.state = ChatState::AwaitingResponse;
        Ok(PendingTurn {
            request,
            cancel: self.session.clone(),
        })
    }

    /// Applies the backend's answer to a pending turn. Failures become
    /// an assistant message so every user turn gets a visible reply.
    pub fn complete(
        &mut self,
        pending: PendingTurn,
        result: Result<ChatResponse, ApiError>,
    ) -> Completion {
        match result {
            Ok(resp) => {
                let content = resp.message.unwrap_or_else(|| NO_REPLY_FALLBACK.to_string());
                self.finish(pending, &content)
            }
            Err(err) => {
                tracing::error!(error = %err, "Chat request failed");
                self.finish(pending, &error_reply(&err.to_string()))
            }
        }
    }

    /// Completes a pending turn whose request failed without an error
    /// value to report, e.g. a request task that panicked.
    pub fn complete_unknown_failure(&mut self, pending: PendingTurn) -> Completion {
        tracing::error!("Chat request failed with no error value");
        self.finish(pending, &error_reply(UNKNOWN_ERROR))
    }

    fn finish(&mut self, pending: PendingTurn, content: &str) -> Completion {
        if pending.is_cancelled() {
            tracing::debug!("Dropping chat completion for a cancelled session");
            return Completion::Dropped;
        }
        let msg = ChatMessage::new(ChatRole::Assistant, content);
        self.transcript.push(msg.clone());
        self.state = ChatState::Idle;
        Completion::Applied(msg)
    }

    /// Submits `input`, waits for `backend` and applies the result.
    /// Cancelling the session token while waiting drops the result and
    /// closes the session.
    pub async fn send(
        &mut self,
        backend: &dyn ChatBackend,
        input: &str,
    ) -> Result<Completion, SubmitRejected> {
        let pending = self.submit(input)?;
        let cancel = pending.cancel_token().clone();
        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                self.state = ChatState::Idle;
                self.closed = true;
                return Ok(Completion::Dropped);
            }
            result = backend.send(&pending.request) => result,
        };
        Ok(self.complete(pending, result))
    }

    /// Flips the liked flag on an assistant message. Returns false
    /// when no assistant message has that id.
    pub fn toggle_like(&mut self, id: &str) -> bool {
        match self.transcript.find_mut(id) {
            Some(msg) if msg.role == ChatRole::Assistant => {
                msg.liked = Some(!msg.liked.unwrap_or(false));
                true
            }
            _ => false,
        }
    }

    /// Starts over with only the greeting. Any request still out is
    /// abandoned: its completion will be dropped.
    pub fn clear(&mut self) {
        self.session.cancel();
        self.session = CancellationToken::new();
        self.transcript = Transcript::greeting();
        self.state = ChatState::Idle;
    }

    /// Abandons any request still out and refuses further input.
    pub fn close(&mut self) {
        self.session.cancel();
        self.closed = true;
    }
}

impl Drop for ChatController {
    fn drop(&mut self) {
        self.session.cancel();
    }
}
