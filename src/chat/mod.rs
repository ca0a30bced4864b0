pub mod controller;
pub mod models;

pub use controller::{ChatBackend, ChatController, Completion, PendingTurn, SubmitRejected};
pub use models::{ChatMessage, ChatRole, ChatState, Transcript};
