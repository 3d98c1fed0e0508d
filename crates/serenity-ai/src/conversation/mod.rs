//! Conversation session management.
//!
//! A [`ConversationManager`] owns the transcript, lazily creates the
//! backend session, and allows at most one exchange in flight.

mod exchange;
mod manager;
mod turn;
mod types;

#[cfg(test)]
mod fakes;

pub use manager::ConversationManager;
pub use turn::Turn;
pub use types::{
    ConversationEvent, DeliveryMode, RejectReason, SubmitOutcome, APOLOGY_TEXT, EMPTY_REPLY_TEXT,
};
