//! Conversation outcome/event types and the in-flight guard.

use std::sync::atomic::{AtomicBool, Ordering};

use serenity_common::{EventBus, TurnId};

use super::turn::Turn;

/// Shown in place of a reply whenever the backend exchange fails.
pub const APOLOGY_TEXT: &str = "I'm having a little trouble connecting right now. \
Please check your internet or try again in a moment.";

/// Shown when the backend answers successfully but with no text.
pub const EMPTY_REPLY_TEXT: &str =
    "I'm sorry, I'm having trouble finding the words right now. Could you repeat that?";

/// How replies are requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    #[default]
    Whole,
    Streaming,
}

/// Why a submission was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Nothing left after trimming whitespace.
    EmptyMessage,
    /// Another exchange is still in flight.
    AwaitingReply,
}

/// What `submit_message` did. Informational only; failures have already
/// been turned into an apology turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected(RejectReason),
    Replied,
    Failed,
}

/// Transcript change notifications for a view layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversationEvent {
    TurnAppended(Turn),
    /// A streamed fragment was appended to the turn's text.
    TurnExtended { id: TurnId, fragment: String },
    /// A partially streamed turn was overwritten with the apology text.
    TurnReplaced(Turn),
    AwaitingReplyChanged(bool),
}

/// Holds the `AwaitingReply` flag for one exchange.
///
/// Acquiring announces `AwaitingReplyChanged(true)`. Dropping clears the
/// flag and announces `AwaitingReplyChanged(false)`, also when the
/// submitting future is dropped before the exchange settles.
pub(crate) struct BusyGuard<'a> {
    flag: &'a AtomicBool,
    events: &'a EventBus<ConversationEvent>,
}

impl<'a> BusyGuard<'a> {
    /// Returns `None` if an exchange is already in flight.
    pub(crate) fn acquire(
        flag: &'a AtomicBool,
        events: &'a EventBus<ConversationEvent>,
    ) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()?;
        events.publish(ConversationEvent::AwaitingReplyChanged(true));
        Some(Self { flag, events })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
        self.events
            .publish(ConversationEvent::AwaitingReplyChanged(false));
    }
}
