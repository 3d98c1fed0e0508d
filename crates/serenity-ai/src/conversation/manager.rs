//! ConversationManager struct, transcript access, and event publishing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serenity_common::{EventBus, TurnId};
use tokio::sync::broadcast;

use crate::backend::{ChatSession, ModelBackend, SessionOptions};

use super::turn::Turn;
use super::types::{ConversationEvent, DeliveryMode};

const EVENT_CAPACITY: usize = 256;

/// Mediates turn-taking between a local user and a model backend.
///
/// States are `Idle` and `AwaitingReply`; the latter is held by a busy
/// flag for the duration of one exchange.
pub struct ConversationManager {
    pub(super) backend: Arc<dyn ModelBackend>,
    pub(super) options: SessionOptions,
    pub(super) delivery: DeliveryMode,
    /// Created on the first outbound message and kept for the manager's
    /// lifetime. Locked only by the exchange holding the busy flag.
    pub(super) session: tokio::sync::Mutex<Option<Box<dyn ChatSession>>>,
    /// Set once the session exists; readable while an exchange holds `session`.
    pub(super) session_ready: AtomicBool,
    transcript: Mutex<Vec<Turn>>,
    pub(super) awaiting: AtomicBool,
    pub(super) events: EventBus<ConversationEvent>,
}

impl ConversationManager {
    pub fn new(backend: Arc<dyn ModelBackend>, options: SessionOptions) -> Self {
        Self {
            backend,
            options,
            delivery: DeliveryMode::default(),
            session: tokio::sync::Mutex::new(None),
            session_ready: AtomicBool::new(false),
            transcript: Mutex::new(Vec::new()),
            awaiting: AtomicBool::new(false),
            events: EventBus::new(EVENT_CAPACITY),
        }
    }

    pub fn with_delivery(mut self, delivery: DeliveryMode) -> Self {
        self.delivery = delivery;
        self
    }

    pub fn delivery(&self) -> DeliveryMode {
        self.delivery
    }

    /// Snapshot of the transcript, oldest turn first.
    pub fn transcript(&self) -> Vec<Turn> {
        self.lock_transcript().clone()
    }

    /// Number of turns in the transcript.
    pub fn turn_count(&self) -> usize {
        self.lock_transcript().len()
    }

    /// Whether an exchange is in flight; input should be disabled while true.
    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting.load(Ordering::Acquire)
    }

    /// Whether the backend session has been created yet. Never blocks on
    /// an exchange in flight.
    pub fn has_session(&self) -> bool {
        self.session_ready.load(Ordering::Acquire)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConversationEvent> {
        self.events.subscribe()
    }

    fn publish(&self, event: ConversationEvent) {
        self.events.publish(event);
    }

    pub(super) fn append(&self, turn: Turn) {
        self.lock_transcript().push(turn.clone());
        self.publish(ConversationEvent::TurnAppended(turn));
    }

    /// Append `fragment` to the text of turn `id`.
    pub(super) fn extend(&self, id: &TurnId, fragment: String) {
        {
            let mut transcript = self.lock_transcript();
            if let Some(turn) = transcript.iter_mut().rev().find(|t| &t.id == id) {
                turn.text.push_str(&fragment);
            }
        }
        self.publish(ConversationEvent::TurnExtended {
            id: id.clone(),
            fragment,
        });
    }

    /// Overwrite the text of turn `id`.
    pub(super) fn replace_text(&self, id: &TurnId, text: &str) {
        let replaced = {
            let mut transcript = self.lock_transcript();
            transcript
                .iter_mut()
                .rev()
                .find(|t| &t.id == id)
                .map(|turn| {
                    turn.text = text.to_string();
                    turn.clone()
                })
        };
        if let Some(turn) = replaced {
            self.publish(ConversationEvent::TurnReplaced(turn));
        }
    }

    fn lock_transcript(&self) -> MutexGuard<'_, Vec<Turn>> {
        // Turns are only pushed or extended under the lock, so a poisoned
        // transcript is still well-formed.
        self.transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
