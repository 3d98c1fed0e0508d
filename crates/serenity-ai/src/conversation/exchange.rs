//! Async submit path: one user turn, one backend exchange, one model turn.

use std::sync::atomic::Ordering;

use futures_util::StreamExt;
use serenity_common::{ExchangeId, TurnId};
use tracing::{debug, error, info};

use crate::backend::ChatSession;
use crate::BackendError;

use super::manager::ConversationManager;
use super::turn::Turn;
use super::types::{
    BusyGuard, DeliveryMode, RejectReason, SubmitOutcome, APOLOGY_TEXT, EMPTY_REPLY_TEXT,
};

impl ConversationManager {
    /// Submit a user message and wait for the exchange to settle.
    ///
    /// The trimmed text is appended as a user turn before the backend is
    /// called. Exactly one model turn follows, carrying the reply or the
    /// fixed apology. Backend errors are logged, never returned.
    pub async fn submit_message(&self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::Rejected(RejectReason::EmptyMessage);
        }

        let Some(guard) = BusyGuard::acquire(&self.awaiting, &self.events) else {
            debug!("submission ignored: reply still pending");
            return SubmitOutcome::Rejected(RejectReason::AwaitingReply);
        };
        self.append(Turn::user(text));

        let exchange_id = ExchangeId::new();
        debug!(exchange = %exchange_id, delivery = ?self.delivery, "sending message");

        let mut in_progress = None;
        let result = match self.delivery {
            DeliveryMode::Whole => self.exchange_whole(text).await,
            DeliveryMode::Streaming => self.exchange_streaming(text, &mut in_progress).await,
        };

        let outcome = match result {
            Ok(()) => SubmitOutcome::Replied,
            Err(e) => {
                error!(exchange = %exchange_id, error = %e, "model backend exchange failed");
                match in_progress {
                    Some(id) => self.replace_text(&id, APOLOGY_TEXT),
                    None => self.append(Turn::model(APOLOGY_TEXT)),
                }
                SubmitOutcome::Failed
            }
        };

        drop(guard);
        outcome
    }

    async fn exchange_whole(&self, text: &str) -> Result<(), BackendError> {
        let mut slot = self.session.lock().await;
        let session = self.ensure_session(&mut slot).await?;

        let reply = session.send(text).await?;
        let reply = if reply.is_empty() {
            EMPTY_REPLY_TEXT.to_string()
        } else {
            reply
        };
        self.append(Turn::model(reply));
        Ok(())
    }

    /// Consume the fragment stream, growing one model turn. The id of that
    /// turn is left in `in_progress` so a later failure can overwrite it.
    async fn exchange_streaming(
        &self,
        text: &str,
        in_progress: &mut Option<TurnId>,
    ) -> Result<(), BackendError> {
        let mut slot = self.session.lock().await;
        let session = self.ensure_session(&mut slot).await?;

        let mut fragments = session.send_streaming(text).await?;
        while let Some(fragment) = fragments.next().await {
            let fragment = fragment?;
            if fragment.is_empty() {
                continue;
            }
            match in_progress {
                Some(id) => self.extend(id, fragment),
                None => {
                    let turn = Turn::model(fragment);
                    *in_progress = Some(turn.id.clone());
                    self.append(turn);
                }
            }
        }

        if in_progress.is_none() {
            self.append(Turn::model(EMPTY_REPLY_TEXT));
        }
        Ok(())
    }

    /// Create the backend session on first use. A failed creation leaves the
    /// slot empty so the next submission tries again.
    async fn ensure_session<'s>(
        &self,
        slot: &'s mut Option<Box<dyn ChatSession>>,
    ) -> Result<&'s mut Box<dyn ChatSession>, BackendError> {
        let session = match slot.take() {
            Some(session) => session,
            None => {
                let session = self.backend.create_session(&self.options).await?;
                self.session_ready.store(true, Ordering::Release);
                info!("model backend session created");
                session
            }
        };
        Ok(slot.insert(session))
    }
}
