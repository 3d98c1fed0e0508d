use tokio::sync::broadcast;
use tracing::trace;

/// Fan-out channel for state-change notifications.
///
/// Publishing never blocks; subscribers that fall behind the channel
/// capacity observe `RecvError::Lagged` on their next receive.
pub struct EventBus<E> {
    sender: broadcast::Sender<E>,
}

impl<E: Clone> EventBus<E> {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<E> {
        self.sender.subscribe()
    }

    /// Returns the number of subscribers that received the event.
    pub fn publish(&self, event: E) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                trace!("event dropped, no subscribers");
                0
            }
        }
    }
}
