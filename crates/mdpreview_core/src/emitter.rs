//! Broadcast of events to any number of subscribers.

use parking_lot::Mutex;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Receiving half handed out by [`EventEmitter::subscribe`].
///
/// The stream ends once the emitter is disposed or dropped.
pub type Subscription<T> = UnboundedReceiver<T>;

/// Delivers every fired event, in order, to each live subscriber.
///
/// Events are neither deduplicated nor coalesced.
#[derive(Debug)]
pub struct EventEmitter<T> {
    /// `None` once disposed.
    subscribers: Mutex<Option<Vec<UnboundedSender<T>>>>,
}

impl<T> Default for EventEmitter<T> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(Some(Vec::new())),
        }
    }
}

impl<T: Clone> EventEmitter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber, it only sees events fired from now on.
    pub fn subscribe(&self) -> Subscription<T> {
        let (tx, rx) = unbounded_channel();
        match self.subscribers.lock().as_mut() {
            Some(subscribers) => subscribers.push(tx),
            // Disposed: the sender is dropped right away and the stream is closed.
            None => drop(tx),
        }
        rx
    }

    /// Sends `event` to every subscriber. Closed subscriptions are pruned.
    pub fn fire(&self, event: T) {
        if let Some(subscribers) = self.subscribers.lock().as_mut() {
            subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .as_ref()
            .map(|subscribers| subscribers.iter().filter(|tx| !tx.is_closed()).count())
            .unwrap_or(0)
    }

    /// Ends every subscription, later calls to [`Self::fire`] are no-ops.
    pub fn dispose(&self) {
        self.subscribers.lock().take();
    }

    pub fn is_disposed(&self) -> bool {
        self.subscribers.lock().is_none()
    }
}
