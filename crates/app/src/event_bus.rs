//! In-process event bus backed by a tokio broadcast channel.
//!
//! Only the synchronous half of the channel API is used, so no runtime is
//! needed: subscribers drain their receiver with
//! [`try_recv`](broadcast::Receiver::try_recv) or
//! [`blocking_recv`](broadcast::Receiver::blocking_recv).

use tokio::sync::broadcast;

use catpoint_domain::error::CatpointError;
use catpoint_domain::event::Event;

use crate::ports::EventPublisher;

/// In-process event bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the event is simply dropped).
pub struct InProcessEventBus {
    sender: broadcast::Sender<Event>,
}

impl InProcessEventBus {
    /// Create a new event bus with the given channel capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events on this bus.
    ///
    /// Returns a receiver that will get all events published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }
}

impl EventPublisher for InProcessEventBus {
    fn publish(&self, event: Event) -> Result<(), CatpointError> {
        // send fails only when there are zero receivers
        let _ = self.sender.send(event);
        Ok(())
    }
}
