//! Event bus port — publish/subscribe for domain events.

use catpoint_domain::error::CatpointError;
use catpoint_domain::event::Event;

/// Publishes domain events to interested subscribers.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    ///
    /// # Errors
    ///
    /// Returns an error if the event could not be handed over.
    fn publish(&self, event: Event) -> Result<(), CatpointError>;
}

impl<T: EventPublisher + ?Sized> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, event: Event) -> Result<(), CatpointError> {
        (**self).publish(event)
    }
}
