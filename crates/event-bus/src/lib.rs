use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::trace;

use autofiller_core_types::AutofillError;

mod debounce;

pub use debounce::Debouncer;

/// Trait implemented by payload types that can be carried on the bus.
pub trait Event: Clone + Send + Sync + std::fmt::Debug + 'static {}

impl<T> Event for T where T: Clone + Send + Sync + std::fmt::Debug + 'static {}

#[async_trait]
pub trait EventBus<E>: Send + Sync
where
    E: Event,
{
    async fn publish(&self, event: E) -> Result<(), AutofillError>;
    fn subscribe(&self) -> broadcast::Receiver<E>;
}

/// In-memory broadcast bus. Publishing with no subscribers is an error, the
/// same as the underlying broadcast channel.
pub struct InMemoryBus<E>
where
    E: Event,
{
    sender: broadcast::Sender<E>,
}

impl<E> InMemoryBus<E>
where
    E: Event,
{
    pub fn new(capacity: usize) -> Arc<Self> {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Arc::new(Self { sender })
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes only when someone listens. Returns whether the event was
    /// delivered to at least one subscriber.
    pub fn publish_if_observed(&self, event: E) -> bool {
        if self.sender.receiver_count() == 0 {
            trace!("no subscribers, event dropped");
            return false;
        }
        self.sender.send(event).is_ok()
    }
}

#[async_trait]
impl<E> EventBus<E> for InMemoryBus<E>
where
    E: Event,
{
    async fn publish(&self, event: E) -> Result<(), AutofillError> {
        self.sender
            .send(event)
            .map(|_| ())
            .map_err(|err| AutofillError::new(err.to_string()))
    }

    fn subscribe(&self) -> broadcast::Receiver<E> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_reaches_subscribers() {
        let bus = InMemoryBus::<u32>::new(8);
        let mut rx = bus.subscribe();
        bus.publish(7).await.unwrap();
        assert_eq!(rx.recv().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn publish_without_subscribers_fails() {
        let bus = InMemoryBus::<u32>::new(8);
        assert!(bus.publish(1).await.is_err());
    }

    #[tokio::test]
    async fn unobserved_events_are_dropped_quietly() {
        let bus = InMemoryBus::<&'static str>::new(8);
        assert!(!bus.publish_if_observed("report"));
        let mut rx = bus.subscribe();
        assert!(bus.publish_if_observed("report"));
        assert_eq!(rx.recv().await.unwrap(), "report");
    }
}
