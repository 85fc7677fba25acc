//! Broadcast event bus for inter-service communication.
//!
//! A thin wrapper around a tokio broadcast channel. Publishing never blocks;
//! an event published with no live subscribers is simply dropped, which is
//! the desired behaviour for observers that come and go.

use ember_types::RestaurantEvent;
use tokio::sync::broadcast;

/// Broadcast channel carrying [`RestaurantEvent`]s between services.
#[derive(Clone)]
pub struct EventBus {
	sender: broadcast::Sender<RestaurantEvent>,
}

impl EventBus {
	/// Creates a bus buffering up to `capacity` events per subscriber.
	pub fn new(capacity: usize) -> Self {
		let (sender, _) = broadcast::channel(capacity);
		Self { sender }
	}

	/// Publishes an event to all current subscribers.
	///
	/// Returns the number of subscribers that received the event; the error
	/// case (no subscribers) is routinely ignored with `.ok()`.
	pub fn publish(
		&self,
		event: RestaurantEvent,
	) -> Result<usize, broadcast::error::SendError<RestaurantEvent>> {
		self.sender.send(event)
	}

	/// Creates a new subscription starting at the current position.
	pub fn subscribe(&self) -> broadcast::Receiver<RestaurantEvent> {
		self.sender.subscribe()
	}

	/// Raw sender handle for components that publish without depending on
	/// this crate.
	pub fn sender(&self) -> broadcast::Sender<RestaurantEvent> {
		self.sender.clone()
	}
}
