//! Event types for inter-service communication.
//!
//! Events flow through a broadcast bus so that the engine, the progression
//! simulator and any observing component can react to order changes without
//! holding references to each other.

use crate::order::{Order, OrderStatus};
use serde::{Deserialize, Serialize};

/// Main event type encompassing all events published on the bus.
///
/// Events are categorized by the part of the system that produces them,
/// allowing consumers to filter and handle specific event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RestaurantEvent {
	/// Events from order placement and the status workflow.
	Order(OrderEvent),
}

/// Events related to order placement and status changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OrderEvent {
	/// A checked-out order has been registered in the store.
	Placed { order: Order },
	/// An order moved to a new status.
	StatusChanged {
		order_id: String,
		from: OrderStatus,
		to: OrderStatus,
	},
	/// A requested transition was rejected (backward move or frozen order).
	TransitionRejected {
		order_id: String,
		from: OrderStatus,
		to: OrderStatus,
	},
}
