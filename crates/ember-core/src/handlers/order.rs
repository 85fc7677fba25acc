//! Order handler for placement and staff status updates.
//!
//! All order mutations initiated by callers flow through here so that every
//! applied change is published on the bus and the progression simulator is
//! started and stopped at the right moments. The store stays passive; this
//! handler is the only place that pairs a mutation with its event.

use crate::engine::event_bus::EventBus;
use ember_lifecycle::ProgressionScheduler;
use ember_store::{OrderStore, StoreError};
use ember_types::{truncate_id, Order, OrderEvent, OrderStatus, RestaurantEvent};
use std::sync::Arc;

/// Handler for order placement and status updates.
pub struct OrderHandler {
	store: Arc<OrderStore>,
	scheduler: Arc<ProgressionScheduler>,
	event_bus: EventBus,
}

impl OrderHandler {
	pub fn new(
		store: Arc<OrderStore>,
		scheduler: Arc<ProgressionScheduler>,
		event_bus: EventBus,
	) -> Self {
		Self {
			store,
			scheduler,
			event_bus,
		}
	}

	/// Registers a checked-out order and starts its automatic progression.
	pub async fn handle_placed(&self, order: Order) -> Result<(), StoreError> {
		let order_id = order.id.clone();
		self.store.insert(order.clone()).await?;
		self.scheduler.schedule(&order_id).await;

		tracing::info!(
			order_id = %truncate_id(&order_id),
			total = %order.total_amount,
			"Order accepted onto the floor"
		);
		self.event_bus
			.publish(RestaurantEvent::Order(OrderEvent::Placed { order }))
			.ok();
		Ok(())
	}

	/// Applies a staff-initiated status transition.
	///
	/// Forward moves may skip steps; the store enforces legality. A applied
	/// terminal transition also stops the order's progression task, and a
	/// rejected transition is published so observers can surface it.
	pub async fn handle_status_update(
		&self,
		order_id: &str,
		new_status: OrderStatus,
	) -> Result<Order, StoreError> {
		let before = self
			.store
			.get(order_id)
			.await
			.ok_or_else(|| StoreError::NotFound(order_id.to_string()))?;

		match self.store.update_status(order_id, new_status).await {
			Ok(order) => {
				if order.status.is_terminal() {
					self.scheduler.cancel(order_id).await;
				}
				self.event_bus
					.publish(RestaurantEvent::Order(OrderEvent::StatusChanged {
						order_id: order_id.to_string(),
						from: before.status,
						to: order.status,
					}))
					.ok();
				Ok(order)
			}
			Err(StoreError::InvalidTransition { from, to }) => {
				tracing::warn!(
					order_id = %truncate_id(order_id),
					from = %from,
					to = %to,
					"Rejected status transition"
				);
				self.event_bus
					.publish(RestaurantEvent::Order(OrderEvent::TransitionRejected {
						order_id: order_id.to_string(),
						from,
						to,
					}))
					.ok();
				Err(StoreError::InvalidTransition { from, to })
			}
			Err(err) => Err(err),
		}
	}
}
