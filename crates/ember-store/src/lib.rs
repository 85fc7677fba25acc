//! Order store for the Ember ordering system.
//!
//! The store is the single authoritative registry of all placed orders for
//! the process lifetime. It owns every order exclusively: callers get
//! snapshots out, and all mutation goes through [`OrderStore::insert`] and
//! [`OrderStore::update_status`], which serializes concurrent manual and
//! automatic transitions behind one write lock and validates each one
//! against the current status before applying it.

use chrono::Utc;
use ember_types::{truncate_id, Order, OrderStatus};
use thiserror::Error;
use tokio::sync::RwLock;

mod seed;

pub use seed::demo_orders;

/// Errors that can occur during order store operations.
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
	/// Error that occurs when a requested order is not found.
	#[error("Order not found: {0}")]
	NotFound(String),
	/// Error that occurs when inserting an order whose id is already registered.
	#[error("Order already exists: {0}")]
	DuplicateOrder(String),
	/// Error that occurs when a requested transition is not a legal move.
	#[error("Invalid status transition from {from} to {to}")]
	InvalidTransition { from: OrderStatus, to: OrderStatus },
}

/// Active orders grouped the way the kitchen display lays them out.
#[derive(Debug, Clone, Default)]
pub struct KitchenView {
	/// Orders waiting to be accepted.
	pub new_orders: Vec<Order>,
	/// Orders being cooked; confirmed orders queue here too.
	pub in_preparation: Vec<Order>,
	/// Orders plated and waiting to be served.
	pub ready: Vec<Order>,
}

/// The authoritative in-memory order registry.
///
/// Orders are kept most-recent-first for display. No persistence: state
/// lives for the process lifetime only.
pub struct OrderStore {
	orders: RwLock<Vec<Order>>,
}

impl OrderStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self {
			orders: RwLock::new(Vec::new()),
		}
	}

	/// Registers a new order at the front of the collection.
	pub async fn insert(&self, order: Order) -> Result<(), StoreError> {
		let mut orders = self.orders.write().await;
		if orders.iter().any(|existing| existing.id == order.id) {
			return Err(StoreError::DuplicateOrder(order.id));
		}
		tracing::debug!(order_id = %truncate_id(&order.id), status = %order.status, "Order registered");
		orders.insert(0, order);
		Ok(())
	}

	/// Applies a status transition and stamps `updated_at`.
	///
	/// The transition is validated against the order's current status at
	/// the moment the write lock is held, so a stale caller can never move
	/// an order backward or reopen a terminal state. Returns the updated
	/// order snapshot on success.
	pub async fn update_status(
		&self,
		order_id: &str,
		new_status: OrderStatus,
	) -> Result<Order, StoreError> {
		let mut orders = self.orders.write().await;
		let order = orders
			.iter_mut()
			.find(|order| order.id == order_id)
			.ok_or_else(|| StoreError::NotFound(order_id.to_string()))?;

		let from = order.status;
		if !from.can_transition_to(new_status) {
			return Err(StoreError::InvalidTransition {
				from,
				to: new_status,
			});
		}

		order.status = new_status;
		order.updated_at = Utc::now();
		tracing::info!(
			order_id = %truncate_id(order_id),
			from = %from,
			to = %new_status,
			"Order status updated"
		);
		Ok(order.clone())
	}

	/// Looks up an order snapshot by id.
	pub async fn get(&self, order_id: &str) -> Option<Order> {
		let orders = self.orders.read().await;
		orders.iter().find(|order| order.id == order_id).cloned()
	}

	/// Snapshot of every order, most-recent-first.
	pub async fn all(&self) -> Vec<Order> {
		self.orders.read().await.clone()
	}

	/// Orders that still need kitchen attention, store order preserved.
	pub async fn active(&self) -> Vec<Order> {
		let orders = self.orders.read().await;
		orders.iter().filter(|order| order.is_active()).cloned().collect()
	}

	/// Active orders grouped into the kitchen display columns.
	pub async fn kitchen_view(&self) -> KitchenView {
		let orders = self.orders.read().await;
		let mut view = KitchenView::default();
		for order in orders.iter().filter(|order| order.is_active()) {
			match order.status {
				OrderStatus::Pending => view.new_orders.push(order.clone()),
				OrderStatus::Confirmed | OrderStatus::Preparing => {
					view.in_preparation.push(order.clone())
				}
				OrderStatus::Ready => view.ready.push(order.clone()),
				OrderStatus::Served | OrderStatus::Cancelled => {}
			}
		}
		view
	}

	/// Number of registered orders.
	pub async fn len(&self) -> usize {
		self.orders.read().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.orders.read().await.is_empty()
	}

	/// Pre-populates the store with representative historical orders.
	///
	/// Demo convenience only; the dashboard and kitchen views are empty
	/// without it. Fails if called twice (the ids collide).
	pub async fn seed_demo_orders(&self) -> Result<(), StoreError> {
		// Insert oldest-last so the display order matches the fixture.
		for order in demo_orders(Utc::now()).into_iter().rev() {
			self.insert(order).await?;
		}
		Ok(())
	}
}

impl Default for OrderStore {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::Utc;
	use ember_types::{CartLine, MenuCategory, MenuItem};
	use rust_decimal::Decimal;

	fn order(id: &str, status: OrderStatus) -> Order {
		let created_at = Utc::now();
		let item = MenuItem {
			id: "main-3".to_string(),
			name: "Wild Mushroom Pasta".to_string(),
			description: "Fresh tagliatelle with porcini".to_string(),
			price: Decimal::new(3299, 2),
			category: MenuCategory::Mains,
			is_veg: true,
			is_available: true,
		};
		Order {
			id: id.to_string(),
			lines: vec![CartLine {
				item,
				quantity: 1,
				special_instructions: None,
			}],
			status,
			table_number: None,
			customer_name: None,
			total_amount: Decimal::new(3299, 2),
			created_at,
			updated_at: created_at,
			estimated_minutes: Some(18),
		}
	}

	#[tokio::test]
	async fn test_insert_prepends() {
		let store = OrderStore::new();
		store.insert(order("ORD-1", OrderStatus::Pending)).await.unwrap();
		store.insert(order("ORD-2", OrderStatus::Pending)).await.unwrap();

		let all = store.all().await;
		assert_eq!(all[0].id, "ORD-2");
		assert_eq!(all[1].id, "ORD-1");
	}

	#[tokio::test]
	async fn test_duplicate_id_rejected() {
		let store = OrderStore::new();
		store.insert(order("ORD-1", OrderStatus::Pending)).await.unwrap();
		let result = store.insert(order("ORD-1", OrderStatus::Pending)).await;
		assert_eq!(result, Err(StoreError::DuplicateOrder("ORD-1".to_string())));
		assert_eq!(store.len().await, 1);
	}

	#[tokio::test]
	async fn test_update_unknown_order_not_found() {
		let store = OrderStore::new();
		let result = store.update_status("ORD-404", OrderStatus::Confirmed).await;
		assert_eq!(result, Err(StoreError::NotFound("ORD-404".to_string())));
	}

	#[tokio::test]
	async fn test_forward_skip_allowed_and_stamps_updated_at() {
		let store = OrderStore::new();
		store.insert(order("ORD-1", OrderStatus::Pending)).await.unwrap();

		// The kitchen accepts straight into preparing, skipping confirmed.
		let updated = store
			.update_status("ORD-1", OrderStatus::Preparing)
			.await
			.unwrap();
		assert_eq!(updated.status, OrderStatus::Preparing);
		assert!(updated.updated_at >= updated.created_at);
	}

	#[tokio::test]
	async fn test_backward_move_rejected_without_side_effects() {
		let store = OrderStore::new();
		store.insert(order("ORD-1", OrderStatus::Ready)).await.unwrap();
		let before = store.get("ORD-1").await.unwrap();

		let result = store.update_status("ORD-1", OrderStatus::Preparing).await;
		assert_eq!(
			result,
			Err(StoreError::InvalidTransition {
				from: OrderStatus::Ready,
				to: OrderStatus::Preparing,
			})
		);

		let after = store.get("ORD-1").await.unwrap();
		assert_eq!(after.status, OrderStatus::Ready);
		assert_eq!(after.updated_at, before.updated_at);
	}

	#[tokio::test]
	async fn test_terminal_orders_frozen() {
		let store = OrderStore::new();
		store.insert(order("ORD-1", OrderStatus::Served)).await.unwrap();
		store.insert(order("ORD-2", OrderStatus::Cancelled)).await.unwrap();

		for target in [
			OrderStatus::Pending,
			OrderStatus::Ready,
			OrderStatus::Cancelled,
		] {
			assert!(store.update_status("ORD-1", target).await.is_err());
			assert!(store.update_status("ORD-2", target).await.is_err());
		}
	}

	#[tokio::test]
	async fn test_cancellation_from_any_active_state() {
		let store = OrderStore::new();
		store.insert(order("ORD-1", OrderStatus::Ready)).await.unwrap();
		let updated = store
			.update_status("ORD-1", OrderStatus::Cancelled)
			.await
			.unwrap();
		assert_eq!(updated.status, OrderStatus::Cancelled);
	}

	#[tokio::test]
	async fn test_status_sequence_is_monotonic() {
		let store = OrderStore::new();
		store.insert(order("ORD-1", OrderStatus::Pending)).await.unwrap();

		let attempts = [
			OrderStatus::Confirmed,
			OrderStatus::Preparing,
			OrderStatus::Pending,  // backward, rejected
			OrderStatus::Ready,
			OrderStatus::Confirmed, // backward, rejected
			OrderStatus::Served,
			OrderStatus::Preparing, // terminal, rejected
		];

		let mut observed = vec![store.get("ORD-1").await.unwrap().status];
		for target in attempts {
			let _ = store.update_status("ORD-1", target).await;
			observed.push(store.get("ORD-1").await.unwrap().status);
		}

		let ranks: Vec<usize> = observed.iter().filter_map(|status| status.rank()).collect();
		assert!(ranks.windows(2).all(|pair| pair[0] <= pair[1]));
		assert_eq!(*observed.last().unwrap(), OrderStatus::Served);
	}

	#[tokio::test]
	async fn test_active_excludes_terminal_and_preserves_order() {
		let store = OrderStore::new();
		store.insert(order("ORD-1", OrderStatus::Served)).await.unwrap();
		store.insert(order("ORD-2", OrderStatus::Pending)).await.unwrap();
		store.insert(order("ORD-3", OrderStatus::Cancelled)).await.unwrap();
		store.insert(order("ORD-4", OrderStatus::Ready)).await.unwrap();

		let active: Vec<String> = store.active().await.into_iter().map(|o| o.id).collect();
		assert_eq!(active, vec!["ORD-4".to_string(), "ORD-2".to_string()]);
	}

	#[tokio::test]
	async fn test_kitchen_view_groups_confirmed_with_preparing() {
		let store = OrderStore::new();
		store.insert(order("ORD-1", OrderStatus::Pending)).await.unwrap();
		store.insert(order("ORD-2", OrderStatus::Confirmed)).await.unwrap();
		store.insert(order("ORD-3", OrderStatus::Preparing)).await.unwrap();
		store.insert(order("ORD-4", OrderStatus::Ready)).await.unwrap();
		store.insert(order("ORD-5", OrderStatus::Served)).await.unwrap();

		let view = store.kitchen_view().await;
		assert_eq!(view.new_orders.len(), 1);
		assert_eq!(view.in_preparation.len(), 2);
		assert_eq!(view.ready.len(), 1);
	}

	#[tokio::test]
	async fn test_seed_fixture() {
		let store = OrderStore::new();
		store.seed_demo_orders().await.unwrap();

		let all = store.all().await;
		assert_eq!(all.len(), 3);
		assert_eq!(all[0].id, "ORD-ABC123");
		assert_eq!(all[0].status, OrderStatus::Preparing);
		assert_eq!(all[0].total_amount, Decimal::new(19497, 2));
		assert_eq!(all[1].total_amount, Decimal::new(3299, 2));
		assert_eq!(all[2].total_amount, Decimal::new(2998, 2));

		// Seeding twice collides on ids.
		assert!(store.seed_demo_orders().await.is_err());
	}
}
