//! Cart module for the Ember ordering system.
//!
//! The cart accumulates a pending selection before checkout. Mutations are
//! expressed as [`CartCommand`] values processed by a pure reducer over the
//! line list, so the transition logic is unit-testable without the service
//! wrapper. Checkout converts the accumulated lines into an [`Order`] and
//! clears the cart.

use chrono::Utc;
use ember_types::{truncate_id, CartLine, MenuItem, Order, OrderIdGenerator, OrderStatus};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rust_decimal::Decimal;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

/// Errors that can occur during cart operations.
///
/// All of these are local, recoverable conditions reported to the calling
/// layer; none of them change cart state.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
	/// Error that occurs when checking out an empty cart.
	#[error("Cart is empty")]
	EmptyCart,
	/// Error that occurs when adding an item that is not currently orderable.
	#[error("Item not available: {0}")]
	ItemUnavailable(String),
	/// Error that occurs when updating the quantity of a line that does not exist.
	#[error("No cart line for item: {0}")]
	LineNotFound(String),
}

/// A cart mutation, processed by [`apply`].
#[derive(Debug, Clone)]
pub enum CartCommand {
	/// Add an item, merging into an existing line for the same item id.
	AddItem {
		item: MenuItem,
		quantity: u32,
		instructions: Option<String>,
	},
	/// Remove a line. No-op when absent.
	RemoveItem { item_id: String },
	/// Replace a line's quantity; zero behaves like [`CartCommand::RemoveItem`].
	SetQuantity { item_id: String, quantity: u32 },
	/// Replace a line's kitchen note. No-op when the line is absent.
	SetInstructions { item_id: String, text: String },
	/// Empty the cart.
	Clear,
}

/// Applies a command to the line list.
///
/// This is the whole of the cart transition logic: the service wrapper only
/// adds locking and checkout on top. Rejected commands leave the lines
/// untouched.
pub fn apply(lines: &mut Vec<CartLine>, command: CartCommand) -> Result<(), CartError> {
	match command {
		CartCommand::AddItem {
			item,
			quantity,
			instructions,
		} => {
			if !item.is_available {
				return Err(CartError::ItemUnavailable(item.id));
			}
			// A zero quantity is a caller slip, not a removal request.
			let quantity = quantity.max(1);
			match lines.iter_mut().find(|line| line.item.id == item.id) {
				Some(line) => {
					// Repeat adds accumulate quantity; the original note stays.
					line.quantity += quantity;
				}
				None => lines.push(CartLine {
					item,
					quantity,
					special_instructions: instructions,
				}),
			}
			Ok(())
		}
		CartCommand::RemoveItem { item_id } => {
			lines.retain(|line| line.item.id != item_id);
			Ok(())
		}
		CartCommand::SetQuantity { item_id, quantity } => {
			if quantity == 0 {
				lines.retain(|line| line.item.id != item_id);
				return Ok(());
			}
			match lines.iter_mut().find(|line| line.item.id == item_id) {
				Some(line) => {
					line.quantity = quantity;
					Ok(())
				}
				None => Err(CartError::LineNotFound(item_id)),
			}
		}
		CartCommand::SetInstructions { item_id, text } => {
			if let Some(line) = lines.iter_mut().find(|line| line.item.id == item_id) {
				line.special_instructions = Some(text);
			}
			Ok(())
		}
		CartCommand::Clear => {
			lines.clear();
			Ok(())
		}
	}
}

/// Checkout behaviour knobs, mapped from the timing configuration.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
	/// Artificial delay applied before the order is produced.
	pub placement_latency: Duration,
	/// Lower bound of the randomized preparation estimate, in minutes.
	pub estimate_min_minutes: u32,
	/// Upper bound (exclusive) of the randomized preparation estimate.
	pub estimate_max_minutes: u32,
	/// Seed for the estimate RNG; entropy when unset.
	pub rng_seed: Option<u64>,
}

impl Default for CheckoutSettings {
	fn default() -> Self {
		Self {
			placement_latency: Duration::from_millis(1000),
			estimate_min_minutes: 15,
			estimate_max_minutes: 30,
			rng_seed: None,
		}
	}
}

/// The live cart for one dining session.
///
/// Holds the line list behind a lock and derives totals from it on every
/// read. One cart lives per session; checkout clears it as a side effect.
pub struct CartService {
	lines: RwLock<Vec<CartLine>>,
	ids: OrderIdGenerator,
	rng: Mutex<StdRng>,
	settings: CheckoutSettings,
}

impl CartService {
	/// Creates an empty cart with the given checkout settings.
	pub fn new(settings: CheckoutSettings) -> Self {
		let rng = match settings.rng_seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_entropy(),
		};
		Self {
			lines: RwLock::new(Vec::new()),
			ids: OrderIdGenerator::new(),
			rng: Mutex::new(rng),
			settings,
		}
	}

	/// Adds `quantity` of `item`, merging into an existing line.
	///
	/// Quantities below 1 are treated as 1. Unavailable items are rejected
	/// even though the presentation layer already disables the add action.
	pub async fn add_item(
		&self,
		item: MenuItem,
		quantity: u32,
		instructions: Option<String>,
	) -> Result<(), CartError> {
		let mut lines = self.lines.write().await;
		apply(
			&mut lines,
			CartCommand::AddItem {
				item,
				quantity,
				instructions,
			},
		)
	}

	/// Deletes the line for `item_id`. No-op when absent.
	pub async fn remove_item(&self, item_id: &str) -> Result<(), CartError> {
		let mut lines = self.lines.write().await;
		apply(
			&mut lines,
			CartCommand::RemoveItem {
				item_id: item_id.to_string(),
			},
		)
	}

	/// Replaces the quantity of the line for `item_id`; zero removes it.
	pub async fn set_quantity(&self, item_id: &str, quantity: u32) -> Result<(), CartError> {
		let mut lines = self.lines.write().await;
		apply(
			&mut lines,
			CartCommand::SetQuantity {
				item_id: item_id.to_string(),
				quantity,
			},
		)
	}

	/// Replaces the kitchen note on the line for `item_id`. No-op when absent.
	pub async fn set_instructions(&self, item_id: &str, text: &str) -> Result<(), CartError> {
		let mut lines = self.lines.write().await;
		apply(
			&mut lines,
			CartCommand::SetInstructions {
				item_id: item_id.to_string(),
				text: text.to_string(),
			},
		)
	}

	/// Empties the cart.
	pub async fn clear(&self) {
		let mut lines = self.lines.write().await;
		// Clear cannot fail; the reducer signature is shared with fallible commands.
		let _ = apply(&mut lines, CartCommand::Clear);
	}

	/// Snapshot of the current lines in insertion order.
	pub async fn lines(&self) -> Vec<CartLine> {
		self.lines.read().await.clone()
	}

	/// Sum of quantities over all lines.
	pub async fn total_items(&self) -> u32 {
		self.lines.read().await.iter().map(|line| line.quantity).sum()
	}

	/// Sum of price times quantity over all lines.
	pub async fn total_amount(&self) -> Decimal {
		self.lines.read().await.iter().map(CartLine::line_total).sum()
	}

	pub async fn is_empty(&self) -> bool {
		self.lines.read().await.is_empty()
	}

	/// Converts the cart contents into a pending [`Order`] and clears the cart.
	///
	/// Fails on an empty cart before the placement latency is simulated.
	/// The produced order owns a snapshot of the lines: later cart mutations
	/// cannot affect it.
	pub async fn checkout(
		&self,
		table_number: Option<String>,
		customer_name: Option<String>,
	) -> Result<Order, CartError> {
		if self.lines.read().await.is_empty() {
			return Err(CartError::EmptyCart);
		}

		// Simulated placement latency, as if the order crossed a network.
		if !self.settings.placement_latency.is_zero() {
			tokio::time::sleep(self.settings.placement_latency).await;
		}

		let mut lines = self.lines.write().await;
		if lines.is_empty() {
			// Cleared while the placement latency elapsed.
			return Err(CartError::EmptyCart);
		}

		let snapshot: Vec<CartLine> = lines.drain(..).collect();
		let total_amount: Decimal = snapshot.iter().map(CartLine::line_total).sum();
		let estimated_minutes = {
			let mut rng = self.rng.lock().await;
			let min = self.settings.estimate_min_minutes;
			// gen_range panics on an empty range; clamp a degenerate configuration.
			let max = self.settings.estimate_max_minutes.max(min + 1);
			rng.gen_range(min..max)
		};

		let now = Utc::now();
		let order = Order {
			id: self.ids.next_id(now.timestamp_millis() as u64),
			lines: snapshot,
			status: OrderStatus::Pending,
			table_number,
			customer_name,
			total_amount,
			created_at: now,
			updated_at: now,
			estimated_minutes: Some(estimated_minutes),
		};

		tracing::info!(
			order_id = %truncate_id(&order.id),
			total = %order.total_amount,
			estimated_minutes,
			"Order placed"
		);

		Ok(order)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ember_types::MenuCategory;

	fn menu_item(id: &str, price_cents: i64, available: bool) -> MenuItem {
		MenuItem {
			id: id.to_string(),
			name: format!("Item {id}"),
			description: String::new(),
			price: Decimal::new(price_cents, 2),
			category: MenuCategory::Mains,
			is_veg: false,
			is_available: available,
		}
	}

	fn test_cart() -> CartService {
		CartService::new(CheckoutSettings {
			placement_latency: Duration::ZERO,
			rng_seed: Some(7),
			..CheckoutSettings::default()
		})
	}

	#[tokio::test]
	async fn test_add_merges_by_item_id() {
		let cart = test_cart();
		cart.add_item(menu_item("main-1", 8999, true), 2, None)
			.await
			.unwrap();
		cart.add_item(menu_item("main-1", 8999, true), 1, None)
			.await
			.unwrap();

		let lines = cart.lines().await;
		assert_eq!(lines.len(), 1);
		assert_eq!(lines[0].quantity, 3);
	}

	#[tokio::test]
	async fn test_repeat_add_keeps_original_instructions() {
		let cart = test_cart();
		cart.add_item(menu_item("main-1", 8999, true), 1, Some("no butter".to_string()))
			.await
			.unwrap();
		cart.add_item(menu_item("main-1", 8999, true), 1, Some("extra butter".to_string()))
			.await
			.unwrap();

		let lines = cart.lines().await;
		assert_eq!(lines[0].special_instructions.as_deref(), Some("no butter"));
	}

	#[tokio::test]
	async fn test_quantity_never_drops_below_one() {
		let cart = test_cart();
		// A zero-quantity add still produces one unit.
		cart.add_item(menu_item("main-1", 8999, true), 0, None)
			.await
			.unwrap();
		assert_eq!(cart.lines().await[0].quantity, 1);

		// Setting quantity to zero removes the line entirely.
		cart.set_quantity("main-1", 0).await.unwrap();
		assert!(cart.is_empty().await);

		// No surviving line ever carries quantity zero.
		cart.add_item(menu_item("main-2", 4499, true), 3, None)
			.await
			.unwrap();
		cart.set_quantity("main-2", 1).await.unwrap();
		assert!(cart.lines().await.iter().all(|line| line.quantity >= 1));
	}

	#[tokio::test]
	async fn test_totals_track_every_mutation() {
		let cart = test_cart();
		cart.add_item(menu_item("main-1", 8999, true), 2, None)
			.await
			.unwrap();
		cart.add_item(menu_item("starter-1", 1499, true), 1, None)
			.await
			.unwrap();
		assert_eq!(cart.total_items().await, 3);
		assert_eq!(cart.total_amount().await, Decimal::new(19497, 2));

		cart.set_quantity("main-1", 1).await.unwrap();
		assert_eq!(cart.total_items().await, 2);
		assert_eq!(cart.total_amount().await, Decimal::new(10498, 2));

		cart.remove_item("starter-1").await.unwrap();
		assert_eq!(cart.total_items().await, 1);
		assert_eq!(cart.total_amount().await, Decimal::new(8999, 2));

		cart.clear().await;
		assert_eq!(cart.total_items().await, 0);
		assert_eq!(cart.total_amount().await, Decimal::ZERO);
	}

	#[tokio::test]
	async fn test_unavailable_item_rejected() {
		let cart = test_cart();
		let result = cart.add_item(menu_item("main-4", 4899, false), 1, None).await;
		assert_eq!(result, Err(CartError::ItemUnavailable("main-4".to_string())));
		assert!(cart.is_empty().await);
	}

	#[tokio::test]
	async fn test_remove_absent_line_is_noop() {
		let cart = test_cart();
		cart.remove_item("ghost").await.unwrap();
		assert!(cart.is_empty().await);
	}

	#[tokio::test]
	async fn test_set_quantity_on_absent_line_rejected() {
		let cart = test_cart();
		let result = cart.set_quantity("ghost", 2).await;
		assert_eq!(result, Err(CartError::LineNotFound("ghost".to_string())));
	}

	#[tokio::test]
	async fn test_set_instructions_on_absent_line_is_noop() {
		let cart = test_cart();
		cart.set_instructions("ghost", "well done").await.unwrap();
		assert!(cart.is_empty().await);
	}

	#[tokio::test]
	async fn test_checkout_empty_cart_rejected() {
		let cart = test_cart();
		let result = cart.checkout(None, None).await;
		assert_eq!(result.unwrap_err(), CartError::EmptyCart);
		assert!(cart.is_empty().await);
	}

	#[tokio::test]
	async fn test_checkout_produces_pending_order_and_clears_cart() {
		let cart = test_cart();
		cart.add_item(menu_item("main-1", 8999, true), 2, None)
			.await
			.unwrap();
		cart.add_item(menu_item("starter-1", 1499, true), 1, None)
			.await
			.unwrap();

		let order = cart
			.checkout(Some("12".to_string()), Some("Avery".to_string()))
			.await
			.unwrap();

		assert!(order.id.starts_with("ORD-"));
		assert_eq!(order.status, OrderStatus::Pending);
		assert_eq!(order.total_amount, Decimal::new(19497, 2));
		assert_eq!(order.created_at, order.updated_at);
		assert_eq!(order.table_number.as_deref(), Some("12"));
		let estimate = order.estimated_minutes.unwrap();
		assert!((15..30).contains(&estimate));
		assert!(cart.is_empty().await);
	}

	#[tokio::test]
	async fn test_placed_order_unaffected_by_later_cart_mutations() {
		let cart = test_cart();
		cart.add_item(menu_item("main-1", 8999, true), 1, None)
			.await
			.unwrap();
		let order = cart.checkout(None, None).await.unwrap();

		// Fill the next selection and mutate it freely.
		cart.add_item(menu_item("dessert-1", 1499, true), 4, None)
			.await
			.unwrap();
		cart.set_quantity("dessert-1", 2).await.unwrap();

		assert_eq!(order.lines.len(), 1);
		assert_eq!(order.lines[0].item.id, "main-1");
		assert_eq!(order.total_amount, Decimal::new(8999, 2));
	}

	#[tokio::test]
	async fn test_rapid_checkouts_yield_distinct_ids() {
		let cart = test_cart();
		let mut seen = std::collections::HashSet::new();
		for _ in 0..50 {
			cart.add_item(menu_item("drink-2", 1499, true), 1, None)
				.await
				.unwrap();
			let order = cart.checkout(None, None).await.unwrap();
			assert!(seen.insert(order.id));
		}
	}
}
