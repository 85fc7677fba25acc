//! Representative historical orders for demo startup.
//!
//! These mirror a small lunchtime snapshot: one order on the pass, one just
//! placed, one waiting to be run to the table. Timestamps are expressed as
//! offsets from `now` so the dashboard's "today" metrics always include them.

use chrono::{DateTime, Duration, Utc};
use ember_types::{CartLine, MenuCategory, MenuItem, Order, OrderStatus};
use rust_decimal::Decimal;

fn item(
	id: &str,
	name: &str,
	description: &str,
	price_cents: i64,
	category: MenuCategory,
	is_veg: bool,
) -> MenuItem {
	MenuItem {
		id: id.to_string(),
		name: name.to_string(),
		description: description.to_string(),
		price: Decimal::new(price_cents, 2),
		category,
		is_veg,
		is_available: true,
	}
}

fn line(item: MenuItem, quantity: u32) -> CartLine {
	CartLine {
		item,
		quantity,
		special_instructions: None,
	}
}

/// The demo fixture, newest-first like the store keeps them.
pub fn demo_orders(now: DateTime<Utc>) -> Vec<Order> {
	vec![
		Order {
			id: "ORD-ABC123".to_string(),
			lines: vec![
				line(
					item(
						"main-1",
						"Wagyu Ribeye",
						"12oz A5 Wagyu with bone marrow butter",
						8999,
						MenuCategory::Mains,
						false,
					),
					2,
				),
				line(
					item(
						"starter-1",
						"Truffle Arancini",
						"Crispy risotto balls with black truffle",
						1499,
						MenuCategory::Starters,
						true,
					),
					1,
				),
			],
			status: OrderStatus::Preparing,
			table_number: Some("12".to_string()),
			customer_name: None,
			total_amount: Decimal::new(19497, 2),
			created_at: now - Duration::minutes(15),
			updated_at: now - Duration::minutes(10),
			estimated_minutes: Some(20),
		},
		Order {
			id: "ORD-DEF456".to_string(),
			lines: vec![line(
				item(
					"main-3",
					"Wild Mushroom Pasta",
					"Fresh tagliatelle with porcini",
					3299,
					MenuCategory::Mains,
					true,
				),
				1,
			)],
			status: OrderStatus::Pending,
			table_number: Some("7".to_string()),
			customer_name: None,
			total_amount: Decimal::new(3299, 2),
			created_at: now - Duration::minutes(2),
			updated_at: now - Duration::minutes(2),
			estimated_minutes: Some(18),
		},
		Order {
			id: "ORD-GHI789".to_string(),
			lines: vec![line(
				item(
					"dessert-1",
					"Molten Chocolate Cake",
					"Warm chocolate fondant",
					1499,
					MenuCategory::Desserts,
					true,
				),
				2,
			)],
			status: OrderStatus::Ready,
			table_number: Some("3".to_string()),
			customer_name: None,
			total_amount: Decimal::new(2998, 2),
			created_at: now - Duration::minutes(25),
			updated_at: now,
			estimated_minutes: Some(12),
		},
	]
}
