//! Menu catalog for the Ember ordering system.
//!
//! The catalog is a read-only list of orderable items loaded once at
//! startup. The core never mutates it; carts copy item snapshots out of it
//! and the presentation layer filters it by category.

use ember_types::{MenuCategory, MenuItem};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;

/// Read-only collection of menu items.
pub struct MenuCatalog {
	items: Vec<MenuItem>,
}

impl MenuCatalog {
	/// Builds a catalog from a list of items.
	///
	/// Items with a negative price violate the catalog invariant and are
	/// dropped with a warning rather than poisoning cart totals.
	pub fn new(items: Vec<MenuItem>) -> Self {
		let items = items
			.into_iter()
			.filter(|item| {
				if item.price < Decimal::ZERO {
					tracing::warn!(item_id = %item.id, "Dropping menu item with negative price");
					false
				} else {
					true
				}
			})
			.collect();
		Self { items }
	}

	/// The built-in demo catalog.
	pub fn standard() -> &'static MenuCatalog {
		static STANDARD: Lazy<MenuCatalog> = Lazy::new(|| MenuCatalog::new(standard_items()));
		&STANDARD
	}

	/// All items in catalog order.
	pub fn items(&self) -> &[MenuItem] {
		&self.items
	}

	/// Looks up an item by id.
	pub fn get(&self, item_id: &str) -> Option<&MenuItem> {
		self.items.iter().find(|item| item.id == item_id)
	}

	/// Items in the given category, or every item when `category` is `None`.
	pub fn by_category(&self, category: Option<MenuCategory>) -> Vec<&MenuItem> {
		match category {
			None => self.items.iter().collect(),
			Some(category) => self
				.items
				.iter()
				.filter(|item| item.category == category)
				.collect(),
		}
	}
}

fn item(
	id: &str,
	name: &str,
	description: &str,
	price_cents: i64,
	category: MenuCategory,
	is_veg: bool,
	is_available: bool,
) -> MenuItem {
	MenuItem {
		id: id.to_string(),
		name: name.to_string(),
		description: description.to_string(),
		price: Decimal::new(price_cents, 2),
		category,
		is_veg,
		is_available,
	}
}

/// The demo menu. Prices are in dollars with two decimal places.
fn standard_items() -> Vec<MenuItem> {
	use MenuCategory::{Desserts, Drinks, Mains, Starters};

	vec![
		item(
			"starter-1",
			"Truffle Arancini",
			"Crispy risotto balls with black truffle",
			1499,
			Starters,
			true,
			true,
		),
		item(
			"starter-2",
			"Seared Scallops",
			"Hand-dived scallops, cauliflower purée, pancetta crumb",
			2299,
			Starters,
			false,
			true,
		),
		item(
			"starter-3",
			"Burrata & Heirloom Tomato",
			"Creamy burrata, basil oil, aged balsamic",
			1699,
			Starters,
			true,
			true,
		),
		item(
			"main-1",
			"Wagyu Ribeye",
			"12oz A5 Wagyu with bone marrow butter",
			8999,
			Mains,
			false,
			true,
		),
		item(
			"main-2",
			"Pan-Roasted Duck Breast",
			"Cherry gastrique, confit leg croquette",
			4499,
			Mains,
			false,
			true,
		),
		item(
			"main-3",
			"Wild Mushroom Pasta",
			"Fresh tagliatelle with porcini",
			3299,
			Mains,
			true,
			true,
		),
		item(
			"main-4",
			"Miso-Glazed Black Cod",
			"48-hour marinated cod, charred baby leek",
			4899,
			Mains,
			false,
			false,
		),
		item(
			"drink-1",
			"Smoked Old Fashioned",
			"Rye, demerara, applewood smoke",
			1899,
			Drinks,
			true,
			true,
		),
		item(
			"drink-2",
			"Elderflower Spritz",
			"St-Germain, prosecco, fresh mint",
			1499,
			Drinks,
			true,
			true,
		),
		item(
			"drink-3",
			"Sommelier's Pairing",
			"Two glasses chosen for your mains",
			2999,
			Drinks,
			true,
			true,
		),
		item(
			"dessert-1",
			"Molten Chocolate Cake",
			"Warm chocolate fondant",
			1499,
			Desserts,
			true,
			true,
		),
		item(
			"dessert-2",
			"Crème Brûlée",
			"Tahitian vanilla, torched sugar crust",
			1299,
			Desserts,
			true,
			true,
		),
	]
}
