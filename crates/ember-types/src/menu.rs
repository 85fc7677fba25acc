//! Menu catalog types.
//!
//! The menu catalog is a read-only data source owned by the host; the core
//! only consumes these records. Items are immutable once the catalog is
//! loaded and are never mutated by cart or order processing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four menu sections a dish can belong to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MenuCategory {
	Starters,
	Mains,
	Drinks,
	Desserts,
}

impl MenuCategory {
	/// All categories in display order.
	pub const ALL: [MenuCategory; 4] = [
		MenuCategory::Starters,
		MenuCategory::Mains,
		MenuCategory::Drinks,
		MenuCategory::Desserts,
	];
}

impl fmt::Display for MenuCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			MenuCategory::Starters => write!(f, "starters"),
			MenuCategory::Mains => write!(f, "mains"),
			MenuCategory::Drinks => write!(f, "drinks"),
			MenuCategory::Desserts => write!(f, "desserts"),
		}
	}
}

/// A single orderable dish or drink.
///
/// Invariant: `price` is never negative. Unavailable items stay listed so
/// the presentation layer can render them greyed out, but the cart rejects
/// them defensively on add.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
	/// Unique identifier within the catalog.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Short description shown on the menu card.
	pub description: String,
	/// Unit price.
	pub price: Decimal,
	/// Menu section this item belongs to.
	pub category: MenuCategory,
	/// Whether the item is vegetarian.
	pub is_veg: bool,
	/// Whether the item can currently be ordered.
	pub is_available: bool,
}
