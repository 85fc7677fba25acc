//! Cart line types.

use crate::menu::MenuItem;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of an in-progress selection.
///
/// A given item id appears at most once per cart; repeated adds merge into
/// the existing line. The item is a snapshot copy, not a catalog reference,
/// so a placed order is not affected by later catalog changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
	/// Snapshot of the selected menu item.
	pub item: MenuItem,
	/// Number of units, always at least 1.
	pub quantity: u32,
	/// Free-form note passed to the kitchen.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub special_instructions: Option<String>,
}

impl CartLine {
	/// Price contribution of this line: unit price times quantity.
	pub fn line_total(&self) -> Decimal {
		self.item.price * Decimal::from(self.quantity)
	}
}
