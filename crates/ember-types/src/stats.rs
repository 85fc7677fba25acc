//! Derived dashboard statistics.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Operational metrics derived from the order registry.
///
/// This is a pure derived value: it is recomputed on demand and never
/// stored. "Today" is bounded by the local calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
	/// Orders placed on the current local calendar day.
	pub total_orders_today: usize,
	/// Revenue over the same set of orders.
	pub total_revenue_today: Decimal,
	/// Orders not yet served or cancelled, irrespective of day.
	pub active_order_count: usize,
	/// Mean estimated preparation time over served orders, in minutes.
	pub avg_prep_time_minutes: f64,
}
