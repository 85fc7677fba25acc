//! Dashboard statistics for the Ember ordering system.
//!
//! Pure read-only aggregation over the order registry. Nothing here is
//! cached or stored: every call recomputes from a snapshot, so the numbers
//! can never drift from the orders they describe.

use chrono::{DateTime, Local, Utc};
use ember_store::OrderStore;
use ember_types::{DashboardStats, Order, OrderStatus};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Estimate assumed for a served order that never got one, in minutes.
pub const DEFAULT_PREP_ESTIMATE_MINUTES: u32 = 15;

/// Baseline average reported before any order has been served, in minutes.
pub const BASELINE_AVG_PREP_MINUTES: f64 = 18.0;

/// Derives the dashboard metrics from an order snapshot.
///
/// "Today" is the local calendar day containing `now`; revenue and order
/// counts are bounded by local midnight, while the active count spans the
/// whole registry.
pub fn compute(orders: &[Order], now: DateTime<Utc>) -> DashboardStats {
	let today = now.with_timezone(&Local).date_naive();

	let mut total_orders_today = 0;
	let mut total_revenue_today = Decimal::ZERO;
	for order in orders {
		if order.created_at.with_timezone(&Local).date_naive() == today {
			total_orders_today += 1;
			total_revenue_today += order.total_amount;
		}
	}

	let active_order_count = orders.iter().filter(|order| order.is_active()).count();

	let served: Vec<&Order> = orders
		.iter()
		.filter(|order| order.status == OrderStatus::Served)
		.collect();
	let avg_prep_time_minutes = if served.is_empty() {
		BASELINE_AVG_PREP_MINUTES
	} else {
		let total: u32 = served
			.iter()
			.map(|order| order.estimated_minutes.unwrap_or(DEFAULT_PREP_ESTIMATE_MINUTES))
			.sum();
		f64::from(total) / served.len() as f64
	};

	DashboardStats {
		total_orders_today,
		total_revenue_today,
		active_order_count,
		avg_prep_time_minutes,
	}
}

/// Store-reading wrapper around [`compute`].
pub struct StatsAggregator {
	store: Arc<OrderStore>,
}

impl StatsAggregator {
	pub fn new(store: Arc<OrderStore>) -> Self {
		Self { store }
	}

	/// Current dashboard metrics.
	pub async fn dashboard(&self) -> DashboardStats {
		let orders = self.store.all().await;
		compute(&orders, Utc::now())
	}
}
