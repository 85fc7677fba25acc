//! Order types for the ordering system.
//!
//! This module defines the placed order record and its status state machine.
//! An order is created from a checked-out cart and carries an immutable line
//! snapshot with a mutable, forward-only status.

use crate::cart::CartLine;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of an order as it moves through the kitchen workflow.
///
/// The canonical forward path is `Pending -> Confirmed -> Preparing ->
/// Ready -> Served`. `Cancelled` is reachable from any non-terminal state.
/// `Served` and `Cancelled` are terminal: once reached, no further
/// transition is permitted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
	/// Order placed, waiting for the kitchen to confirm.
	Pending,
	/// Order accepted by the kitchen.
	Confirmed,
	/// The kitchen is cooking the order.
	Preparing,
	/// The order is plated and waiting to be served.
	Ready,
	/// The order has been delivered to the table.
	Served,
	/// The order was cancelled before completion.
	Cancelled,
}

/// The canonical forward path through the workflow, in order.
pub const CANONICAL_PATH: [OrderStatus; 5] = [
	OrderStatus::Pending,
	OrderStatus::Confirmed,
	OrderStatus::Preparing,
	OrderStatus::Ready,
	OrderStatus::Served,
];

impl OrderStatus {
	/// Position along the canonical path, `None` for `Cancelled`.
	pub fn rank(&self) -> Option<usize> {
		CANONICAL_PATH.iter().position(|s| s == self)
	}

	/// Whether this status admits no further transitions.
	pub fn is_terminal(&self) -> bool {
		matches!(self, OrderStatus::Served | OrderStatus::Cancelled)
	}

	/// The next step along the canonical path, as taken by the automatic
	/// progression simulator. `None` once the order is served or cancelled.
	pub fn next_step(&self) -> Option<OrderStatus> {
		let rank = self.rank()?;
		CANONICAL_PATH.get(rank + 1).copied()
	}

	/// Whether a transition from this status to `to` is legal.
	///
	/// Staff transitions are unchecked forward moves: any strictly forward
	/// jump along the canonical path is allowed (the kitchen routinely skips
	/// `Confirmed`), as is cancellation from any non-terminal state. Moving
	/// backward or out of a terminal state is never allowed.
	pub fn can_transition_to(&self, to: OrderStatus) -> bool {
		if self.is_terminal() {
			return false;
		}
		if to == OrderStatus::Cancelled {
			return true;
		}
		match (self.rank(), to.rank()) {
			(Some(from_rank), Some(to_rank)) => to_rank > from_rank,
			_ => false,
		}
	}
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OrderStatus::Pending => write!(f, "pending"),
			OrderStatus::Confirmed => write!(f, "confirmed"),
			OrderStatus::Preparing => write!(f, "preparing"),
			OrderStatus::Ready => write!(f, "ready"),
			OrderStatus::Served => write!(f, "served"),
			OrderStatus::Cancelled => write!(f, "cancelled"),
		}
	}
}

/// A placed order.
///
/// The line snapshot and `total_amount` are frozen at checkout time; later
/// cart or catalog changes do not affect a placed order. Only `status` and
/// `updated_at` change afterwards, and `updated_at` never moves backward.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
	/// Unique identifier, e.g. `ORD-MFWZ1X2C-1`. Opaque to consumers.
	pub id: String,
	/// Snapshot of the cart lines at checkout.
	pub lines: Vec<CartLine>,
	/// Current workflow status.
	pub status: OrderStatus,
	/// Table the order was placed from, when known.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub table_number: Option<String>,
	/// Customer name, when given at checkout.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub customer_name: Option<String>,
	/// Total amount, frozen at creation time.
	pub total_amount: Decimal,
	/// Timestamp when the order was placed.
	pub created_at: DateTime<Utc>,
	/// Timestamp of the last applied change.
	pub updated_at: DateTime<Utc>,
	/// Estimated preparation time in minutes, when an estimate was made.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub estimated_minutes: Option<u32>,
}

impl Order {
	/// Whether the order still needs kitchen attention.
	pub fn is_active(&self) -> bool {
		!self.status.is_terminal()
	}

	/// Whole minutes elapsed since the order was placed.
	pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> i64 {
		(now - self.created_at).num_minutes()
	}
}

/// Presentation metadata for one step of the order tracker.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusStep {
	/// The status this step represents.
	pub status: OrderStatus,
	/// Short label for the tracker.
	pub label: &'static str,
	/// One-line description shown under the label.
	pub description: &'static str,
}

/// Tracker steps for the canonical path. Cancellation is not a step; the
/// presentation layer renders it separately.
pub const ORDER_STATUS_STEPS: [StatusStep; 5] = [
	StatusStep {
		status: OrderStatus::Pending,
		label: "Order Placed",
		description: "Waiting for confirmation",
	},
	StatusStep {
		status: OrderStatus::Confirmed,
		label: "Confirmed",
		description: "Order accepted by kitchen",
	},
	StatusStep {
		status: OrderStatus::Preparing,
		label: "Preparing",
		description: "Chef is cooking your order",
	},
	StatusStep {
		status: OrderStatus::Ready,
		label: "Ready",
		description: "Your order is ready",
	},
	StatusStep {
		status: OrderStatus::Served,
		label: "Served",
		description: "Enjoy your meal!",
	},
];

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_forward_jumps_allowed() {
		assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Confirmed));
		// The kitchen UI jumps straight past Confirmed.
		assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Preparing));
		assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Served));
		assert!(OrderStatus::Preparing.can_transition_to(OrderStatus::Ready));
	}

	#[test]
	fn test_backward_moves_rejected() {
		assert!(!OrderStatus::Preparing.can_transition_to(OrderStatus::Pending));
		assert!(!OrderStatus::Ready.can_transition_to(OrderStatus::Preparing));
		assert!(!OrderStatus::Confirmed.can_transition_to(OrderStatus::Confirmed));
	}

	#[test]
	fn test_terminal_states_frozen() {
		for to in [
			OrderStatus::Pending,
			OrderStatus::Preparing,
			OrderStatus::Served,
			OrderStatus::Cancelled,
		] {
			assert!(!OrderStatus::Served.can_transition_to(to));
			assert!(!OrderStatus::Cancelled.can_transition_to(to));
		}
	}

	#[test]
	fn test_cancel_reachable_from_any_non_terminal() {
		for from in [
			OrderStatus::Pending,
			OrderStatus::Confirmed,
			OrderStatus::Preparing,
			OrderStatus::Ready,
		] {
			assert!(from.can_transition_to(OrderStatus::Cancelled));
		}
	}

	#[test]
	fn test_next_step_walks_canonical_path() {
		assert_eq!(OrderStatus::Pending.next_step(), Some(OrderStatus::Confirmed));
		assert_eq!(OrderStatus::Confirmed.next_step(), Some(OrderStatus::Preparing));
		assert_eq!(OrderStatus::Preparing.next_step(), Some(OrderStatus::Ready));
		assert_eq!(OrderStatus::Ready.next_step(), Some(OrderStatus::Served));
		assert_eq!(OrderStatus::Served.next_step(), None);
		assert_eq!(OrderStatus::Cancelled.next_step(), None);
	}

	#[test]
	fn test_status_steps_cover_the_canonical_path() {
		let steps: Vec<OrderStatus> = ORDER_STATUS_STEPS.iter().map(|step| step.status).collect();
		assert_eq!(steps, CANONICAL_PATH.to_vec());
	}

	#[test]
	fn test_status_serializes_lowercase() {
		let json = serde_json::to_string(&OrderStatus::Preparing).unwrap();
		assert_eq!(json, "\"preparing\"");
	}
}
