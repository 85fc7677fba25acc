//! Automatic order progression for the Ember ordering system.
//!
//! Simulates the kitchen working through an order: while an order is
//! non-terminal, a per-order background task advances it exactly one step
//! along the canonical path after a randomized delay. Each task is an owned
//! handle keyed by order id, cancellable individually or all at once, and a
//! timer whose target went stale (staff got there first) discards the step
//! instead of ever moving an order backward.

use ember_store::{OrderStore, StoreError};
use ember_types::{truncate_id, OrderEvent, RestaurantEvent};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;

/// Timing knobs for the progression simulator.
#[derive(Debug, Clone)]
pub struct ProgressionSettings {
	/// Minimum delay before the next automatic step.
	pub step_delay_min: Duration,
	/// Maximum delay before the next automatic step.
	pub step_delay_max: Duration,
	/// Seed for the step jitter; entropy when unset.
	pub rng_seed: Option<u64>,
}

impl Default for ProgressionSettings {
	fn default() -> Self {
		Self {
			step_delay_min: Duration::from_secs(8),
			step_delay_max: Duration::from_secs(15),
			rng_seed: None,
		}
	}
}

/// Drives non-terminal orders forward on randomized timers.
///
/// One task per order; the registry of handles is the teardown surface.
/// Dropping the scheduler without [`ProgressionScheduler::shutdown`] would
/// leave detached timers running against the store.
pub struct ProgressionScheduler {
	store: Arc<OrderStore>,
	events: broadcast::Sender<RestaurantEvent>,
	settings: ProgressionSettings,
	rng: Arc<Mutex<StdRng>>,
	tasks: Arc<Mutex<HashMap<String, JoinHandle<()>>>>,
}

impl ProgressionScheduler {
	/// Creates a scheduler over the given store, publishing status changes
	/// to `events`.
	pub fn new(
		store: Arc<OrderStore>,
		events: broadcast::Sender<RestaurantEvent>,
		settings: ProgressionSettings,
	) -> Self {
		let rng = match settings.rng_seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_entropy(),
		};
		Self {
			store,
			events,
			settings,
			rng: Arc::new(Mutex::new(rng)),
			tasks: Arc::new(Mutex::new(HashMap::new())),
		}
	}

	/// Starts automatic progression for an order.
	///
	/// No-op when the order is unknown, already settled, or already
	/// scheduled.
	pub async fn schedule(&self, order_id: &str) {
		let Some(order) = self.store.get(order_id).await else {
			tracing::warn!(
				order_id = %truncate_id(order_id),
				"Cannot schedule progression for unknown order"
			);
			return;
		};
		if order.status.is_terminal() {
			tracing::debug!(
				order_id = %truncate_id(order_id),
				status = %order.status,
				"Order already settled, nothing to schedule"
			);
			return;
		}

		let mut tasks = self.tasks.lock().await;
		if tasks.contains_key(order_id) {
			tracing::debug!(order_id = %truncate_id(order_id), "Progression already scheduled");
			return;
		}

		let handle = tokio::spawn(run_progression(
			self.store.clone(),
			self.events.clone(),
			self.settings.clone(),
			self.rng.clone(),
			self.tasks.clone(),
			order_id.to_string(),
		));
		tasks.insert(order_id.to_string(), handle);
	}

	/// Stops the progression task for one order, if any.
	pub async fn cancel(&self, order_id: &str) {
		if let Some(handle) = self.tasks.lock().await.remove(order_id) {
			handle.abort();
			tracing::debug!(order_id = %truncate_id(order_id), "Progression cancelled");
		}
	}

	/// Aborts every progression task. Called on engine teardown.
	pub async fn shutdown(&self) {
		let mut tasks = self.tasks.lock().await;
		let count = tasks.len();
		for (_, handle) in tasks.drain() {
			handle.abort();
		}
		if count > 0 {
			tracing::info!(count, "Stopped progression tasks");
		}
	}

	/// Number of orders currently being progressed.
	pub async fn scheduled_count(&self) -> usize {
		self.tasks.lock().await.len()
	}
}

/// The per-order progression loop.
///
/// The target step is chosen when the timer is armed, mirroring how the
/// tracking view schedules its callback; whether it still applies is
/// re-checked against the live status when the timer fires.
async fn run_progression(
	store: Arc<OrderStore>,
	events: broadcast::Sender<RestaurantEvent>,
	settings: ProgressionSettings,
	rng: Arc<Mutex<StdRng>>,
	tasks: Arc<Mutex<HashMap<String, JoinHandle<()>>>>,
	order_id: String,
) {
	loop {
		let Some(order) = store.get(&order_id).await else {
			break;
		};
		let Some(target) = order.status.next_step() else {
			break;
		};

		let delay = {
			let mut rng = rng.lock().await;
			let min = settings.step_delay_min.as_millis() as u64;
			let max = settings.step_delay_max.as_millis().max(settings.step_delay_min.as_millis()) as u64;
			Duration::from_millis(rng.gen_range(min..=max))
		};
		tokio::time::sleep(delay).await;

		let Some(current) = store.get(&order_id).await.map(|order| order.status) else {
			break;
		};
		if current.is_terminal() {
			break;
		}
		if !current.can_transition_to(target) {
			// Staff advanced the order while the timer was pending; this
			// target is stale. Drop it and re-arm from the live status.
			tracing::debug!(
				order_id = %truncate_id(&order_id),
				current = %current,
				target = %target,
				"Discarding stale automatic transition"
			);
			continue;
		}

		match store.update_status(&order_id, target).await {
			Ok(_) => {
				events
					.send(RestaurantEvent::Order(OrderEvent::StatusChanged {
						order_id: order_id.clone(),
						from: current,
						to: target,
					}))
					.ok();
				if target.is_terminal() {
					break;
				}
			}
			Err(StoreError::InvalidTransition { .. }) => {
				// Lost a race with a staff action between the check and the
				// write; same staleness policy applies.
				continue;
			}
			Err(err) => {
				tracing::warn!(
					order_id = %truncate_id(&order_id),
					error = %err,
					"Stopping progression"
				);
				break;
			}
		}
	}

	tasks.lock().await.remove(&order_id);
}
