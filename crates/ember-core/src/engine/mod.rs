//! Restaurant engine orchestrating the demo session.
//!
//! The engine owns every service (catalog, cart, store, progression
//! simulator, statistics) and runs the main event loop: reacting to bus
//! events, logging the dashboard at a fixed cadence, and winding down once
//! the floor is clear or the process is interrupted.

pub mod event_bus;
pub mod lifecycle;

use crate::handlers::OrderHandler;
use chrono::Utc;
use ember_cart::{CartService, CheckoutSettings};
use ember_config::Config;
use ember_lifecycle::{ProgressionScheduler, ProgressionSettings};
use ember_menu::MenuCatalog;
use ember_stats::StatsAggregator;
use ember_store::OrderStore;
use ember_types::{
	truncate_id, Order, OrderEvent, OrderStatus, RestaurantEvent, ORDER_STATUS_STEPS,
};
use event_bus::EventBus;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::MissedTickBehavior;

/// Per-subscriber buffer of the event bus.
const EVENT_BUS_CAPACITY: usize = 1000;

/// How often the dashboard numbers are written to the log.
const DASHBOARD_INTERVAL: Duration = Duration::from_secs(30);

/// Errors that can occur during engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
	/// Error related to configuration issues.
	#[error("Configuration error: {0}")]
	Config(String),
	/// Error from one of the underlying services.
	#[error("Service error: {0}")]
	Service(String),
}

/// Main engine that wires the ordering services together.
///
/// Construction is explicit: whoever builds the engine owns it and passes
/// handles down, so teardown is a method call rather than a process exit.
pub struct RestaurantEngine {
	/// Demo configuration.
	config: Config,
	/// Static menu catalog.
	catalog: &'static MenuCatalog,
	/// The live cart for the scripted session.
	cart: Arc<CartService>,
	/// Authoritative order registry.
	store: Arc<OrderStore>,
	/// Automatic status progression.
	scheduler: Arc<ProgressionScheduler>,
	/// Dashboard aggregation.
	stats: Arc<StatsAggregator>,
	/// Event bus for inter-service communication.
	event_bus: EventBus,
	/// Order placement and staff update handler.
	order_handler: Arc<OrderHandler>,
}

impl RestaurantEngine {
	/// Builds an engine and all its services from a validated configuration.
	pub fn new(config: Config) -> Result<Self, EngineError> {
		config
			.validate()
			.map_err(|err| EngineError::Config(err.to_string()))?;

		let event_bus = EventBus::new(EVENT_BUS_CAPACITY);
		let store = Arc::new(OrderStore::new());

		let cart = Arc::new(CartService::new(CheckoutSettings {
			placement_latency: Duration::from_millis(config.timing.placement_latency_ms),
			estimate_min_minutes: config.timing.estimate_min_minutes,
			estimate_max_minutes: config.timing.estimate_max_minutes,
			rng_seed: config.timing.rng_seed,
		}));

		let scheduler = Arc::new(ProgressionScheduler::new(
			store.clone(),
			event_bus.sender(),
			ProgressionSettings {
				step_delay_min: Duration::from_secs(config.timing.step_delay_min_secs),
				step_delay_max: Duration::from_secs(config.timing.step_delay_max_secs),
				// Derived seed keeps the estimate and jitter streams apart.
				rng_seed: config.timing.rng_seed.map(|seed| seed.wrapping_add(1)),
			},
		));

		let stats = Arc::new(StatsAggregator::new(store.clone()));
		let order_handler = Arc::new(OrderHandler::new(
			store.clone(),
			scheduler.clone(),
			event_bus.clone(),
		));

		Ok(Self {
			config,
			catalog: MenuCatalog::standard(),
			cart,
			store,
			scheduler,
			stats,
			event_bus,
			order_handler,
		})
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn catalog(&self) -> &'static MenuCatalog {
		self.catalog
	}

	pub fn cart(&self) -> &CartService {
		&self.cart
	}

	pub fn store(&self) -> &OrderStore {
		&self.store
	}

	pub fn stats(&self) -> &StatsAggregator {
		&self.stats
	}

	pub fn event_bus(&self) -> &EventBus {
		&self.event_bus
	}

	/// Registers a checked-out order and starts its progression.
	pub async fn place_order(&self, order: Order) -> Result<(), EngineError> {
		self.order_handler
			.handle_placed(order)
			.await
			.map_err(|err| EngineError::Service(err.to_string()))
	}

	/// Applies a staff-initiated status transition.
	pub async fn update_order_status(
		&self,
		order_id: &str,
		new_status: OrderStatus,
	) -> Result<Order, EngineError> {
		self.order_handler
			.handle_status_update(order_id, new_status)
			.await
			.map_err(|err| EngineError::Service(err.to_string()))
	}

	/// Cancels an order from any non-terminal state.
	pub async fn cancel_order(&self, order_id: &str) -> Result<Order, EngineError> {
		self.update_order_status(order_id, OrderStatus::Cancelled).await
	}

	/// Main execution loop.
	///
	/// Returns once every order has settled, or on Ctrl-C. Event handling
	/// is log-and-observe: the mutations themselves already happened in the
	/// store by the time their events arrive here.
	pub async fn run(&self) -> Result<(), EngineError> {
		let mut events = self.event_bus.subscribe();
		let mut dashboard = tokio::time::interval(DASHBOARD_INTERVAL);
		dashboard.set_missed_tick_behavior(MissedTickBehavior::Skip);
		// The first tick completes immediately; consume it.
		dashboard.tick().await;

		loop {
			tokio::select! {
				Ok(event) = events.recv() => {
					match event {
						RestaurantEvent::Order(event) => self.handle_order_event(event).await,
					}
					if self.store.active().await.is_empty() {
						tracing::info!("All orders settled");
						break;
					}
				}

				_ = dashboard.tick() => {
					self.log_dashboard().await;
				}

				_ = tokio::signal::ctrl_c() => {
					tracing::info!("Interrupted");
					break;
				}
			}
		}

		self.log_dashboard().await;
		Ok(())
	}

	async fn handle_order_event(&self, event: OrderEvent) {
		match event {
			OrderEvent::Placed { order } => {
				tracing::info!(
					order_id = %truncate_id(&order.id),
					table = order.table_number.as_deref().unwrap_or("-"),
					total = %order.total_amount,
					"New order on the floor"
				);
			}
			OrderEvent::StatusChanged { order_id, from, to } => {
				let step = ORDER_STATUS_STEPS
					.iter()
					.find(|step| step.status == to)
					.map(|step| step.label)
					.unwrap_or("Cancelled");
				let elapsed_minutes = match self.store.get(&order_id).await {
					Some(order) => order.elapsed_minutes(Utc::now()),
					None => 0,
				};
				tracing::info!(
					order_id = %truncate_id(&order_id),
					from = %from,
					to = %to,
					step,
					elapsed_minutes,
					"Order moved"
				);
				if to.is_terminal() {
					// The progression task stops itself on terminal states;
					// this also covers manual cancellations.
					self.scheduler.cancel(&order_id).await;
				}
			}
			OrderEvent::TransitionRejected { order_id, from, to } => {
				tracing::warn!(
					order_id = %truncate_id(&order_id),
					from = %from,
					to = %to,
					"Transition rejected"
				);
			}
		}
	}

	async fn log_dashboard(&self) {
		let stats = self.stats.dashboard().await;
		tracing::info!(
			orders_today = stats.total_orders_today,
			revenue_today = %stats.total_revenue_today,
			active = stats.active_order_count,
			avg_prep_minutes = stats.avg_prep_time_minutes,
			"Dashboard"
		);
	}
}
