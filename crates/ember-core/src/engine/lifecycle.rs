//! Lifecycle management for the restaurant engine.
//!
//! Handles initialization and shutdown procedures, ensuring demo data is in
//! place before the loop starts and that no progression timer outlives the
//! engine.

use super::{EngineError, RestaurantEngine};

impl RestaurantEngine {
	/// Prepares the floor before running.
	///
	/// Seeds the demo orders when configured and schedules automatic
	/// progression for every order that is still active.
	pub async fn initialize(&self) -> Result<(), EngineError> {
		tracing::info!(
			restaurant = %self.config.restaurant.name,
			"Initializing engine"
		);

		if self.config.store.seed_demo_orders {
			self.store
				.seed_demo_orders()
				.await
				.map_err(|err| EngineError::Service(err.to_string()))?;
			tracing::info!(count = self.store.len().await, "Seeded demo orders");
		}

		for order in self.store.active().await {
			self.scheduler.schedule(&order.id).await;
		}
		Ok(())
	}

	/// Performs cleanup operations.
	pub async fn shutdown(&self) -> Result<(), EngineError> {
		tracing::info!("Shutting down engine");
		self.scheduler.shutdown().await;
		Ok(())
	}
}
