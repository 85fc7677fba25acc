//! Main entry point for the Ember ordering demo.
//!
//! This binary runs a complete single-process restaurant session: it seeds
//! the floor with demo orders, plays a scripted customer through the menu,
//! cart and checkout, and lets the kitchen simulation progress every order
//! until the floor is clear.

use clap::Parser;
use ember_config::Config;
use ember_core::RestaurantEngine;
use ember_types::{MenuCategory, OrderStatus};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Command-line arguments for the demo service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "ember.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the demo service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file (defaults when the file is absent)
/// 4. Builds the engine and seeds the floor
/// 5. Runs the session until the floor clears or Ctrl-C
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(args.log_level.clone()));
	fmt().with_env_filter(env_filter).with_target(true).init();

	tracing::info!("Started ember");

	// Load configuration; a missing file means an out-of-the-box demo run.
	let config = if args.config.exists() {
		Config::from_file(&args.config).await?
	} else {
		tracing::warn!(
			path = %args.config.display(),
			"Configuration file not found, using defaults"
		);
		Config::default()
	};
	tracing::info!("Loaded configuration [{}]", config.restaurant.id);

	let engine = Arc::new(RestaurantEngine::new(config)?);
	engine.initialize().await?;

	// The scripted customer runs alongside the engine loop.
	let session = tokio::spawn(run_demo_session(engine.clone()));

	engine.run().await?;

	session.abort();
	engine.shutdown().await?;

	tracing::info!("Stopped ember");
	Ok(())
}

/// Plays one scripted dine-in session against the engine.
///
/// Browses the menu, fills the cart (including one add the kitchen turns
/// away), checks out, and later has the kitchen accept the order straight
/// into preparing, racing the automatic progression.
async fn run_demo_session(engine: Arc<RestaurantEngine>) {
	// Give the engine loop a moment to subscribe to the bus.
	tokio::time::sleep(Duration::from_millis(100)).await;

	let catalog = engine.catalog();
	for category in MenuCategory::ALL {
		tracing::info!(
			category = %category,
			items = catalog.by_category(Some(category)).len(),
			"Browsing menu"
		);
	}

	let cart = engine.cart();
	for (item_id, quantity, note) in [
		("main-1", 2, None),
		("starter-1", 1, Some("extra truffle")),
		("drink-2", 2, None),
	] {
		let Some(item) = catalog.get(item_id) else {
			continue;
		};
		if let Err(err) = cart
			.add_item(item.clone(), quantity, note.map(str::to_string))
			.await
		{
			tracing::warn!(item_id, error = %err, "Could not add item");
		}
	}

	// One item on the menu is out tonight; the cart rejects it even though
	// the menu view would already have disabled the button.
	if let Some(unavailable) = catalog.items().iter().find(|item| !item.is_available) {
		if let Err(err) = cart.add_item(unavailable.clone(), 1, None).await {
			tracing::info!(item_id = %unavailable.id, error = %err, "Item is off tonight");
		}
	}

	let total_items = cart.total_items().await;
	let total_amount = cart.total_amount().await;
	tracing::info!(
		items = total_items,
		total = %total_amount,
		"Heading to checkout"
	);

	let order = match cart
		.checkout(Some("9".to_string()), Some("Avery".to_string()))
		.await
	{
		Ok(order) => order,
		Err(err) => {
			tracing::error!(error = %err, "Checkout failed");
			return;
		}
	};
	let order_id = order.id.clone();
	if let Err(err) = engine.place_order(order).await {
		tracing::error!(error = %err, "Could not place order");
		return;
	}

	// A few seconds in, the kitchen accepts the new order straight into
	// preparing, skipping the confirmation step.
	tokio::time::sleep(Duration::from_secs(3)).await;
	match engine
		.update_order_status(&order_id, OrderStatus::Preparing)
		.await
	{
		Ok(order) => tracing::info!(
			order_id = %order.id,
			status = %order.status,
			"Kitchen accepted the order"
		),
		Err(err) => tracing::debug!(error = %err, "The simulation got there first"),
	}
}
