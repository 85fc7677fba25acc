//! Core engine for the Ember ordering system.
//!
//! This module provides the main orchestration logic for the demo,
//! coordinating the catalog, cart, order store, progression simulator and
//! statistics aggregator around one event bus. It owns the construction and
//! teardown lifecycle of all services; nothing here is an implicit
//! singleton.

pub mod engine;
pub mod handlers;

pub use engine::{event_bus::EventBus, EngineError, RestaurantEngine};
pub use handlers::OrderHandler;
