//! Common types module for the Ember ordering system.
//!
//! This module defines the core data types and structures used throughout
//! the ordering system. It provides a centralized location for shared types
//! to ensure consistency across all components.

/// Cart line types for in-progress selections.
pub mod cart;
/// Event types for inter-service communication.
pub mod events;
/// Menu catalog types: items and categories.
pub mod menu;
/// Order types including the status state machine.
pub mod order;
/// Derived dashboard statistics types.
pub mod stats;
/// Utility functions for id generation and formatting.
pub mod utils;

// Re-export all types for convenient access
pub use cart::*;
pub use events::*;
pub use menu::*;
pub use order::*;
pub use stats::*;
pub use utils::{truncate_id, OrderIdGenerator};
