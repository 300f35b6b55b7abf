//! Domain types and DTOs
//!
//! These types define the project aggregates and tasks held by the stores,
//! the partial updates applied to them, and the payloads exchanged with the
//! AI services.

pub mod ai;
pub mod projects;
pub mod solar;
pub mod strategies;
pub mod tasks;

// Re-export commonly used types
pub use projects::*;
pub use solar::*;
pub use strategies::StrategyType;
pub use tasks::*;

// AI types are accessed via crate::domain::ai:: to avoid namespace pollution
