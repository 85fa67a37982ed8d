//! cost-widget-types: Shared data types for the cost-widget budget overlay.
//!
//! This crate contains pure data types (cost snapshots, budget severity,
//! colors, widget geometry) that are shared across all cost-widget crates.
//! These types have no I/O or runtime dependencies, making them suitable as
//! a foundation layer.

pub mod budget;
pub mod color;
pub mod cost;
pub mod geometry;

// Re-export commonly used types at the crate root for convenience
pub use budget::{budget_percentage, BudgetSeverity, BudgetStatus};
pub use color::Color;
pub use cost::{CostData, ServiceCost};
pub use geometry::{clamp_position, default_position, ScreenSize, WidgetGeometry};
