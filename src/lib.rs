//! cost-widget: A small always-on-top overlay showing month-to-date cloud spend
//!
//! This library provides the core functionality for cost-widget, including:
//! - Configuration loading with per-field recovery
//! - The refresh scheduler and its timer hosts
//! - Source selection with fallback to simulated data
//! - The display contract and a terminal display

pub mod config;
pub mod core;
pub mod ui;

// Re-export commonly used types
pub use config::WidgetConfig;
pub use core::{DisplaySurface, DisplayUpdate, UpdateScheduler};
pub use cost_widget_core::{CostData, CostSource, ServiceCost, SourceError};
