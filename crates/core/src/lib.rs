//! cost-widget-core: Core traits, formatting and ranking for the cost widget.
//!
//! This crate contains the fundamental `CostSource` trait, the error type
//! every source reports through, the display formatters and the top-N
//! ranker, plus shared constants.

pub mod constants;
mod cost_source;
mod error;
pub mod format;
pub mod ranking;

pub use constants::{
    DEFAULT_TOP_SERVICES, DISPLAY_SERVICE_ROWS, MAX_SERVICE_NAME_CHARS, SIMULATED_MTD_MAX,
    SIMULATED_MTD_MIN,
};
pub use cost_source::{BoxedCostSource, CostSource, SourceKind, SourceMetadata};
pub use error::SourceError;
pub use format::{
    budget_color, format_clock, format_currency, format_percentage, headline_color,
    progress_fill, truncate_label,
};
pub use ranking::{rank_by_cost, top_services};

// Re-export types used in trait signatures for convenience
pub use cost_widget_types::{BudgetSeverity, CostData, ServiceCost};
