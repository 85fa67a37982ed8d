//! cost-widget-sources: Cost source implementations for the cost widget.

mod catalog;
mod live;
mod simulated;

pub use catalog::{event_source_for, SERVICE_CATALOG};
pub use live::{
    integration_unavailable, ActivityProvider, BillingPeriod, LiveCostSource, ProviderError,
    SpendProvider, ACTIVITY_LOOKBACK, ACTIVITY_MAX_RESULTS,
};
pub use simulated::{
    SimulatedCostSource, MAX_SHARE_FRACTION, MAX_SIMULATED_ACTIVITY, MAX_SIMULATED_SERVICES,
    MIN_SIMULATED_SERVICES,
};
