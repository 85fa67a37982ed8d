//! Cost snapshot types produced by every poll.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Spend attributed to a single cloud service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCost {
    /// Service name as reported by the billing source (never empty)
    pub name: String,
    /// Month-to-date cost in dollars
    pub cost: f64,
    /// Recent activity (audit events in the lookback window)
    #[serde(default)]
    pub activity_count: u32,
}

impl ServiceCost {
    pub fn new(name: impl Into<String>, cost: f64, activity_count: u32) -> Self {
        Self {
            name: name.into(),
            cost,
            activity_count,
        }
    }

    /// Create an entry without activity data
    pub fn without_activity(name: impl Into<String>, cost: f64) -> Self {
        Self::new(name, cost, 0)
    }
}

/// A single month-to-date spend snapshot
///
/// Produced fresh on every poll and consumed once by the render step.
/// `top_services` is ordered by cost, highest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostData {
    /// Accumulated cost from the 1st of the month through now
    pub month_to_date: f64,
    /// Highest-cost services, sorted descending
    pub top_services: Vec<ServiceCost>,
    /// When this snapshot was taken
    pub last_updated: DateTime<Local>,
}

impl CostData {
    pub fn new(month_to_date: f64, top_services: Vec<ServiceCost>) -> Self {
        Self {
            month_to_date,
            top_services,
            last_updated: Local::now(),
        }
    }
}
