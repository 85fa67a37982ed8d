//! Budget consumption and severity bands.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Percentage of budget at which the warning band starts (inclusive)
pub const WARNING_THRESHOLD: f64 = 75.0;

/// Percentage of budget above which spending is critical (exclusive)
pub const CRITICAL_THRESHOLD: f64 = 90.0;

/// Severity band for budget consumption
///
/// Bands do not overlap: `< 75` is normal, `75..=90` is warning and
/// anything above 90 is critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetSeverity {
    /// Under budget (green)
    Normal,
    /// Approaching the budget (yellow)
    Warning,
    /// At or over the budget (red)
    Critical,
}

impl BudgetSeverity {
    /// Classify a budget percentage
    ///
    /// Total over every `f64`; negative values are normal. NaN compares
    /// false against both thresholds and lands in the critical band.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage < WARNING_THRESHOLD {
            BudgetSeverity::Normal
        } else if percentage <= CRITICAL_THRESHOLD {
            BudgetSeverity::Warning
        } else {
            BudgetSeverity::Critical
        }
    }

    /// Status color for this band
    pub fn color(&self) -> Color {
        match self {
            BudgetSeverity::Normal => Color::STATUS_GREEN,
            BudgetSeverity::Warning => Color::STATUS_YELLOW,
            BudgetSeverity::Critical => Color::STATUS_RED,
        }
    }
}

/// Month-to-date spend as a percentage of the budget
///
/// A non-positive budget yields 0 rather than an infinite or NaN value.
pub fn budget_percentage(month_to_date: f64, budget: f64) -> f64 {
    if budget <= 0.0 {
        return 0.0;
    }
    month_to_date / budget * 100.0
}

/// Derived budget state for one snapshot (never stored)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetStatus {
    pub percentage: f64,
    pub severity: BudgetSeverity,
}

impl BudgetStatus {
    pub fn new(month_to_date: f64, budget: f64) -> Self {
        let percentage = budget_percentage(month_to_date, budget);
        Self {
            percentage,
            severity: BudgetSeverity::from_percentage(percentage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(BudgetSeverity::from_percentage(74.999), BudgetSeverity::Normal);
        assert_eq!(BudgetSeverity::from_percentage(75.0), BudgetSeverity::Warning);
        assert_eq!(BudgetSeverity::from_percentage(90.0), BudgetSeverity::Warning);
        assert_eq!(BudgetSeverity::from_percentage(90.001), BudgetSeverity::Critical);
    }

    #[test]
    fn test_out_of_range_percentages() {
        assert_eq!(BudgetSeverity::from_percentage(-20.0), BudgetSeverity::Normal);
        assert_eq!(BudgetSeverity::from_percentage(250.0), BudgetSeverity::Critical);
    }

    #[test]
    fn test_budget_status() {
        let status = BudgetStatus::new(80.0, 100.0);
        assert!((status.percentage - 80.0).abs() < 1e-9);
        assert_eq!(status.severity, BudgetSeverity::Warning);
        assert_eq!(status.severity.color(), Color::STATUS_YELLOW);
    }

    #[test]
    fn test_zero_budget_is_not_nan() {
        assert_eq!(budget_percentage(50.0, 0.0), 0.0);
    }
}
