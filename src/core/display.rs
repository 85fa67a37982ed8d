//! Display surface trait and the render instruction it consumes

use chrono::{DateTime, Local};
use cost_widget_core::{
    format_clock, format_currency, format_percentage, headline_color, progress_fill,
    truncate_label, BudgetSeverity, CostData, DISPLAY_SERVICE_ROWS, MAX_SERVICE_NAME_CHARS,
};
use cost_widget_types::{BudgetStatus, Color};

/// One row of the "Top Services" list
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRow {
    /// 1-based rank
    pub rank: usize,
    /// Service name, shortened for display
    pub name: String,
    pub cost_text: String,
    pub activity_count: u32,
}

/// Everything a display needs to draw one refresh
///
/// Built from a `CostData` snapshot and the configured budget; the
/// snapshot itself is not kept.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayUpdate {
    pub month_to_date: f64,
    /// Headline figure, e.g. `"$123.45"`
    pub cost_text: String,
    /// Headline color: accent while normal, status color otherwise
    pub cost_color: Color,
    /// e.g. `"of $100 monthly budget"`
    pub budget_text: String,
    pub budget_percentage: f64,
    /// e.g. `"42.5%"`
    pub percentage_text: String,
    pub severity: BudgetSeverity,
    /// Progress bar fill in `0.0..=1.0`
    pub progress_fill: f64,
    pub services: Vec<ServiceRow>,
    pub last_updated: DateTime<Local>,
    /// e.g. `"14:03:59"`
    pub updated_text: String,
}

impl DisplayUpdate {
    pub fn from_cost_data(data: &CostData, budget: f64) -> Self {
        let status = BudgetStatus::new(data.month_to_date, budget);

        let services = data
            .top_services
            .iter()
            .take(DISPLAY_SERVICE_ROWS)
            .enumerate()
            .map(|(i, service)| ServiceRow {
                rank: i + 1,
                name: truncate_label(&service.name, MAX_SERVICE_NAME_CHARS),
                cost_text: format_currency(service.cost),
                activity_count: service.activity_count,
            })
            .collect();

        Self {
            month_to_date: data.month_to_date,
            cost_text: format_currency(data.month_to_date),
            cost_color: headline_color(status.percentage),
            budget_text: format!("of ${:.0} monthly budget", budget),
            budget_percentage: status.percentage,
            percentage_text: format_percentage(status.percentage),
            severity: status.severity,
            progress_fill: progress_fill(status.percentage),
            services,
            last_updated: data.last_updated,
            updated_text: format_clock(&data.last_updated),
        }
    }
}

/// Trait for whatever shows the widget
///
/// The surface owns its window (or terminal) and event loop; the scheduler
/// only hands it finished render instructions.
pub trait DisplaySurface {
    /// Draw a refresh
    fn render(&mut self, update: &DisplayUpdate);

    /// Move the widget to a new origin (already clamped on screen)
    fn reposition(&mut self, x: i32, y: i32);

    /// Tear down the widget
    fn close(&mut self);

    /// Show an error to the user once, e.g. a startup credentials problem
    fn notify_error(&mut self, title: &str, message: &str);
}
