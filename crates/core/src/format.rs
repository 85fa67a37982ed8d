//! Display formatting for costs, percentages and budget colors
//!
//! Everything here is pure: numbers in, strings or colors out.

use chrono::{DateTime, TimeZone};
use cost_widget_types::{BudgetSeverity, Color};

/// Format an amount as dollars with exactly two decimals
///
/// `100.0` → `"$100.00"`, `1.005` → `"$1.00"` (rounding follows the
/// exact binary value, same as `{:.2}`). No thousands separators and no
/// localization.
pub fn format_currency(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Budget percentage with one decimal, e.g. `"42.5%"`
pub fn format_percentage(percentage: f64) -> String {
    format!("{:.1}%", percentage)
}

/// Severity band for a budget percentage
///
/// `< 75` → green, `75..=90` → yellow, `> 90` → red.
pub fn budget_color(percentage: f64) -> BudgetSeverity {
    BudgetSeverity::from_percentage(percentage)
}

/// Color of the headline month-to-date figure
///
/// Stays on the accent color while spend is normal and switches to the
/// status color once the warning band is reached.
pub fn headline_color(percentage: f64) -> Color {
    match budget_color(percentage) {
        BudgetSeverity::Normal => Color::ACCENT,
        severity => severity.color(),
    }
}

/// Fraction of the progress bar to fill, in `0.0..=1.0`
pub fn progress_fill(percentage: f64) -> f64 {
    (percentage.min(100.0) / 100.0).max(0.0)
}

/// Shorten a label to `max_chars` characters, appending "..." when cut
pub fn truncate_label(name: &str, max_chars: usize) -> String {
    match name.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &name[..byte_idx]),
        None => name.to_string(),
    }
}

/// Wall-clock time of a snapshot as `HH:MM:SS`
pub fn format_clock<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.format("%H:%M:%S").to_string()
}
