//! Shared constants for the widget

/// How many services a cost snapshot keeps after ranking
pub const DEFAULT_TOP_SERVICES: usize = 10;

/// How many ranked services the widget shows at once
pub const DISPLAY_SERVICE_ROWS: usize = 5;

/// Service names longer than this are cut and suffixed with "..."
pub const MAX_SERVICE_NAME_CHARS: usize = 26;

/// Lower bound of the simulated month-to-date spend, in dollars
pub const SIMULATED_MTD_MIN: f64 = 10.0;

/// Upper bound of the simulated month-to-date spend, in dollars
pub const SIMULATED_MTD_MAX: f64 = 500.0;
