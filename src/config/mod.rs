//! Configuration management

mod settings;

pub use settings::{
    default_config_path, validate_refresh_interval, ConfigFieldError, WidgetConfig,
    DEFAULT_BUDGET, DEFAULT_REFRESH_INTERVAL, MAX_REFRESH_INTERVAL, MIN_REFRESH_INTERVAL,
};
