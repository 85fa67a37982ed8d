//! Widget configuration: budget, refresh interval and data-source mode

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Monthly budget used when none is configured
pub const DEFAULT_BUDGET: f64 = 100.0;

/// Seconds between refreshes when none is configured
pub const DEFAULT_REFRESH_INTERVAL: u32 = 30;

/// Shortest allowed refresh interval in seconds
pub const MIN_REFRESH_INTERVAL: u32 = 10;

/// Longest allowed refresh interval in seconds
pub const MAX_REFRESH_INTERVAL: u32 = 300;

/// Clamp a refresh interval to `[MIN_REFRESH_INTERVAL, MAX_REFRESH_INTERVAL]`
pub fn validate_refresh_interval(interval: i64) -> u32 {
    interval.clamp(MIN_REFRESH_INTERVAL as i64, MAX_REFRESH_INTERVAL as i64) as u32
}

/// Why a single config field was ignored
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigFieldError {
    #[error("expected {expected}, found {found}")]
    WrongType { expected: &'static str, found: String },

    #[error("budget must be a positive number, found {0}")]
    NotPositive(f64),
}

fn wrong_type(expected: &'static str, found: &Value) -> ConfigFieldError {
    ConfigFieldError::WrongType {
        expected,
        found: found.to_string(),
    }
}

fn parse_budget(value: &Value) -> Result<f64, ConfigFieldError> {
    let budget = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| wrong_type("a number", value))?;

    if budget.is_finite() && budget > 0.0 {
        Ok(budget)
    } else {
        Err(ConfigFieldError::NotPositive(budget))
    }
}

fn parse_refresh_interval(value: &Value) -> Result<u32, ConfigFieldError> {
    let interval = match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i)
            } else if n.as_u64().is_some() {
                // Larger than i64::MAX
                Some(i64::MAX)
            } else {
                // Fractional seconds truncate toward zero; the cast saturates
                n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)
            }
        }
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| wrong_type("an integer", value))?;

    Ok(validate_refresh_interval(interval))
}

fn parse_flag(value: &Value) -> Result<bool, ConfigFieldError> {
    value.as_bool().ok_or_else(|| wrong_type("true or false", value))
}

/// Widget configuration, loaded once at startup
///
/// `refresh_interval` is always within the allowed range once a config has
/// gone through `load_from_path` or `from_json_value`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetConfig {
    /// Monthly budget in dollars
    pub budget: f64,
    /// Seconds between refreshes
    pub refresh_interval: u32,
    /// Use generated data instead of the billing API
    pub use_simulated_data: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            budget: DEFAULT_BUDGET,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            use_simulated_data: false,
        }
    }
}

impl WidgetConfig {
    /// Refresh interval as a `Duration`
    pub fn refresh_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.refresh_interval))
    }

    /// Load configuration from a JSON file
    ///
    /// Never fails: a missing, unreadable or malformed file yields the
    /// defaults, and each field that is present but invalid falls back to
    /// its own default while the valid fields still apply.
    pub fn load_from_path(path: &Path) -> Self {
        match Self::read_json(path) {
            Ok(Some(value)) => {
                info!("Loaded config from {:?}", path);
                Self::from_json_value(&value)
            }
            Ok(None) => Self::default(),
            Err(e) => {
                warn!("Failed to read config {:?}, using defaults: {:#}", path, e);
                Self::default()
            }
        }
    }

    fn read_json(path: &Path) -> Result<Option<Value>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        let value = serde_json::from_str(&content)?;
        Ok(Some(value))
    }

    /// Build a config from parsed JSON, validating each field on its own
    ///
    /// Unknown keys are ignored. A top-level value that is not an object
    /// yields the defaults.
    pub fn from_json_value(value: &Value) -> Self {
        let mut config = Self::default();

        let Some(fields) = value.as_object() else {
            warn!("Config is not a JSON object, using defaults");
            return config;
        };

        if let Some(raw) = fields.get("budget") {
            match parse_budget(raw) {
                Ok(budget) => config.budget = budget,
                Err(e) => warn!("Ignoring config field 'budget': {}", e),
            }
        }

        if let Some(raw) = fields.get("refresh_interval") {
            match parse_refresh_interval(raw) {
                Ok(interval) => config.refresh_interval = interval,
                Err(e) => warn!("Ignoring config field 'refresh_interval': {}", e),
            }
        }

        if let Some(raw) = fields.get("use_simulated_data") {
            match parse_flag(raw) {
                Ok(flag) => config.use_simulated_data = flag,
                Err(e) => warn!("Ignoring config field 'use_simulated_data': {}", e),
            }
        }

        config
    }

    /// Save configuration to a JSON file, replacing any existing content
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config {:?}", path))?;
        info!("Saved config to {:?}", path);
        Ok(())
    }
}

/// Get the default configuration file path
///
/// Falls back to `config.json` in the working directory when the platform
/// config directory cannot be determined.
pub fn default_config_path() -> PathBuf {
    directories::ProjectDirs::from("com", "github.cost_widget", "cost-widget")
        .map(|dirs| dirs.config_dir().join("config.json"))
        .unwrap_or_else(|| PathBuf::from("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use serde_json::json;
    use tempfile::TempDir;

    fn load_str(dir: &TempDir, content: &str) -> WidgetConfig {
        let path = dir.path().join("config.json");
        std::fs::write(&path, content).unwrap();
        WidgetConfig::load_from_path(&path)
    }

    #[test]
    fn test_valid_interval_unchanged() {
        for interval in [10, 30, 150, 300] {
            assert_eq!(validate_refresh_interval(interval), interval as u32);
        }
    }

    #[test]
    fn test_interval_clamped() {
        assert_eq!(validate_refresh_interval(5), 10);
        assert_eq!(validate_refresh_interval(0), 10);
        assert_eq!(validate_refresh_interval(-100), 10);
        assert_eq!(validate_refresh_interval(500), 300);
        assert_eq!(validate_refresh_interval(i64::MIN), 10);
        assert_eq!(validate_refresh_interval(i64::MAX), 300);
    }

    #[test]
    fn test_interval_always_within_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let result = validate_refresh_interval(rng.gen());
            assert!((MIN_REFRESH_INTERVAL..=MAX_REFRESH_INTERVAL).contains(&result));
        }
    }

    #[test]
    fn test_defaults() {
        let config = WidgetConfig::default();
        assert_eq!(config.budget, 100.0);
        assert_eq!(config.refresh_interval, 30);
        assert!(!config.use_simulated_data);
        assert_eq!(config.refresh_duration(), Duration::from_secs(30));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = WidgetConfig::load_from_path(&dir.path().join("absent.json"));
        assert_eq!(config, WidgetConfig::default());
    }

    #[test]
    fn test_malformed_json_gives_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load_str(&dir, "{not json"), WidgetConfig::default());
        assert_eq!(load_str(&dir, ""), WidgetConfig::default());
        assert_eq!(load_str(&dir, "[1, 2, 3]"), WidgetConfig::default());
    }

    #[test]
    fn test_unreadable_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        // Exists, but reading it as a file fails
        assert_eq!(WidgetConfig::load_from_path(dir.path()), WidgetConfig::default());

        let path = dir.path().join("config.json");
        std::fs::write(&path, [0x7b, 0xff, 0xfe, 0x7d]).unwrap();
        assert_eq!(WidgetConfig::load_from_path(&path), WidgetConfig::default());
    }

    #[test]
    fn test_only_short_interval() {
        let dir = TempDir::new().unwrap();
        let config = load_str(&dir, r#"{"refresh_interval": 5}"#);
        assert_eq!(config.refresh_interval, 10);
        assert_eq!(config.budget, 100.0);
        assert!(!config.use_simulated_data);
    }

    #[test]
    fn test_partial_recovery() {
        let config = WidgetConfig::from_json_value(&json!({
            "budget": "lots",
            "refresh_interval": 60,
            "use_simulated_data": true,
            "theme": "purple"
        }));
        assert_eq!(config.budget, DEFAULT_BUDGET);
        assert_eq!(config.refresh_interval, 60);
        assert!(config.use_simulated_data);

        let config = WidgetConfig::from_json_value(&json!({
            "budget": 250.5,
            "refresh_interval": "often",
            "use_simulated_data": "yes"
        }));
        assert_eq!(config.budget, 250.5);
        assert_eq!(config.refresh_interval, DEFAULT_REFRESH_INTERVAL);
        assert!(!config.use_simulated_data);
    }

    #[test]
    fn test_budget_validation() {
        let budget = |v: Value| WidgetConfig::from_json_value(&json!({ "budget": v })).budget;
        assert_eq!(budget(json!(0)), DEFAULT_BUDGET);
        assert_eq!(budget(json!(-50.0)), DEFAULT_BUDGET);
        assert_eq!(budget(json!(null)), DEFAULT_BUDGET);
        assert_eq!(budget(json!("75.5")), 75.5);
        assert_eq!(budget(json!(1000)), 1000.0);
    }

    #[test]
    fn test_interval_parsing() {
        let interval = |v: Value| {
            WidgetConfig::from_json_value(&json!({ "refresh_interval": v })).refresh_interval
        };
        assert_eq!(interval(json!(45.9)), 45);
        assert_eq!(interval(json!("120")), 120);
        assert_eq!(interval(json!(100000)), 300);
        assert_eq!(interval(json!(u64::MAX)), 300);
        assert_eq!(interval(json!(-1e300)), 10);
        assert_eq!(interval(json!(true)), DEFAULT_REFRESH_INTERVAL);
    }

    #[test]
    fn test_simulated_flag_requires_boolean() {
        let flag = |v: Value| {
            WidgetConfig::from_json_value(&json!({ "use_simulated_data": v })).use_simulated_data
        };
        assert!(flag(json!(true)));
        assert!(!flag(json!(false)));
        // Truthy non-booleans are rejected, not coerced
        assert!(!flag(json!(1)));
        assert!(!flag(json!("true")));
        assert!(!flag(json!([1])));
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..50 {
            let config = WidgetConfig {
                budget: rng.gen_range(0.01..100_000.0),
                refresh_interval: rng
                    .gen_range(MIN_REFRESH_INTERVAL..=MAX_REFRESH_INTERVAL),
                use_simulated_data: rng.gen(),
            };
            config.save_to_path(&path).unwrap();
            let loaded = WidgetConfig::load_from_path(&path);

            assert!((loaded.budget - config.budget).abs() < 0.01);
            assert_eq!(loaded.refresh_interval, config.refresh_interval);
            assert_eq!(loaded.use_simulated_data, config.use_simulated_data);
        }
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"budget": 1, "extra": [1,2,3,4,5,6,7,8,9]}"#).unwrap();

        WidgetConfig::default().save_to_path(&path).unwrap();
        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            written,
            json!({"budget": 100.0, "refresh_interval": 30, "use_simulated_data": false})
        );
    }

    #[test]
    fn test_save_propagates_io_errors() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be written as a file
        assert!(WidgetConfig::default().save_to_path(dir.path()).is_err());
    }
}
