use anyhow::{Context, Result};
use clap::Parser;
use cost_widget::config::{default_config_path, WidgetConfig};
use cost_widget::core::{select_source, DisplaySurface, TokioTimerHost, UpdateScheduler};
use cost_widget::ui::TerminalDisplay;
use cost_widget_types::{default_position, ScreenSize, WidgetGeometry};
use log::{info, warn};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// cost-widget - Month-to-date cloud spend against a monthly budget
#[derive(Parser, Debug, Clone)]
#[command(name = "cost-widget")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file to load (defaults to the per-user config directory)
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Use simulated data for this run, whatever the config says
    #[arg(short = 's', long = "simulated")]
    simulated: bool,

    /// Refresh once and exit
    #[arg(long = "once")]
    once: bool,

    /// Write the effective config to the config path and exit
    #[arg(long = "init-config")]
    init_config: bool,

    /// Screen size used to place the widget (e.g., --screen=2560x1440)
    #[arg(
        long = "screen",
        value_name = "WxH",
        default_value = "1920x1080",
        value_parser = parse_screen
    )]
    screen: ScreenSize,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

/// Parse "WxH" into a screen size
fn parse_screen(s: &str) -> Result<ScreenSize, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("Expected format: WxH (e.g., 1920x1080), got: {}", s))?;
    let width = w.trim().parse::<i32>().map_err(|e| format!("Invalid width: {}", e))?;
    let height = h.trim().parse::<i32>().map_err(|e| format!("Invalid height: {}", e))?;
    if width <= 0 || height <= 0 {
        return Err(format!("Screen size must be positive, got: {}", s));
    }
    Ok(ScreenSize::new(width, height))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Level 0 (default): warn only
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // RUST_LOG overrides the CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    warn!("Starting cost-widget v{}", env!("CARGO_PKG_VERSION"));

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = WidgetConfig::load_from_path(&config_path);
    if cli.simulated {
        config.use_simulated_data = true;
    }
    info!(
        "Budget ${:.2}, refresh every {}s, simulated: {}",
        config.budget, config.refresh_interval, config.use_simulated_data
    );

    if cli.init_config {
        config.save_to_path(&config_path)?;
        warn!("Wrote config to {:?}", config_path);
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, run(cli, config))
}

async fn run(cli: Cli, config: WidgetConfig) -> Result<()> {
    let display = Rc::new(RefCell::new(TerminalDisplay::stdout()));
    let (x, y) = default_position(cli.screen, WidgetGeometry::default());
    display.borrow_mut().reposition(x, y);

    // No live billing integration is compiled in
    let selection = select_source(&config, None);
    if let Some(notice) = &selection.notice {
        display.borrow_mut().notify_error(&notice.title, &notice.message);
    }

    let scheduler = UpdateScheduler::new(
        selection.source,
        display.clone(),
        Rc::new(TokioTimerHost::new()),
        config.refresh_duration(),
        config.budget,
    );
    scheduler.start();

    if cli.once {
        scheduler.stop();
    } else {
        tokio::signal::ctrl_c()
            .await
            .context("Failed to listen for Ctrl-C")?;
        info!("Interrupted, shutting down");
        scheduler.stop();
    }

    let stats = scheduler.stats();
    info!("Ran {} refresh cycles, {} failed", stats.cycles, stats.failures);
    display.borrow_mut().close();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_screen() {
        assert_eq!(parse_screen("2560x1440"), Ok(ScreenSize::new(2560, 1440)));
        assert_eq!(parse_screen("800X600"), Ok(ScreenSize::new(800, 600)));
        assert!(parse_screen("1920").is_err());
        assert!(parse_screen("0x1080").is_err());
        assert!(parse_screen("wide x tall").is_err());
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["cost-widget", "--simulated", "--once", "-d", "2"]);
        assert!(cli.simulated && cli.once && !cli.init_config);
        assert_eq!(cli.debug, 2);
        assert_eq!(cli.screen, ScreenSize::new(1920, 1080));
        assert!(cli.config.is_none());
    }
}
