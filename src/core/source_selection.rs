//! Picking the cost source at startup

use crate::config::WidgetConfig;
use cost_widget_core::{BoxedCostSource, SourceError};
use cost_widget_sources::{integration_unavailable, SimulatedCostSource};
use log::{info, warn};

/// A problem to show the user once, before the widget starts refreshing
#[derive(Debug, Clone, PartialEq)]
pub struct StartupNotice {
    pub title: String,
    pub message: String,
}

/// Dialog title for a source error
pub(crate) fn error_title(err: &SourceError) -> &'static str {
    match err {
        SourceError::Credentials { .. } => "Cloud Credentials Error",
        SourceError::IntegrationUnavailable { .. } => "Billing Integration Unavailable",
        SourceError::Fetch(_) => "Cost Data Error",
    }
}

impl StartupNotice {
    fn for_fallback(err: &SourceError) -> Self {
        Self {
            title: error_title(err).to_string(),
            message: format!(
                "{}\n\nThe widget will use simulated data instead.\n\
                 To use real cost data, fix the problem above and restart.",
                err
            ),
        }
    }
}

/// Outcome of source selection
pub struct SourceSelection {
    pub source: BoxedCostSource,
    /// Set when live mode was requested but could not be used
    pub notice: Option<StartupNotice>,
}

/// Choose between the live source and simulated data
///
/// In live mode the live source is probed with one fetch. If there is no
/// live integration, or the probe fails for any reason, the user gets a
/// notice and the widget falls back to simulated data.
pub fn select_source(config: &WidgetConfig, live: Option<BoxedCostSource>) -> SourceSelection {
    select_source_with(config, live, || Box::new(SimulatedCostSource::new()))
}

/// `select_source` with an explicit fallback
pub fn select_source_with<F>(
    config: &WidgetConfig,
    live: Option<BoxedCostSource>,
    fallback: F,
) -> SourceSelection
where
    F: FnOnce() -> BoxedCostSource,
{
    if config.use_simulated_data {
        info!("Using simulated cost data");
        return SourceSelection {
            source: fallback(),
            notice: None,
        };
    }

    let probe = match live {
        Some(mut source) if source.is_available() => match source.fetch() {
            Ok(_) => Ok(source),
            Err(e) => Err(e),
        },
        _ => Err(integration_unavailable()),
    };

    match probe {
        Ok(source) => {
            info!("Connected to billing API via {} source", source.metadata().name);
            SourceSelection {
                source,
                notice: None,
            }
        }
        Err(e) => {
            warn!("Live cost data unavailable, falling back to simulated data: {}", e);
            SourceSelection {
                source: fallback(),
                notice: Some(StartupNotice::for_fallback(&e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cost_widget_core::{CostData, CostSource, SourceKind, SourceMetadata};

    struct StubLive {
        metadata: SourceMetadata,
        result: Result<CostData, SourceError>,
    }

    impl StubLive {
        fn boxed(result: Result<CostData, SourceError>) -> BoxedCostSource {
            Box::new(Self {
                metadata: SourceMetadata {
                    id: "live".into(),
                    name: "Live".into(),
                    description: "stub".into(),
                    kind: SourceKind::Live,
                },
                result,
            })
        }
    }

    impl CostSource for StubLive {
        fn metadata(&self) -> &SourceMetadata {
            &self.metadata
        }

        fn fetch(&mut self) -> Result<CostData, SourceError> {
            self.result.clone()
        }
    }

    fn seeded() -> BoxedCostSource {
        Box::new(SimulatedCostSource::seeded(1))
    }

    fn live_config() -> WidgetConfig {
        WidgetConfig::default()
    }

    #[test]
    fn test_simulated_mode_skips_live() {
        let config = WidgetConfig {
            use_simulated_data: true,
            ..WidgetConfig::default()
        };
        let live = StubLive::boxed(Ok(CostData::new(1.0, vec![])));
        let selection = select_source_with(&config, Some(live), seeded);
        assert_eq!(selection.source.metadata().kind, SourceKind::Simulated);
        assert!(selection.notice.is_none());
    }

    #[test]
    fn test_live_probe_success() {
        let live = StubLive::boxed(Ok(CostData::new(12.0, vec![])));
        let selection = select_source_with(&live_config(), Some(live), seeded);
        assert_eq!(selection.source.metadata().kind, SourceKind::Live);
        assert!(selection.notice.is_none());
    }

    #[test]
    fn test_credentials_failure_falls_back_with_notice() {
        let live = StubLive::boxed(Err(SourceError::credentials("no profile")));
        let selection = select_source_with(&live_config(), Some(live), seeded);

        assert_eq!(selection.source.metadata().kind, SourceKind::Simulated);
        let notice = selection.notice.expect("notice");
        assert_eq!(notice.title, "Cloud Credentials Error");
        assert!(notice.message.contains("AWS_ACCESS_KEY_ID"));
        assert!(notice.message.contains("simulated data instead"));
    }

    #[test]
    fn test_missing_integration_falls_back() {
        let selection = select_source_with(&live_config(), None, seeded);
        assert_eq!(selection.source.metadata().kind, SourceKind::Simulated);
        assert_eq!(
            selection.notice.map(|n| n.title),
            Some("Billing Integration Unavailable".to_string())
        );
    }

    #[test]
    fn test_transient_probe_failure_falls_back() {
        let live = StubLive::boxed(Err(SourceError::fetch("connection reset")));
        let selection = select_source_with(&live_config(), Some(live), seeded);
        assert_eq!(selection.source.metadata().kind, SourceKind::Simulated);
        assert_eq!(selection.notice.map(|n| n.title), Some("Cost Data Error".to_string()));
    }
}
