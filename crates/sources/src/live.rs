//! Live cost source backed by a billing API
//!
//! The source composes two collaborators: a `SpendProvider` that reports
//! month-to-date spend grouped by service, and an optional
//! `ActivityProvider` that counts recent audit events per service. Both are
//! traits so a real API client, or a fake in tests, can be plugged in.

use chrono::{Datelike, Local, NaiveDate};
use cost_widget_core::{
    top_services, CostData, CostSource, ServiceCost, SourceError, SourceKind, SourceMetadata,
    DEFAULT_TOP_SERVICES,
};
use log::{debug, warn};
use std::time::Duration;
use thiserror::Error;

use crate::catalog::event_source_for;

/// How far back activity lookups reach
pub const ACTIVITY_LOOKBACK: Duration = Duration::from_secs(24 * 60 * 60);

/// Cap on events counted per service lookup (keeps us under API rate limits)
pub const ACTIVITY_MAX_RESULTS: u32 = 50;

/// Errors reported by billing and audit-log collaborators
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// Credentials missing, expired or rejected
    #[error("credentials rejected: {0}")]
    Credentials(String),

    /// The client library or integration is not present
    #[error("{0} is not available")]
    Unavailable(String),

    /// Anything else: network, throttling, malformed response
    #[error("request failed: {0}")]
    Request(String),
}

impl From<ProviderError> for SourceError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Credentials(detail) => SourceError::Credentials { detail },
            ProviderError::Unavailable(integration) => SourceError::IntegrationUnavailable {
                integration,
                hint: "Enable the billing integration and restart.".to_string(),
            },
            ProviderError::Request(message) => SourceError::Fetch(message),
        }
    }
}

/// Date range of the current billing month
///
/// `end` is exclusive and always after `start`, so the range is valid on
/// the first day of the month too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BillingPeriod {
    /// Month-to-date period ending tomorrow (exclusive)
    pub fn month_to_date(today: NaiveDate) -> Self {
        let start = today.with_day(1).unwrap_or(today);
        let end = today.succ_opt().unwrap_or(today);
        Self { start, end }
    }
}

/// Reports spend for a billing period grouped by service
pub trait SpendProvider {
    /// `(service name, cost)` pairs; may include zero or negative credits
    fn spend_by_service(
        &self,
        period: &BillingPeriod,
    ) -> Result<Vec<(String, f64)>, ProviderError>;
}

/// Counts recent audit-log events for a service
pub trait ActivityProvider {
    fn event_count(
        &self,
        event_source: &str,
        lookback: Duration,
        max_results: u32,
    ) -> Result<u32, ProviderError>;
}

/// Error used when live mode is requested but no billing integration exists
pub fn integration_unavailable() -> SourceError {
    SourceError::IntegrationUnavailable {
        integration: "A billing API integration".to_string(),
        hint: "This build has no live provider; set \"use_simulated_data\": true or \
               build with a SpendProvider."
            .to_string(),
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Live cost source
pub struct LiveCostSource {
    metadata: SourceMetadata,
    spend: Box<dyn SpendProvider>,
    activity: Option<Box<dyn ActivityProvider>>,
}

impl LiveCostSource {
    pub fn new(spend: Box<dyn SpendProvider>) -> Self {
        Self {
            metadata: SourceMetadata {
                id: "live".to_string(),
                name: "Live".to_string(),
                description: "Month-to-date spend from the billing API".to_string(),
                kind: SourceKind::Live,
            },
            spend,
            activity: None,
        }
    }

    /// Enrich ranked services with recent activity counts
    pub fn with_activity(mut self, activity: Box<dyn ActivityProvider>) -> Self {
        self.activity = Some(activity);
        self
    }

    /// Fetch the snapshot for the month containing `today`
    pub fn fetch_for(&self, today: NaiveDate) -> Result<CostData, SourceError> {
        let period = BillingPeriod::month_to_date(today);
        let raw = self.spend.spend_by_service(&period)?;

        let mut total = 0.0;
        let mut services = Vec::with_capacity(raw.len());
        for (name, cost) in raw {
            if cost <= 0.0 || !cost.is_finite() {
                continue;
            }
            total += cost;
            if name.trim().is_empty() {
                debug!("Skipping unnamed billing line of {:.2}", cost);
                continue;
            }
            services.push(ServiceCost::without_activity(name, round_cents(cost)));
        }

        let mut ranked = top_services(services, DEFAULT_TOP_SERVICES);
        if let Some(activity) = &self.activity {
            for service in &mut ranked {
                service.activity_count = Self::lookup_activity(activity.as_ref(), &service.name);
            }
        }

        Ok(CostData {
            month_to_date: round_cents(total),
            top_services: ranked,
            last_updated: Local::now(),
        })
    }

    /// Activity for one service; a failed lookup counts as no activity
    fn lookup_activity(provider: &dyn ActivityProvider, service_name: &str) -> u32 {
        let event_source = event_source_for(service_name);
        match provider.event_count(&event_source, ACTIVITY_LOOKBACK, ACTIVITY_MAX_RESULTS) {
            Ok(count) => count.min(ACTIVITY_MAX_RESULTS),
            Err(e) => {
                warn!("Activity lookup failed for {} ({}): {}", service_name, event_source, e);
                0
            }
        }
    }
}

impl CostSource for LiveCostSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn fetch(&mut self) -> Result<CostData, SourceError> {
        self.fetch_for(Local::now().date_naive())
    }
}
