//! Simulated cost source
//!
//! Produces plausible month-to-date numbers without touching a billing API.
//! The random generator is injected so a seeded run is fully reproducible.

use chrono::Local;
use cost_widget_core::{
    top_services, CostData, CostSource, ServiceCost, SourceError, SourceKind, SourceMetadata,
    DEFAULT_TOP_SERVICES, SIMULATED_MTD_MAX, SIMULATED_MTD_MIN,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::catalog::SERVICE_CATALOG;

/// Fewest services a simulated snapshot lists
pub const MIN_SIMULATED_SERVICES: usize = 5;

/// Most services a simulated snapshot lists
pub const MAX_SIMULATED_SERVICES: usize = 10;

/// Each service except the last takes at most this share of what is left
pub const MAX_SHARE_FRACTION: f64 = 0.6;

/// Upper bound of the simulated per-service activity count
pub const MAX_SIMULATED_ACTIVITY: u32 = 150;

/// Simulated cost source
pub struct SimulatedCostSource<R: Rng = StdRng> {
    metadata: SourceMetadata,
    rng: R,
}

impl SimulatedCostSource<StdRng> {
    /// Create a source seeded from the OS
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a reproducible source
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for SimulatedCostSource<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> SimulatedCostSource<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            metadata: SourceMetadata {
                id: "simulated".to_string(),
                name: "Simulated".to_string(),
                description: "Randomly generated spend for demos and testing".to_string(),
                kind: SourceKind::Simulated,
            },
            rng,
        }
    }

    /// Generate one snapshot
    ///
    /// Amounts are handled in whole cents so the service costs add up to
    /// the month-to-date total exactly.
    pub fn generate(&mut self) -> CostData {
        let month_to_date: f64 = self.rng.gen_range(SIMULATED_MTD_MIN..=SIMULATED_MTD_MAX);
        let total_cents = (month_to_date * 100.0).round() as u64;

        let count = self
            .rng
            .gen_range(MIN_SIMULATED_SERVICES..=MAX_SIMULATED_SERVICES);
        let picked: Vec<&str> = SERVICE_CATALOG
            .choose_multiple(&mut self.rng, count)
            .copied()
            .collect();

        let mut remaining = total_cents;
        let mut services = Vec::with_capacity(picked.len());
        for (i, name) in picked.iter().enumerate() {
            let share = if i + 1 == picked.len() {
                remaining
            } else {
                let fraction: f64 = self.rng.gen_range(0.0..MAX_SHARE_FRACTION);
                (remaining as f64 * fraction).floor() as u64
            };
            remaining -= share;
            services.push(ServiceCost::without_activity(*name, share as f64 / 100.0));
        }

        let mut ranked = top_services(services, DEFAULT_TOP_SERVICES);
        for service in &mut ranked {
            service.activity_count = self.rng.gen_range(0..=MAX_SIMULATED_ACTIVITY);
        }

        CostData {
            month_to_date: total_cents as f64 / 100.0,
            top_services: ranked,
            last_updated: Local::now(),
        }
    }
}

impl<R: Rng> CostSource for SimulatedCostSource<R> {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn fetch(&mut self) -> Result<CostData, SourceError> {
        Ok(self.generate())
    }
}
