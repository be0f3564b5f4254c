use enroll_insight::config::DashboardConfig;
use enroll_insight::dashboards::enrollment::domain::{ApplicantRecord, DashboardError};
use enroll_insight::dashboards::enrollment::generator::{
    generate_population, validate_population_size,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// The session population: generated once, shared read-only with every
/// handler. Records are never mutated after generation.
#[derive(Clone)]
pub(crate) struct PopulationHandle {
    records: Arc<Vec<ApplicantRecord>>,
    seed: u64,
}

impl PopulationHandle {
    pub(crate) fn generate(size: usize, seed: u64) -> Result<Self, DashboardError> {
        validate_population_size(size)?;
        Ok(Self {
            records: Arc::new(generate_population(size, seed)),
            seed,
        })
    }

    pub(crate) fn records(&self) -> &[ApplicantRecord] {
        &self.records
    }

    pub(crate) fn seed(&self) -> u64 {
        self.seed
    }
}

pub(crate) fn resolve_population(
    config: &DashboardConfig,
    size_override: Option<usize>,
    seed_override: Option<u64>,
) -> Result<PopulationHandle, DashboardError> {
    let size = size_override.unwrap_or(config.population_size);
    let seed = seed_override.unwrap_or(config.population_seed);
    PopulationHandle::generate(size, seed)
}
