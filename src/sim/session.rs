// src/sim/session.rs

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::handoff::SessionConfig;
use crate::sim::metrics::Metrics;
use crate::sim::scenario::Scenario;
use crate::sim::snapshot::Snapshot;
use crate::sim::state::StateStore;
use crate::sim::unit_sample;

/// Share of the sampled hourly rate that goes into the planned budget.
const BUDGET_RATE_SHARE: f64 = 0.8;

/// Parameters fixed for the lifetime of a session.
#[derive(Debug, Clone)]
pub struct SessionParams {
    pub max_steps: u32,
    /// Fraction in `[0, 1]`.
    pub error_margin: f64,
    /// Display name of the plan being simulated.
    pub file_name: String,
    pub seed: u64,
}

impl SessionParams {
    pub fn from_config(cfg: &SessionConfig, seed: u64) -> Self {
        Self {
            max_steps: cfg.max_steps,
            error_margin: cfg.error_margin(),
            file_name: cfg.file_name.clone(),
            seed,
        }
    }
}

/// One dashboard session: scenario, mutable state, metrics and RNG.
///
/// Owned by the run controller; only [`crate::sim::engine::step`] mutates
/// the state between resets.
#[derive(Debug)]
pub struct Session {
    scenario: Scenario,
    params: SessionParams,
    /// Sampled once per session, kept across resets.
    base_cost_per_hour: f64,
    total_estimated_cost: f64,
    pub(crate) store: StateStore,
    pub(crate) metrics: Metrics,
    pub(crate) rng: ChaCha8Rng,
}

impl Session {
    pub fn new(scenario: Scenario, params: SessionParams) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        let base_cost_per_hour = if params.max_steps > 300 {
            15.0 + unit_sample(&mut rng) * 5.0
        } else {
            25.0 + unit_sample(&mut rng) * 10.0
        };

        info!(
            seed = params.seed,
            max_steps = params.max_steps,
            error_margin = params.error_margin,
            base_cost_per_hour,
            "session created"
        );

        let mut session = Self {
            scenario,
            params,
            base_cost_per_hour,
            total_estimated_cost: 0.0,
            store: StateStore::default(),
            metrics: Metrics::default(),
            rng,
        };
        session.reset();
        session
    }

    /// Discard all task/agent state and metrics and rebuild from the scenario.
    pub fn reset(&mut self) {
        self.store = StateStore::from_scenario(&self.scenario, self.params.max_steps, &mut self.rng);
        self.metrics = Metrics::default();
        self.total_estimated_cost = self
            .store
            .tasks()
            .iter()
            .map(|t| t.est_duration * t.cost_factor * self.base_cost_per_hour * BUDGET_RATE_SHARE)
            .sum();

        debug!(
            total_estimated_cost = self.total_estimated_cost,
            "session state rebuilt"
        );
    }

    /// All tasks completed, or the step limit reached.
    pub fn is_finished(&self) -> bool {
        self.store.all_completed() || self.metrics.time_step >= self.params.max_steps
    }

    pub fn params(&self) -> &SessionParams {
        &self.params
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn base_cost_per_hour(&self) -> f64 {
        self.base_cost_per_hour
    }

    pub fn total_estimated_cost(&self) -> f64 {
        self.total_estimated_cost
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            file_name: self.params.file_name.clone(),
            max_steps: self.params.max_steps,
            metrics: self.metrics,
            total_estimated_cost: self.total_estimated_cost,
            tasks: self.store.tasks().to_vec(),
            agents: self.store.agents().to_vec(),
        }
    }
}
