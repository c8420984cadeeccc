//! Simulator configuration.
//!
//! Loaded from the environment with defaults; malformed values are logged and
//! ignored.

use o2c_catalog::Scenario;

pub const SCENARIO_ENV: &str = "O2C_SCENARIO";
pub const LATENCY_SCALE_ENV: &str = "O2C_LATENCY_SCALE";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    /// Scenario loaded when the simulator starts.
    pub scenario: Scenario,
    /// Multiplier applied to every simulated latency. `0.0` disables pauses.
    pub latency_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            scenario: Scenario::default(),
            latency_scale: 1.0,
        }
    }
}

impl SimConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the process environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(SCENARIO_ENV) {
            match raw.parse::<Scenario>() {
                Ok(scenario) => config.scenario = scenario,
                Err(err) => {
                    tracing::warn!(value = %raw, error = %err, "{SCENARIO_ENV} not recognised; using default scenario")
                }
            }
        }

        if let Some(raw) = lookup(LATENCY_SCALE_ENV) {
            match parse_scale(&raw) {
                Some(scale) => config.latency_scale = scale,
                None => tracing::warn!(value = %raw, "{LATENCY_SCALE_ENV} must be a non-negative number; using 1.0"),
            }
        }

        config
    }

    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = scenario;
        self
    }

    /// Negative or non-finite scales are clamped to zero.
    pub fn with_latency_scale(mut self, scale: f64) -> Self {
        self.latency_scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };
        self
    }
}

fn parse_scale(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|scale| scale.is_finite() && *scale >= 0.0)
}
