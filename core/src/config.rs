use crate::{
    error::{SimError, SimResult},
    params::{ParameterBounds, SimulationParameters},
    types::Minutes,
};
use serde::{Deserialize, Serialize};

/// Constants of the queueing model and its advisory rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Heuristic tail multiplier applied to the average wait.
    pub max_wait_multiplier: f64,
    /// Length of the operating day used for throughput.
    pub operating_hours: f64,
    /// Average wait above this fires the "add staff" advisory.
    pub high_wait_threshold_minutes: Minutes,
    /// Utilization above this fires the "near capacity" advisory.
    pub near_capacity_threshold_percent: u32,
    /// Average wait at or below this fires the "acceptable" advisory.
    pub acceptable_wait_threshold_minutes: Minutes,
    pub minutes_per_position: Minutes,
    pub max_jitter_minutes: Minutes,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            max_wait_multiplier:               2.5,
            operating_hours:                   8.0,
            high_wait_threshold_minutes:       20,
            near_capacity_threshold_percent:   85,
            acceptable_wait_threshold_minutes: 15,
            minutes_per_position:              8,
            max_jitter_minutes:                9,
        }
    }
}

impl ModelConfig {
    pub fn validate(&self) -> SimResult<()> {
        if !(self.max_wait_multiplier.is_finite() && self.max_wait_multiplier > 0.0) {
            return Err(SimError::InvalidConfig {
                reason: format!("max_wait_multiplier must be positive, got {}", self.max_wait_multiplier),
            });
        }
        if !(self.operating_hours.is_finite() && self.operating_hours > 0.0) {
            return Err(SimError::InvalidConfig {
                reason: format!("operating_hours must be positive, got {}", self.operating_hours),
            });
        }
        if self.minutes_per_position == 0 {
            return Err(SimError::InvalidConfig {
                reason: "minutes_per_position must be at least 1".into(),
            });
        }
        Ok(())
    }
}

/// Everything the headless runner needs to drive a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub model:               ModelConfig,
    pub bounds:              ParameterBounds,
    pub defaults:            SimulationParameters,
    /// Issued tickets are placed uniformly in [1, max_issued_position].
    pub max_issued_position: u32,
    pub seed:                u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            model:               ModelConfig::default(),
            bounds:              ParameterBounds::default(),
            defaults:            SimulationParameters::default(),
            max_issued_position: 5,
            seed:                42,
        }
    }
}

impl RunnerConfig {
    /// Load from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config = Self::from_json(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {path}: {e}"))?;
        log::debug!("Loaded runner config from {path}");
        Ok(config)
    }

    pub fn from_json(content: &str) -> SimResult<Self> {
        let config: RunnerConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        self.model.validate()?;
        self.defaults.validate()?;
        if self.max_issued_position == 0 {
            return Err(SimError::InvalidConfig {
                reason: "max_issued_position must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let config = RunnerConfig::from_json("{}").unwrap();
        assert_eq!(config, RunnerConfig::default());
    }

    #[test]
    fn partial_model_section_keeps_other_defaults() {
        let config = RunnerConfig::from_json(r#"{"model": {"operating_hours": 10.0}}"#).unwrap();
        assert_eq!(config.model.operating_hours, 10.0);
        assert_eq!(config.model.max_wait_multiplier, 2.5);
        assert_eq!(config.max_issued_position, 5);
    }

    #[test]
    fn non_positive_multiplier_rejected() {
        let result = RunnerConfig::from_json(r#"{"model": {"max_wait_multiplier": 0.0}}"#);
        assert!(matches!(result, Err(SimError::InvalidConfig { .. })));
    }

    #[test]
    fn invalid_default_parameters_rejected() {
        let json = r#"{"defaults": {"server_count": 0, "arrival_rate": 10.0, "mean_service_time_minutes": 5.0}}"#;
        let result = RunnerConfig::from_json(json);
        assert!(matches!(result, Err(SimError::InvalidParameter { field: "server_count", .. })));
    }
}
