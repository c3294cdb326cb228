//! Advisory rules over a stable estimation result.
//!
//! Each rule is an independent predicate. All rules are evaluated
//! against the same result; any number of them may fire and none
//! suppresses another.

use crate::{config::ModelConfig, estimator::SimulationResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    HighWait,
    NearCapacity,
    AcceptablePerformance,
}

impl Advisory {
    pub fn id(&self) -> &'static str {
        match self {
            Self::HighWait              => "high_wait",
            Self::NearCapacity          => "near_capacity",
            Self::AcceptablePerformance => "acceptable_performance",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::HighWait => {
                "Wait times are high. Consider adding more staff during peak hours."
            }
            Self::NearCapacity => {
                "Staff utilization is very high. Additional capacity may be needed."
            }
            Self::AcceptablePerformance => {
                "Excellent performance! Wait times are within acceptable range."
            }
        }
    }

    /// Warnings call for action; the rest are informational.
    pub fn is_warning(&self) -> bool {
        !matches!(self, Self::AcceptablePerformance)
    }
}

pub struct AdvisoryRule {
    pub advisory: Advisory,
    pub applies:  fn(&SimulationResult, &ModelConfig) -> bool,
}

/// Evaluated in order; order only affects presentation.
pub const RULES: &[AdvisoryRule] = &[
    AdvisoryRule { advisory: Advisory::HighWait,              applies: wait_is_high },
    AdvisoryRule { advisory: Advisory::NearCapacity,          applies: near_capacity },
    AdvisoryRule { advisory: Advisory::AcceptablePerformance, applies: wait_is_acceptable },
];

fn wait_is_high(result: &SimulationResult, config: &ModelConfig) -> bool {
    result.average_wait_minutes > config.high_wait_threshold_minutes
}

fn near_capacity(result: &SimulationResult, config: &ModelConfig) -> bool {
    result.utilization_percent > config.near_capacity_threshold_percent
}

fn wait_is_acceptable(result: &SimulationResult, config: &ModelConfig) -> bool {
    result.average_wait_minutes <= config.acceptable_wait_threshold_minutes
}

/// All advisories that fire for `result` under the default thresholds.
pub fn advise(result: &SimulationResult) -> Vec<Advisory> {
    advise_with(result, &ModelConfig::default())
}

pub fn advise_with(result: &SimulationResult, config: &ModelConfig) -> Vec<Advisory> {
    RULES
        .iter()
        .filter(|rule| (rule.applies)(result, config))
        .map(|rule| rule.advisory)
        .collect()
}
