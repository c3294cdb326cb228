//! Capacity estimator: single-class, multi-server steady-state approximation.
//!
//! Given staff count, arrival rate and mean service time, derives
//! utilization, expected wait, expected queue length and daily throughput.
//!
//! RULES:
//!   - Parameters are validated before any formula runs.
//!   - An unstable configuration (utilization >= 1) is an Overloaded
//!     outcome, never a number and never an error.
//!   - All raw values are computed first. Each output field is then
//!     rounded on its own, so no field is derived from a rounded one.

use crate::{
    config::ModelConfig,
    error::SimResult,
    params::SimulationParameters,
    types::Minutes,
};
use serde::{Deserialize, Serialize};

pub const OVERLOAD_MESSAGE: &str = "System is overloaded! Increase staff or reduce arrival rate.";

/// Unrounded intermediates of one estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawMetrics {
    /// Completions per hour for a single server.
    pub service_rate_per_server: f64,
    /// Offered load per server (rho).
    pub utilization: f64,
    /// None when demand meets or exceeds capacity: the queue grows without bound.
    pub queue: Option<QueueMetrics>,
    pub daily_throughput: f64,
}

/// Steady-state queue figures, only defined for a stable system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueueMetrics {
    pub average_wait_minutes: f64,
    pub max_wait_minutes:     f64,
    pub average_queue_length: f64,
}

impl RawMetrics {
    pub fn is_stable(&self) -> bool {
        self.queue.is_some()
    }
}

/// Rounded, presentation-ready result of a stable estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub average_wait_minutes:       Minutes,
    pub max_wait_minutes:           Minutes,
    /// Expected number of students waiting, one decimal place.
    pub average_queue_length:       f64,
    pub utilization_percent:        u32,
    pub estimated_daily_throughput: u64,
}

/// Returned instead of a result when demand meets or exceeds capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverloadReport {
    pub utilization: f64,
    pub message:     String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Estimate {
    Stable(SimulationResult),
    Overloaded(OverloadReport),
}

impl Estimate {
    pub fn is_overloaded(&self) -> bool {
        matches!(self, Estimate::Overloaded(_))
    }

    pub fn result(&self) -> Option<&SimulationResult> {
        match self {
            Estimate::Stable(result) => Some(result),
            Estimate::Overloaded(_)  => None,
        }
    }
}

/// Stateless estimator. Holds only model constants.
#[derive(Debug, Clone, Default)]
pub struct CapacityEstimator {
    config: ModelConfig,
}

impl CapacityEstimator {
    pub fn new(config: ModelConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Compute the unrounded intermediates.
    /// `queue` is None for an unstable system.
    pub fn raw_metrics(&self, params: &SimulationParameters) -> SimResult<RawMetrics> {
        params.validate()?;

        // Stability is decided on A*M against 60*S, not on the quotient
        // A / (S * 60/M), which can round just below 1 at exact saturation.
        // For x < y the float x/y is at most 1 - 2^-53, so rho < 1 iff stable.
        let demand = params.arrival_rate * params.mean_service_time_minutes;
        let capacity = 60.0 * params.server_count as f64;
        let utilization = demand / capacity;
        let service_rate_per_server = 60.0 / params.mean_service_time_minutes;
        let daily_throughput = params.arrival_rate * self.config.operating_hours;

        let queue = (demand < capacity).then(|| {
            let average_wait_minutes =
                (utilization / (1.0 - utilization)) * params.mean_service_time_minutes;
            QueueMetrics {
                average_wait_minutes,
                max_wait_minutes: average_wait_minutes * self.config.max_wait_multiplier,
                average_queue_length: params.arrival_rate * average_wait_minutes / 60.0,
            }
        });

        Ok(RawMetrics {
            service_rate_per_server,
            utilization,
            queue,
            daily_throughput,
        })
    }

    pub fn estimate(&self, params: &SimulationParameters) -> SimResult<Estimate> {
        let raw = self.raw_metrics(params)?;

        let Some(queue) = raw.queue else {
            log::info!(
                "estimator: overloaded servers={} arrival={} service={} rho={:.3}",
                params.server_count,
                params.arrival_rate,
                params.mean_service_time_minutes,
                raw.utilization
            );
            return Ok(Estimate::Overloaded(OverloadReport {
                utilization: raw.utilization,
                message:     OVERLOAD_MESSAGE.to_string(),
            }));
        };

        let result = SimulationResult {
            average_wait_minutes:       round_minutes(queue.average_wait_minutes),
            max_wait_minutes:           round_minutes(queue.max_wait_minutes),
            average_queue_length:       round_tenths(queue.average_queue_length),
            utilization_percent:        utilization_percent(raw.utilization),
            estimated_daily_throughput: raw.daily_throughput.round() as u64,
        };

        log::debug!(
            "estimator: servers={} arrival={} service={} rho={:.4} wait={:.2} -> {:?}",
            params.server_count,
            params.arrival_rate,
            params.mean_service_time_minutes,
            raw.utilization,
            queue.average_wait_minutes,
            result
        );

        Ok(Estimate::Stable(result))
    }
}

/// Estimate with the default model constants.
pub fn estimate(params: &SimulationParameters) -> SimResult<Estimate> {
    CapacityEstimator::default().estimate(params)
}

// Inputs are non-negative, so f64::round (half away from zero) is half-up.
// `as` saturates at u32::MAX for absurdly long waits.
fn round_minutes(raw: f64) -> Minutes {
    raw.round() as Minutes
}

fn round_tenths(raw: f64) -> f64 {
    (raw * 10.0).round() / 10.0
}

/// A stable system never reports 100%: rho in [0.995, 1) is shown as 99.
fn utilization_percent(utilization: f64) -> u32 {
    ((utilization * 100.0).round() as u32).min(99)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_helpers_round_half_up() {
        assert_eq!(round_minutes(3.5), 4);
        assert_eq!(round_minutes(3.49), 3);
        assert_eq!(round_tenths(0.25), 0.3);
        assert_eq!(round_tenths(0.5952), 0.6);
    }

    #[test]
    fn near_saturation_utilization_stays_below_100() {
        assert_eq!(utilization_percent(0.9999), 99);
        assert_eq!(utilization_percent(0.994), 99);
        assert_eq!(utilization_percent(0.4167), 42);
    }
}
