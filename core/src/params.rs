//! Steady-state inputs to the capacity estimator.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Number of staff serving the queue.
    pub server_count: u32,
    /// Arrivals per hour.
    pub arrival_rate: f64,
    /// Minutes per service completion, per server.
    pub mean_service_time_minutes: f64,
}

impl SimulationParameters {
    /// Build a validated parameter set.
    pub fn new(
        server_count: u32,
        arrival_rate: f64,
        mean_service_time_minutes: f64,
    ) -> SimResult<Self> {
        let params = Self {
            server_count,
            arrival_rate,
            mean_service_time_minutes,
        };
        params.validate()?;
        Ok(params)
    }

    /// Every field must be strictly positive and finite.
    /// Reports the first offending field in declaration order.
    pub fn validate(&self) -> SimResult<()> {
        if self.server_count == 0 {
            return Err(SimError::InvalidParameter {
                field: "server_count",
                value: 0.0,
            });
        }
        require_positive("arrival_rate", self.arrival_rate)?;
        require_positive("mean_service_time_minutes", self.mean_service_time_minutes)?;
        Ok(())
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            server_count:              2,
            arrival_rate:              10.0,
            mean_service_time_minutes: 5.0,
        }
    }
}

fn require_positive(field: &'static str, value: f64) -> SimResult<()> {
    // NaN fails both checks.
    if !(value.is_finite() && value > 0.0) {
        return Err(SimError::InvalidParameter { field, value });
    }
    Ok(())
}

/// Inclusive range used by the parameter input surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Range<T> {
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Slider ranges offered to staff. Advisory only: the model accepts
/// any strictly positive input and never clamps to these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterBounds {
    pub server_count:              Range<u32>,
    pub arrival_rate:              Range<f64>,
    pub mean_service_time_minutes: Range<f64>,
}

impl Default for ParameterBounds {
    fn default() -> Self {
        Self {
            server_count:              Range { min: 1,   max: 5 },
            arrival_rate:              Range { min: 5.0, max: 30.0 },
            mean_service_time_minutes: Range { min: 2.0, max: 15.0 },
        }
    }
}

impl ParameterBounds {
    pub fn contains(&self, params: &SimulationParameters) -> bool {
        self.server_count.contains(params.server_count)
            && self.arrival_rate.contains(params.arrival_rate)
            && self.mean_service_time_minutes.contains(params.mean_service_time_minutes)
    }

    /// Names of the fields that fall outside the slider ranges.
    pub fn out_of_range_fields(&self, params: &SimulationParameters) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if !self.server_count.contains(params.server_count) {
            fields.push("server_count");
        }
        if !self.arrival_rate.contains(params.arrival_rate) {
            fields.push("arrival_rate");
        }
        if !self.mean_service_time_minutes.contains(params.mean_service_time_minutes) {
            fields.push("mean_service_time_minutes");
        }
        fields
    }
}
