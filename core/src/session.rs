//! Simulator session: owns the current parameters and the last outcome
//! shown to the user. The estimator itself stays stateless.

use crate::{
    advisory::{advise_with, Advisory},
    error::SimResult,
    estimator::{CapacityEstimator, Estimate, OverloadReport, SimulationResult},
    params::SimulationParameters,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SessionOutcome {
    Completed {
        result:     SimulationResult,
        advisories: Vec<Advisory>,
    },
    Overloaded {
        report: OverloadReport,
    },
}

pub struct SimulatorSession {
    estimator:  CapacityEstimator,
    defaults:   SimulationParameters,
    parameters: SimulationParameters,
    last:       Option<SessionOutcome>,
}

impl SimulatorSession {
    pub fn new(estimator: CapacityEstimator, defaults: SimulationParameters) -> Self {
        Self {
            estimator,
            defaults,
            parameters: defaults,
            last: None,
        }
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.parameters
    }

    pub fn last_outcome(&self) -> Option<&SessionOutcome> {
        self.last.as_ref()
    }

    /// Replace the parameters. Any previous outcome is discarded.
    /// Validation happens on `run()`, as the input surface may pass
    /// through intermediate values while a slider moves.
    pub fn set_parameters(&mut self, parameters: SimulationParameters) {
        self.parameters = parameters;
        self.last = None;
    }

    /// Estimate with the current parameters and keep the outcome.
    /// On invalid parameters nothing is kept and the error is returned.
    pub fn run(&mut self) -> SimResult<&SessionOutcome> {
        self.last = None;
        let outcome = match self.estimator.estimate(&self.parameters)? {
            Estimate::Stable(result) => SessionOutcome::Completed {
                advisories: advise_with(&result, self.estimator.config()),
                result,
            },
            Estimate::Overloaded(report) => SessionOutcome::Overloaded { report },
        };
        Ok(&*self.last.insert(outcome))
    }

    /// Restore the default parameters and clear the outcome.
    pub fn reset(&mut self) {
        self.parameters = self.defaults;
        self.last = None;
        log::debug!("session: reset to {:?}", self.defaults);
    }
}

impl Default for SimulatorSession {
    fn default() -> Self {
        Self::new(CapacityEstimator::default(), SimulationParameters::default())
    }
}
