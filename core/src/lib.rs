//! Accounts-office queue model.
//!
//! A closed-form steady-state capacity estimator, independent advisory
//! rules over its results, and a position-based wait predictor used
//! when a ticket is issued. Everything here is a pure function of its
//! inputs; randomness in the ticket flow is injected through `rng`.

pub mod advisory;
pub mod config;
pub mod error;
pub mod estimator;
pub mod params;
pub mod predictor;
pub mod rng;
pub mod session;
pub mod ticket;
pub mod types;

pub use advisory::{advise, Advisory};
pub use error::{SimError, SimResult};
pub use estimator::{estimate, CapacityEstimator, Estimate, OverloadReport, SimulationResult};
pub use params::SimulationParameters;
pub use predictor::predict_wait_from_position;
pub use types::{QueuePosition, TicketWaitEstimate};
