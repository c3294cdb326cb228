//! Position-based wait predictor, used at ticket issuance before the
//! live queue state is known.

use crate::{
    config::ModelConfig,
    error::SimResult,
    rng::RandomSource,
    types::{Minutes, QueuePosition, TicketWaitEstimate},
};

/// Deterministic wait for a ticket at `position` (1 = next in line):
/// eight minutes per place in the queue.
pub fn predict_wait_from_position(position: u32) -> SimResult<TicketWaitEstimate> {
    WaitPredictor::default().predict(position)
}

#[derive(Debug, Clone, Copy)]
pub struct WaitPredictor {
    pub minutes_per_position: Minutes,
    pub max_jitter_minutes:   Minutes,
}

impl Default for WaitPredictor {
    fn default() -> Self {
        Self::from_config(&ModelConfig::default())
    }
}

impl WaitPredictor {
    pub fn from_config(config: &ModelConfig) -> Self {
        Self {
            minutes_per_position: config.minutes_per_position,
            max_jitter_minutes:   config.max_jitter_minutes,
        }
    }

    /// Rejects position 0.
    pub fn predict(&self, position: u32) -> SimResult<TicketWaitEstimate> {
        let position = QueuePosition::new(position)?;
        Ok(self.predict_at(position))
    }

    pub fn predict_at(&self, position: QueuePosition) -> TicketWaitEstimate {
        TicketWaitEstimate(position.get().saturating_mul(self.minutes_per_position))
    }

    /// Deterministic wait plus a uniform jitter in [0, max_jitter_minutes]
    /// drawn from `rng`. Display-only: the jitter is not part of the model.
    pub fn predict_with_jitter(
        &self,
        position: u32,
        rng: &mut impl RandomSource,
    ) -> SimResult<TicketWaitEstimate> {
        let base = self.predict(position)?;
        let jitter = rng.next_u64_below(self.max_jitter_minutes as u64 + 1) as Minutes;
        Ok(TicketWaitEstimate(base.minutes().saturating_add(jitter)))
    }
}
