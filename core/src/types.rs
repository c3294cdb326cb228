//! Shared primitive types used across the queueing model.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whole minutes, as shown to students and staff.
pub type Minutes = u32;

/// Rank of a ticket in the queue. 1 = next to be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct QueuePosition(u32);

impl QueuePosition {
    pub fn new(rank: u32) -> SimResult<Self> {
        if rank == 0 {
            return Err(SimError::InvalidParameter {
                field: "position",
                value: 0.0,
            });
        }
        Ok(Self(rank))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for QueuePosition {
    type Error = SimError;

    fn try_from(rank: u32) -> SimResult<Self> {
        Self::new(rank)
    }
}

impl From<QueuePosition> for u32 {
    fn from(position: QueuePosition) -> u32 {
        position.0
    }
}

impl fmt::Display for QueuePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Expected wait for a single ticket, in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketWaitEstimate(pub Minutes);

impl TicketWaitEstimate {
    pub fn minutes(self) -> Minutes {
        self.0
    }
}

impl fmt::Display for TicketWaitEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} minutes", self.0)
    }
}
