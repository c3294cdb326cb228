//! Deterministic random number generation.
//!
//! RULE: The model itself never draws random numbers.
//! Anything random in the ticket flow (queue position, jitter,
//! ticket number) flows through a RandomSource handed in by the caller,
//! normally a SeededRng derived from a single master seed.
//!
//! Each stream is seeded from (master_seed XOR slot constant), so
//!   - adding a new stream never changes existing streams, and
//!   - each stream is reproducible in isolation.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Source of uniform integers for the non-deterministic parts of the ticket flow.
pub trait RandomSource {
    /// Draw a u64 in [0, n). `n` must be > 0.
    fn next_u64_below(&mut self, n: u64) -> u64;

    /// Draw a u64 in [lo, hi], both inclusive.
    fn next_in_range(&mut self, lo: u64, hi: u64) -> u64 {
        assert!(lo <= hi, "empty range {lo}..={hi}");
        lo + self.next_u64_below(hi - lo + 1)
    }
}

/// A named, deterministic RNG for a single stream.
pub struct SeededRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl SeededRng {
    /// Create a stream RNG from the master seed and a stable stream index.
    /// The index must never change once assigned.
    pub fn new(master_seed: u64, stream_index: u64) -> Self {
        let derived_seed = master_seed ^ (stream_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

impl RandomSource for SeededRng {
    fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }
}

/// All stream RNGs for one issuing desk, indexed by stable slot.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn for_stream(&self, slot: StreamSlot) -> SeededRng {
        SeededRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries, only append.
/// Reordering changes every stream's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamSlot {
    TicketNumber = 0,
    QueuePosition = 1,
    WaitJitter = 2,
}

impl StreamSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::TicketNumber  => "ticket_number",
            Self::QueuePosition => "queue_position",
            Self::WaitJitter    => "wait_jitter",
        }
    }
}
