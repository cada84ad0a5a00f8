//! Deterministic solver-level RNG wrapper.
//!
//! # Determinism strategy
//!
//! The planner owns exactly one `SolverRng`, seeded from the run's seed and
//! threaded explicitly through the resolution pass.  It is reseeded at the
//! start of every plan, and there is no process-wide generator, so the same
//! seed always consumes an identical random stream and produces an identical
//! plan.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

/// Seeded random source used for candidate tie-breaking.
///
/// Not `Clone`: a stream is never forked, only restarted from its seed.
pub struct SolverRng(SmallRng);

impl SolverRng {
    pub fn new(seed: u64) -> Self {
        SolverRng(SmallRng::seed_from_u64(seed))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.0);
    }
}
