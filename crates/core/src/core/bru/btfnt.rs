//! Backward-Taken/Forward-Not-Taken Predictor.
//!
//! A static heuristic: predicts taken iff the target address is numerically
//! less than the branch's own address. Loop-closing branches jump backward
//! and are usually taken, so this captures them without any table state.

use super::BranchScorer;
use crate::stats::DirectionStats;

/// Backward-taken/forward-not-taken predictor.
#[derive(Debug, Default)]
pub struct BtfntPredictor {
    stats: DirectionStats,
}

impl BtfntPredictor {
    /// Creates a new predictor with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated accuracy counters.
    pub fn stats(&self) -> &DirectionStats {
        &self.stats
    }
}

impl BranchScorer for BtfntPredictor {
    fn observe(&mut self, pc: u32, target: u32, taken: bool) {
        let predicted_taken = target < pc;
        self.stats.predictions += 1;
        if predicted_taken != taken {
            self.stats.mispredictions += 1;
        }
    }
}
