//! Static Always-Not-Taken Predictor.
//!
//! Predicts every conditional branch as not taken. Stateless apart from its
//! accuracy counters, so its misprediction count is exactly the number of
//! taken branches, which makes it the baseline the other predictors are
//! read against.

use super::BranchScorer;
use crate::stats::DirectionStats;

/// Always-not-taken predictor.
#[derive(Debug, Default)]
pub struct NotTakenPredictor {
    stats: DirectionStats,
}

impl NotTakenPredictor {
    /// Creates a new predictor with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated accuracy counters.
    pub fn stats(&self) -> &DirectionStats {
        &self.stats
    }
}

impl BranchScorer for NotTakenPredictor {
    fn observe(&mut self, _pc: u32, _target: u32, taken: bool) {
        self.stats.predictions += 1;
        if taken {
            self.stats.mispredictions += 1;
        }
    }
}
