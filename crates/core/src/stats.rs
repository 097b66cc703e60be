//! Execution statistics collection and reporting.
//!
//! This module tracks the metrics a run produces. It provides:
//! 1. **Retired instructions:** Total count of completed instructions.
//! 2. **Branch prediction:** Per-predictor prediction and misprediction
//!    counts for all four scored predictors.
//! 3. **Confidence breakdown:** For the table-based predictors, the same
//!    counts bucketed by the saturating counter's value at prediction time.
//!
//! A [`Stat`] is created fresh for every run, returned by value, and never
//! mutated after it is returned. It serializes to JSON for machine
//! consumption.

use serde::Serialize;

/// Display names for the four 2-bit counter confidence states.
pub const CONFIDENCE_STATES: [&str; 4] = ["strong-nt", "weak-nt", "weak-t", "strong-t"];

/// Prediction accuracy counters for a stateless predictor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DirectionStats {
    /// Number of branches this predictor was asked about.
    pub predictions: u64,
    /// Number of predictions that disagreed with the true outcome.
    pub mispredictions: u64,
}

impl DirectionStats {
    /// Fraction of predictions that were correct, in [0, 1].
    ///
    /// Returns 0 when no predictions were made.
    pub fn accuracy(&self) -> f64 {
        if self.predictions == 0 {
            return 0.0;
        }
        1.0 - (self.mispredictions as f64 / self.predictions as f64)
    }
}

/// Prediction accuracy counters for a table-based predictor.
///
/// Counts are bucketed by the 2-bit saturating counter's value at prediction
/// time (index 0 = strongly not-taken ... index 3 = strongly taken), which
/// lets a report show whether high-confidence predictions were in fact more
/// accurate. Bucket sums equal the predictor's overall totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConfidenceStats {
    /// Predictions made from each confidence state.
    pub predictions: [u64; 4],
    /// Mispredictions made from each confidence state.
    pub mispredictions: [u64; 4],
}

impl ConfidenceStats {
    /// Total predictions across all confidence states.
    pub fn total_predictions(&self) -> u64 {
        self.predictions.iter().sum()
    }

    /// Total mispredictions across all confidence states.
    pub fn total_mispredictions(&self) -> u64 {
        self.mispredictions.iter().sum()
    }

    /// Overall fraction of predictions that were correct, in [0, 1].
    pub fn accuracy(&self) -> f64 {
        let total = self.total_predictions();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.total_mispredictions() as f64 / total as f64)
    }
}

/// Statistics snapshot for one simulation run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Stat {
    /// Number of instructions retired.
    pub instructions_retired: u64,
    /// Always-not-taken predictor counters.
    pub not_taken: DirectionStats,
    /// Backward-taken/forward-not-taken predictor counters.
    pub btfnt: DirectionStats,
    /// Bimodal predictor counters, bucketed by confidence.
    pub bimodal: ConfidenceStats,
    /// Gshare predictor counters, bucketed by confidence.
    pub gshare: ConfidenceStats,
}

impl Stat {
    /// Prints the statistics report to stdout.
    pub fn print(&self) {
        println!("==========================================================");
        println!("RV32IM SIMULATION STATISTICS");
        println!("==========================================================");
        println!("sim_insts                {}", self.instructions_retired);
        println!("----------------------------------------------------------");
        println!("BRANCH PREDICTION");
        Self::print_direction("nt", &self.not_taken);
        Self::print_direction("btfnt", &self.btfnt);
        Self::print_table("bimodal", &self.bimodal);
        Self::print_table("gshare", &self.gshare);
        println!("==========================================================");
    }

    fn print_direction(name: &str, stats: &DirectionStats) {
        println!(
            "  {:<8} predictions: {:<10} mispredicts: {:<10} accuracy: {:.2}%",
            name,
            stats.predictions,
            stats.mispredictions,
            stats.accuracy() * 100.0
        );
    }

    fn print_table(name: &str, stats: &ConfidenceStats) {
        println!(
            "  {:<8} predictions: {:<10} mispredicts: {:<10} accuracy: {:.2}%",
            name,
            stats.total_predictions(),
            stats.total_mispredictions(),
            stats.accuracy() * 100.0
        );
        for (i, state) in CONFIDENCE_STATES.iter().enumerate() {
            let preds = stats.predictions[i];
            let miss = stats.mispredictions[i];
            let acc = if preds == 0 {
                0.0
            } else {
                100.0 * (1.0 - miss as f64 / preds as f64)
            };
            println!("    [{state:>9}] predictions: {preds:<10} mispredicts: {miss:<10} accuracy: {acc:.2}%");
        }
    }
}
