//! Branch prediction unit (BRU).
//!
//! This module contains the four scored branch predictors and the
//! [`PredictorBank`] that drives them. Every conditional branch is shown to
//! all four predictors; each records its own prediction, is told the true
//! outcome, and accumulates accuracy counters. Predictions never influence
//! control flow: the architectural outcome always governs, and the bank is
//! pure bookkeeping run synchronously with the branch that it scores.

pub use self::branch_predictor::BranchScorer;

/// Scoring interface shared by all predictors.
pub mod branch_predictor;

/// Bimodal predictor (per-address 2-bit saturating counters).
pub mod bimodal;

/// Backward-taken/forward-not-taken static heuristic.
pub mod btfnt;

/// Global-history predictor (gshare algorithm).
pub mod gshare;

/// Static always-not-taken predictor.
pub mod static_nt;

use self::bimodal::BimodalPredictor;
use self::btfnt::BtfntPredictor;
use self::gshare::GsharePredictor;
use self::static_nt::NotTakenPredictor;
use crate::config::PredictorConfig;
use crate::stats::Stat;

/// The four predictors scored in parallel on every conditional branch.
#[derive(Debug)]
pub struct PredictorBank {
    not_taken: NotTakenPredictor,
    btfnt: BtfntPredictor,
    bimodal: BimodalPredictor,
    gshare: GsharePredictor,
}

impl PredictorBank {
    /// Creates a bank with the given table sizing.
    pub fn new(config: &PredictorConfig) -> Self {
        Self {
            not_taken: NotTakenPredictor::new(),
            btfnt: BtfntPredictor::new(),
            bimodal: BimodalPredictor::new(config.bimodal_table_bits),
            gshare: GsharePredictor::new(config.gshare_table_bits, config.gshare_history_bits),
        }
    }

    /// Scores one resolved conditional branch against all four predictors.
    ///
    /// Each predictor is queried first and then trained with the true
    /// outcome, so table state reflects only branches that resolved before
    /// this one.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the branch instruction.
    /// * `target` - The branch's target address (taken or not).
    /// * `taken` - The architectural outcome.
    pub fn observe(&mut self, pc: u32, target: u32, taken: bool) {
        self.not_taken.observe(pc, target, taken);
        self.btfnt.observe(pc, target, taken);
        self.bimodal.observe(pc, target, taken);
        self.gshare.observe(pc, target, taken);
    }

    /// Copies the accumulated predictor counters into a statistics snapshot.
    pub fn export(&self, stat: &mut Stat) {
        stat.not_taken = *self.not_taken.stats();
        stat.btfnt = *self.btfnt.stats();
        stat.bimodal = *self.bimodal.stats();
        stat.gshare = *self.gshare.stats();
    }
}
