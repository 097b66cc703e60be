//! The public simulation entry point.
//!
//! [`simulate`] wraps an [`Executor`] with default configuration for the
//! common one-call case. Callers needing injected console endpoints,
//! non-default predictor sizing, or step-wise execution construct the
//! executor directly.

use std::io::Write;

use crate::common::symbols::SymbolTable;
use crate::config::SimConfig;
use crate::core::executor::Executor;
use crate::memory::Memory;
use crate::stats::Stat;

/// Simulates a program resident in `mem`, starting at `start_addr`.
///
/// Runs until the program invokes the exit service or a fatal condition
/// halts the loop. Faults are reported on the diagnostic channel; the
/// returned statistics are well-formed either way.
///
/// # Arguments
///
/// * `mem` - Memory image holding the program.
/// * `start_addr` - Initial program counter.
/// * `log` - Optional sink receiving one line per retired instruction.
/// * `symbols` - Optional symbol table for trace annotation.
pub fn simulate<'a, M: Memory>(
    mem: &'a mut M,
    start_addr: u32,
    log: Option<&'a mut dyn Write>,
    symbols: Option<&'a SymbolTable>,
) -> Stat {
    let config = SimConfig::default();
    let mut executor = Executor::new(mem, start_addr, &config);
    if let Some(log) = log {
        executor = executor.with_log(log);
    }
    if let Some(symbols) = symbols {
        executor = executor.with_symbols(symbols);
    }
    executor.run()
}
