//! RISC-V RV32IM instruction-level simulator library.
//!
//! This crate implements an instruction-level RV32IM simulator with the following:
//! 1. **Core:** Fetch-decode-execute loop, general-purpose registers, and syscall services.
//! 2. **ISA:** A single shared decoder and disassembler for RV32I and the M extension.
//! 3. **Branch prediction:** A passive four-predictor bank scoring every conditional branch.
//! 4. **Memory:** The byte-addressable memory boundary and a sparse page-backed store.
//! 5. **Simulation:** ELF/flat-binary loader, configuration, and statistics collection.

/// Common types (fault taxonomy, symbol table).
pub mod common;
/// Simulator configuration (defaults, predictor sizing).
pub mod config;
/// CPU core (registers, predictor bank, syscalls, executor).
pub mod core;
/// Instruction set (decode, disassembly, ABI, RV32I/M, system encodings).
pub mod isa;
/// Byte-addressable memory boundary and sparse backing store.
pub mod memory;
/// Program loader and the public simulation entry point.
pub mod sim;
/// Execution statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `SimConfig::default()` or deserialize from JSON.
pub use crate::config::SimConfig;
/// Main executor type; owns all architectural state for one run.
pub use crate::core::executor::Executor;
/// Memory boundary trait and the bundled sparse implementation.
pub use crate::memory::{Memory, SparseMemory};
/// One-call simulation entry point.
pub use crate::sim::simulator::simulate;
/// Statistics snapshot returned by every run.
pub use crate::stats::Stat;
