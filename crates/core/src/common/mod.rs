//! Common types shared across the simulator.
//!
//! This module collects the pieces that do not belong to any one stage:
//! 1. **Faults:** The conditions that terminate a run early.
//! 2. **Symbols:** The optional address-to-name table used by the disassembler.

/// Fault taxonomy for execution-fatal conditions.
pub mod error;
/// Address-to-name symbol table for disassembly annotation.
pub mod symbols;
