//! RISC-V Base Integer Instruction Set (RV32I).
//!
//! Constant definitions for the base integer opcodes and function codes.
//!
//! # Structure
//!
//! - `opcodes`: Major opcodes (bits 6-0).
//! - `funct3`: Function codes distinguishing operations within an opcode.
//! - `funct7`: Secondary function codes (ADD vs SUB, SRL vs SRA).

/// Function code 3 definitions for the base integer set.
pub mod funct3;

/// Function code 7 definitions for the base integer set.
pub mod funct7;

/// Base integer major opcodes.
pub mod opcodes;
