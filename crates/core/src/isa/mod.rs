//! Instruction Set Architecture (ISA) definitions.
//!
//! Contains definitions for opcodes, function codes, and decoding logic,
//! organized by RISC-V extension.
//!
//! # Extensions
//!
//! * `rv32i`: Base Integer Instruction Set (32-bit).
//! * `rv32m`: Standard Extension for Integer Multiplication and Division.
//! * `privileged`: System-class encodings (the bare trap and its relatives).

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Instruction decoding logic for all supported instruction formats.
pub mod decode;

/// Instruction disassembler for the trace log and diagnostics.
pub mod disasm;

/// Decoded instruction representation and bit extraction utilities.
pub mod instruction;

/// System-class encodings (ECALL and the unsupported relatives).
pub mod privileged;

/// Base integer instruction set (32-bit RISC-V core instructions).
pub mod rv32i;

/// Integer multiply/divide extension (MUL, DIV, REM instructions).
pub mod rv32m;
