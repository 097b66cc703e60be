//! System-Class Encodings.
//!
//! The simulator supports exactly one system instruction: the bare trap
//! (`ECALL`). Every other system-class encoding is decoded far enough to be
//! reported precisely, then treated as fatal.

/// System-class opcode constants.
pub mod opcodes;
