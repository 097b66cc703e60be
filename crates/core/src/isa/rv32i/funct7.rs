//! RISC-V Base Integer (I) Function Codes (funct7).
//!
//! The `funct7` field (bits 31-25) distinguishes the alternate encodings that
//! share a funct3 value: ADD vs SUB and SRL vs SRA (register and immediate
//! shift forms alike).

/// Default secondary function code (ADD, SRL, SLL, ...).
pub const DEFAULT: u32 = 0b0000000;

/// Subtract (funct3 = ADD_SUB).
pub const SUB: u32 = 0b0100000;

/// Arithmetic right shift (funct3 = SRL_SRA).
pub const SRA: u32 = 0b0100000;
