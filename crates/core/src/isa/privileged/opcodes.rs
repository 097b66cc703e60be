//! System-class opcode constants.

/// Major opcode shared by ECALL, EBREAK, and the CSR instructions.
pub const OP_SYSTEM: u32 = 0b1110011;

/// The bare trap instruction (full 32-bit encoding).
pub const ECALL: u32 = 0x0000_0073;

/// Breakpoint (full 32-bit encoding). Unsupported; fatal when executed.
pub const EBREAK: u32 = 0x0010_0073;
