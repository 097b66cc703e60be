//! Fault definitions.
//!
//! A [`Fault`] is any condition that terminates the execution loop before the
//! program asks to exit. Faults never cross the public `simulate` boundary as
//! errors; they are reported on the diagnostic channel and the statistics
//! accumulated so far are still returned.

use thiserror::Error;

/// Conditions that halt the executor.
///
/// Arithmetic edge cases (division by zero, signed divide overflow) are not
/// faults; they have defined non-trapping results.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Fault {
    /// The fetched word did not decode to a supported instruction.
    ///
    /// Covers unrecognized major opcodes as well as unrecognized
    /// function-select combinations within a known opcode.
    #[error("unknown instruction {word:#010x} at pc {pc:#010x}")]
    UnknownInstruction {
        /// The raw 32-bit encoding that failed to decode.
        word: u32,
        /// Address the word was fetched from.
        pc: u32,
    },

    /// A bare trap was executed with an unsupported service selector in a7.
    #[error("unhandled ecall service {service} at pc {pc:#010x}")]
    UnsupportedSyscall {
        /// Value of the service-select register.
        service: u32,
        /// Address of the trap instruction.
        pc: u32,
    },

    /// A system-class encoding other than the bare trap instruction.
    ///
    /// CSR accesses, EBREAK, and the privileged returns are outside the
    /// simulated subset and halt the run the same way an unknown opcode does.
    #[error("unhandled system instruction {word:#010x} at pc {pc:#010x}")]
    UnsupportedSystem {
        /// The raw 32-bit encoding.
        word: u32,
        /// Address the word was fetched from.
        pc: u32,
    },
}
