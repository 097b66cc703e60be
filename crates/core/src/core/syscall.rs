//! Trap service dispatch.
//!
//! The bare trap instruction invokes one of a small table of services
//! selected by register a7: character input, character output, and program
//! exit. Console endpoints are injectable so tests can drive the character
//! services without touching the process's stdin/stdout.

use std::fmt;
use std::io::{self, Read, Write};

use crate::common::error::Fault;

/// Read one character; result (byte value, or all-ones on end-of-input) in a0.
pub const SERVICE_READ_CHAR: u32 = 1;
/// Write the low 8 bits of a0 to output.
pub const SERVICE_WRITE_CHAR: u32 = 2;
/// Halt the run normally.
pub const SERVICE_EXIT: u32 = 3;
/// Halt the run normally (Linux ABI exit number).
pub const SERVICE_EXIT_LINUX: u32 = 93;

/// Value returned by the read-character service at end-of-input.
pub const READ_EOF: u32 = u32::MAX;

/// Effect of a handled trap service on the executor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyscallEffect {
    /// Write the value to the return-value register (a0).
    Return(u32),
    /// No architectural effect.
    None,
    /// Halt the execution loop normally.
    Halt,
}

/// The trap service table and its console endpoints.
pub struct SyscallHandler {
    input: Box<dyn Read>,
    output: Box<dyn Write>,
}

impl fmt::Debug for SyscallHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyscallHandler").finish_non_exhaustive()
    }
}

impl Default for SyscallHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl SyscallHandler {
    /// Creates a handler wired to the process's stdin and stdout.
    pub fn new() -> Self {
        Self {
            input: Box::new(io::stdin()),
            output: Box::new(io::stdout()),
        }
    }

    /// Creates a handler with the given console endpoints.
    pub fn with_io(input: Box<dyn Read>, output: Box<dyn Write>) -> Self {
        Self { input, output }
    }

    /// Dispatches one trap service.
    ///
    /// # Arguments
    ///
    /// * `service` - Value of the service-select register (a7).
    /// * `arg` - Value of the argument register (a0).
    /// * `pc` - Address of the trap instruction, for fault reporting.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::UnsupportedSyscall`] for any service outside the
    /// table; the executor halts on it.
    pub fn handle(&mut self, service: u32, arg: u32, pc: u32) -> Result<SyscallEffect, Fault> {
        match service {
            SERVICE_READ_CHAR => Ok(SyscallEffect::Return(self.read_char())),
            SERVICE_WRITE_CHAR => {
                self.write_char(arg as u8);
                Ok(SyscallEffect::None)
            }
            SERVICE_EXIT | SERVICE_EXIT_LINUX => Ok(SyscallEffect::Halt),
            _ => Err(Fault::UnsupportedSyscall { service, pc }),
        }
    }

    /// Reads one byte from the console, blocking until input is available.
    ///
    /// Yields [`READ_EOF`] when input is exhausted or unreadable.
    fn read_char(&mut self) -> u32 {
        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return READ_EOF,
                Ok(_) => return u32::from(buf[0]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(_) => return READ_EOF,
            }
        }
    }

    /// Writes one byte to the console and flushes it through.
    fn write_char(&mut self, byte: u8) {
        if self.output.write_all(&[byte]).is_ok() {
            let _ = self.output.flush();
        }
    }
}
