//! RISC-V General-Purpose Register File.
//!
//! This module implements the General-Purpose Register (GPR) file. It
//! performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`).
//! 2. **Invariant Enforcement:** Ensures that register `x0` reads as zero.
//! 3. **Debugging:** Provides a utility for dumping the register state.

/// General-Purpose Register file.
///
/// Contains the 32 architectural integer registers. Register `x0` is
/// hardwired to zero: writes to it are ignored and reads always return 0.
#[derive(Clone, Debug, Default)]
pub struct Gpr {
    regs: [u32; 32],
}

impl Gpr {
    /// Creates a register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self { regs: [0; 32] }
    }

    /// Reads a register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Register `x0` always returns 0.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a value to a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Writes to `x0` are ignored.
    /// * `val` - The 32-bit value to write.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Dumps the contents of all registers to stderr.
    pub fn dump(&self) {
        for i in (0..32).step_by(4) {
            eprintln!(
                "x{:<2}={:#010x} x{:<2}={:#010x} x{:<2}={:#010x} x{:<2}={:#010x}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1],
                i + 2,
                self.regs[i + 2],
                i + 3,
                self.regs[i + 3]
            );
        }
    }
}
