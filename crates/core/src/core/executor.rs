//! The fetch-decode-execute loop.
//!
//! This module implements the executor: a single state machine with one
//! state per retired instruction. Each step fetches a word at the program
//! counter, decodes it through the shared decoder, dispatches on the decoded
//! variant, forces x0 back to zero, commits the next program counter, and
//! counts the retirement. Conditional branches additionally drive the
//! predictor bank with their resolved outcome.
//!
//! The executor exclusively owns all architectural state for the duration of
//! one run; independent runs can never interfere through shared state.

use std::fmt;
use std::io::{Read, Write};

use crate::common::error::Fault;
use crate::common::symbols::SymbolTable;
use crate::config::SimConfig;
use crate::core::bru::PredictorBank;
use crate::core::gpr::Gpr;
use crate::core::syscall::{SyscallEffect, SyscallHandler};
use crate::isa::abi;
use crate::isa::decode::decode;
use crate::isa::disasm::disassemble;
use crate::isa::instruction::{AluOp, BranchCond, Instruction, LoadWidth, StoreWidth, SHAMT_MASK};
use crate::memory::Memory;
use crate::stats::Stat;

/// Result of executing one instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The instruction retired; execution continues.
    Continue,
    /// The instruction retired and asked the loop to halt (exit service).
    Halt,
}

/// Side effects of one dispatch, threaded back to the step loop.
#[derive(Clone, Copy, Debug, Default)]
struct StepEffects {
    branch_taken: bool,
    halt: bool,
}

/// The executor: architectural state plus its collaborators for one run.
///
/// Drives the memory image it borrows, renders an optional per-instruction
/// trace into the log sink, and scores every conditional branch against the
/// predictor bank. After [`Executor::run`] returns, registers, program
/// counter, and any fault remain inspectable.
pub struct Executor<'a, M: Memory> {
    mem: &'a mut M,
    regs: Gpr,
    pc: u32,
    bank: PredictorBank,
    syscalls: SyscallHandler,
    log: Option<&'a mut dyn Write>,
    symbols: Option<&'a SymbolTable>,
    instructions_retired: u64,
    fault: Option<Fault>,
}

impl<M: Memory> fmt::Debug for Executor<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("pc", &self.pc)
            .field("instructions_retired", &self.instructions_retired)
            .field("fault", &self.fault)
            .finish_non_exhaustive()
    }
}

impl<'a, M: Memory> Executor<'a, M> {
    /// Creates an executor over the given memory image.
    ///
    /// # Arguments
    ///
    /// * `mem` - The memory image holding the program.
    /// * `start_addr` - Initial program counter.
    /// * `config` - Predictor sizing.
    pub fn new(mem: &'a mut M, start_addr: u32, config: &SimConfig) -> Self {
        Self {
            mem,
            regs: Gpr::new(),
            pc: start_addr,
            bank: PredictorBank::new(&config.predictor),
            syscalls: SyscallHandler::new(),
            log: None,
            symbols: None,
            instructions_retired: 0,
            fault: None,
        }
    }

    /// Attaches a log sink receiving one line per retired instruction.
    ///
    /// Without a sink no disassembly or formatting work is performed.
    pub fn with_log(mut self, log: &'a mut dyn Write) -> Self {
        self.log = Some(log);
        self
    }

    /// Attaches a symbol table used to annotate the trace log.
    pub fn with_symbols(mut self, symbols: &'a SymbolTable) -> Self {
        self.symbols = Some(symbols);
        self
    }

    /// Replaces the console endpoints used by the character services.
    pub fn with_console(mut self, input: Box<dyn Read>, output: Box<dyn Write>) -> Self {
        self.syscalls = SyscallHandler::with_io(input, output);
        self
    }

    /// Current program counter.
    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// Reads a general-purpose register.
    pub fn register(&self, idx: usize) -> u32 {
        self.regs.read(idx)
    }

    /// Writes a general-purpose register (x0 writes are ignored).
    ///
    /// Intended for seeding argument registers before a run.
    pub fn set_register(&mut self, idx: usize, val: u32) {
        self.regs.write(idx, val);
    }

    /// The fault that stopped the run, if it ended abnormally.
    pub fn fault(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }

    /// Number of instructions retired so far.
    pub fn instructions_retired(&self) -> u64 {
        self.instructions_retired
    }

    /// Runs until the program exits or a fault halts the loop.
    ///
    /// Faults are reported on the diagnostic channel, never returned; the
    /// statistics accumulated up to the halt are always well-formed.
    pub fn run(&mut self) -> Stat {
        tracing::debug!(start_pc = self.pc, "simulation started");
        loop {
            match self.step() {
                Ok(StepOutcome::Continue) => {}
                Ok(StepOutcome::Halt) => break,
                Err(fault) => {
                    tracing::error!("{fault}");
                    self.fault = Some(fault);
                    break;
                }
            }
        }
        self.snapshot()
    }

    /// Executes a single instruction.
    ///
    /// The trace line (when a log sink is attached) is written even for a
    /// faulting instruction, so the log always shows what was fetched last.
    ///
    /// # Errors
    ///
    /// Returns the [`Fault`] that prevented the instruction from retiring.
    pub fn step(&mut self) -> Result<StepOutcome, Fault> {
        let pc = self.pc;
        let word = self.mem.read_u32(pc);
        let inst = decode(word);

        let mut next_pc = pc.wrapping_add(4);
        let result = self.execute(&inst, pc, &mut next_pc);

        // x0 must remain zero no matter what the dispatch did.
        self.regs.write(abi::REG_ZERO, 0);

        if let Some(log) = self.log.as_deref_mut() {
            let text = disassemble(pc, &inst, self.symbols);
            let marker = match &result {
                Ok(effects) if effects.branch_taken => " {T}",
                _ => "",
            };
            let seq = self.instructions_retired + 1;
            let _ = writeln!(log, "{seq:6} => {pc:08x} : {word:08x}    {text}{marker}");
        }

        let effects = result?;
        self.pc = next_pc;
        self.instructions_retired += 1;

        if effects.halt {
            Ok(StepOutcome::Halt)
        } else {
            Ok(StepOutcome::Continue)
        }
    }

    /// Builds the statistics snapshot for the run so far.
    fn snapshot(&self) -> Stat {
        let mut stat = Stat {
            instructions_retired: self.instructions_retired,
            ..Stat::default()
        };
        self.bank.export(&mut stat);
        stat
    }

    /// Dispatches one decoded instruction.
    fn execute(
        &mut self,
        inst: &Instruction,
        pc: u32,
        next_pc: &mut u32,
    ) -> Result<StepEffects, Fault> {
        let mut effects = StepEffects::default();

        match *inst {
            Instruction::Register { op, rd, rs1, rs2 } => {
                let a = self.regs.read(rs1);
                let b = self.regs.read(rs2);
                self.regs.write(rd, alu(op, a, b));
            }

            Instruction::Immediate { op, rd, rs1, imm } => {
                let a = self.regs.read(rs1);
                self.regs.write(rd, alu(op, a, imm as u32));
            }

            Instruction::Load {
                width,
                rd,
                rs1,
                offset,
            } => {
                let addr = self.regs.read(rs1).wrapping_add(offset as u32);
                let value = match width {
                    LoadWidth::Byte => self.mem.read_u8(addr) as i8 as i32 as u32,
                    LoadWidth::Half => self.mem.read_u16(addr) as i16 as i32 as u32,
                    LoadWidth::Word => self.mem.read_u32(addr),
                    LoadWidth::ByteUnsigned => u32::from(self.mem.read_u8(addr)),
                    LoadWidth::HalfUnsigned => u32::from(self.mem.read_u16(addr)),
                };
                self.regs.write(rd, value);
            }

            Instruction::Store {
                width,
                rs1,
                rs2,
                offset,
            } => {
                let addr = self.regs.read(rs1).wrapping_add(offset as u32);
                let value = self.regs.read(rs2);
                match width {
                    StoreWidth::Byte => self.mem.write_u8(addr, value as u8),
                    StoreWidth::Half => self.mem.write_u16(addr, value as u16),
                    StoreWidth::Word => self.mem.write_u32(addr, value),
                }
            }

            Instruction::Branch {
                cond,
                rs1,
                rs2,
                offset,
            } => {
                let target = pc.wrapping_add(offset as u32);
                let taken = branch_taken(cond, self.regs.read(rs1), self.regs.read(rs2));

                // Every branch is scored by all four predictors, whether or
                // not it is taken; the architectural outcome always governs.
                self.bank.observe(pc, target, taken);

                if taken {
                    *next_pc = target;
                    effects.branch_taken = true;
                }
            }

            Instruction::Jal { rd, offset } => {
                self.regs.write(rd, pc.wrapping_add(4));
                *next_pc = pc.wrapping_add(offset as u32);
            }

            Instruction::Jalr { rd, rs1, offset } => {
                // rd may alias rs1; the target uses the pre-link value.
                let target = self.regs.read(rs1).wrapping_add(offset as u32) & !1;
                self.regs.write(rd, pc.wrapping_add(4));
                *next_pc = target;
            }

            Instruction::Lui { rd, imm } => {
                self.regs.write(rd, imm as u32);
            }

            Instruction::Auipc { rd, imm } => {
                self.regs.write(rd, pc.wrapping_add(imm as u32));
            }

            Instruction::Ecall => {
                let service = self.regs.read(abi::REG_A7);
                let arg = self.regs.read(abi::REG_A0);
                match self.syscalls.handle(service, arg, pc)? {
                    SyscallEffect::Return(value) => self.regs.write(abi::REG_A0, value),
                    SyscallEffect::None => {}
                    SyscallEffect::Halt => effects.halt = true,
                }
            }

            Instruction::System { word } => {
                return Err(Fault::UnsupportedSystem { word, pc });
            }

            Instruction::Unknown { word } => {
                return Err(Fault::UnknownInstruction { word, pc });
            }
        }

        Ok(effects)
    }
}

/// Evaluates a branch predicate between two register values.
fn branch_taken(cond: BranchCond, a: u32, b: u32) -> bool {
    match cond {
        BranchCond::Eq => a == b,
        BranchCond::Ne => a != b,
        BranchCond::Lt => (a as i32) < (b as i32),
        BranchCond::Ge => (a as i32) >= (b as i32),
        BranchCond::Ltu => a < b,
        BranchCond::Geu => a >= b,
    }
}

/// Applies an integer operation to two 32-bit operands.
///
/// Shift amounts use only the low five bits of the second operand, for the
/// register and immediate forms alike.
fn alu(op: AluOp, a: u32, b: u32) -> u32 {
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Sll => a << (b & SHAMT_MASK),
        AluOp::Slt => ((a as i32) < (b as i32)) as u32,
        AluOp::Sltu => (a < b) as u32,
        AluOp::Xor => a ^ b,
        AluOp::Srl => a >> (b & SHAMT_MASK),
        AluOp::Sra => ((a as i32) >> (b & SHAMT_MASK)) as u32,
        AluOp::Or => a | b,
        AluOp::And => a & b,
        AluOp::Mul => (a as i32).wrapping_mul(b as i32) as u32,
        AluOp::Mulh => ((i64::from(a as i32) * i64::from(b as i32)) >> 32) as u32,
        // Signed x unsigned: the magnitude is below 2^63, so a 64-bit
        // intermediate cannot overflow.
        AluOp::Mulhsu => ((i64::from(a as i32) * i64::from(b)) >> 32) as u32,
        AluOp::Mulhu => ((u64::from(a) * u64::from(b)) >> 32) as u32,
        AluOp::Div => div_signed(a as i32, b as i32) as u32,
        AluOp::Divu => div_unsigned(a, b),
        AluOp::Rem => rem_signed(a as i32, b as i32) as u32,
        AluOp::Remu => rem_unsigned(a, b),
    }
}

/// Signed division with the RISC-V non-trapping edge cases.
fn div_signed(a: i32, b: i32) -> i32 {
    if b == 0 {
        return -1;
    }
    if a == i32::MIN && b == -1 {
        // Overflow case: quotient is the dividend unchanged.
        return a;
    }
    a / b
}

/// Unsigned division; division by zero yields all ones.
fn div_unsigned(a: u32, b: u32) -> u32 {
    if b == 0 { u32::MAX } else { a / b }
}

/// Signed remainder with the RISC-V non-trapping edge cases.
fn rem_signed(a: i32, b: i32) -> i32 {
    if b == 0 {
        return a;
    }
    if a == i32::MIN && b == -1 {
        // Overflow case: remainder is zero.
        return 0;
    }
    a % b
}

/// Unsigned remainder; remainder by zero yields the dividend unchanged.
fn rem_unsigned(a: u32, b: u32) -> u32 {
    if b == 0 { a } else { a % b }
}
