//! Instruction Disassembler for RV32IM.
//!
//! Converts a decoded instruction into a human-readable mnemonic string for
//! the trace log and test diagnostics. Branch and jump targets render as
//! absolute addresses (the instruction's own address plus its offset), and
//! `auipc` renders its result address rather than the raw immediate. A
//! symbol table, when supplied, annotates known target addresses.
//!
//! Disassembly is purely cosmetic; it never influences execution.
//!
//! # Usage
//!
//! ```
//! use rv32sim_core::isa::{decode::decode, disasm::disassemble};
//! let text = disassemble(0x1000, &decode(0x00A00513), None); // ADDI x10, x0, 10
//! assert_eq!(text, "addi a0, zero, 10");
//! ```

use crate::common::symbols::SymbolTable;
use crate::isa::abi::reg_name;
use crate::isa::instruction::{AluOp, BranchCond, Instruction, LoadWidth, StoreWidth};

/// Disassembles one decoded instruction.
///
/// # Arguments
///
/// * `addr` - Address the instruction was fetched from; used to render
///   pc-relative targets as absolute addresses.
/// * `inst` - The decoded instruction.
/// * `symbols` - Optional table for annotating target addresses.
pub fn disassemble(addr: u32, inst: &Instruction, symbols: Option<&SymbolTable>) -> String {
    match *inst {
        Instruction::Register { op, rd, rs1, rs2 } => {
            format!(
                "{} {}, {}, {}",
                alu_mnemonic(op, false),
                reg_name(rd),
                reg_name(rs1),
                reg_name(rs2)
            )
        }

        Instruction::Immediate { op, rd, rs1, imm } => match op {
            AluOp::Sll | AluOp::Srl | AluOp::Sra => format!(
                "{} {}, {}, {}",
                alu_mnemonic(op, true),
                reg_name(rd),
                reg_name(rs1),
                imm & 0x1F
            ),
            _ => format!(
                "{} {}, {}, {imm}",
                alu_mnemonic(op, true),
                reg_name(rd),
                reg_name(rs1)
            ),
        },

        Instruction::Load {
            width,
            rd,
            rs1,
            offset,
        } => {
            let mn = match width {
                LoadWidth::Byte => "lb",
                LoadWidth::Half => "lh",
                LoadWidth::Word => "lw",
                LoadWidth::ByteUnsigned => "lbu",
                LoadWidth::HalfUnsigned => "lhu",
            };
            format!("{mn} {}, {offset}({})", reg_name(rd), reg_name(rs1))
        }

        Instruction::Store {
            width,
            rs1,
            rs2,
            offset,
        } => {
            let mn = match width {
                StoreWidth::Byte => "sb",
                StoreWidth::Half => "sh",
                StoreWidth::Word => "sw",
            };
            format!("{mn} {}, {offset}({})", reg_name(rs2), reg_name(rs1))
        }

        Instruction::Branch {
            cond,
            rs1,
            rs2,
            offset,
        } => {
            let mn = match cond {
                BranchCond::Eq => "beq",
                BranchCond::Ne => "bne",
                BranchCond::Lt => "blt",
                BranchCond::Ge => "bge",
                BranchCond::Ltu => "bltu",
                BranchCond::Geu => "bgeu",
            };
            let target = addr.wrapping_add(offset as u32);
            format!(
                "{mn} {}, {}, {:#x}{}",
                reg_name(rs1),
                reg_name(rs2),
                target,
                annotate(target, symbols)
            )
        }

        Instruction::Jal { rd, offset } => {
            let target = addr.wrapping_add(offset as u32);
            format!(
                "jal {}, {:#x}{}",
                reg_name(rd),
                target,
                annotate(target, symbols)
            )
        }

        Instruction::Jalr { rd, rs1, offset } => {
            format!("jalr {}, {offset}({})", reg_name(rd), reg_name(rs1))
        }

        Instruction::Lui { rd, imm } => {
            format!("lui {}, {:#x}", reg_name(rd), ((imm as u32) >> 12) & 0xFFFFF)
        }

        // auipc renders the address it produces, not the raw immediate.
        Instruction::Auipc { rd, imm } => {
            format!("auipc {}, {:#x}", reg_name(rd), addr.wrapping_add(imm as u32))
        }

        Instruction::Ecall => "ecall".to_string(),
        Instruction::System { word } => format!("system?? ({word:#010x})"),
        Instruction::Unknown { word } => format!("unknown ({word:#010x})"),
    }
}

/// Returns the mnemonic for an ALU operation, with the immediate-form suffix.
fn alu_mnemonic(op: AluOp, immediate: bool) -> &'static str {
    match (op, immediate) {
        (AluOp::Add, false) => "add",
        (AluOp::Add, true) => "addi",
        (AluOp::Sub, _) => "sub",
        (AluOp::Sll, false) => "sll",
        (AluOp::Sll, true) => "slli",
        (AluOp::Slt, false) => "slt",
        (AluOp::Slt, true) => "slti",
        (AluOp::Sltu, false) => "sltu",
        (AluOp::Sltu, true) => "sltiu",
        (AluOp::Xor, false) => "xor",
        (AluOp::Xor, true) => "xori",
        (AluOp::Srl, false) => "srl",
        (AluOp::Srl, true) => "srli",
        (AluOp::Sra, false) => "sra",
        (AluOp::Sra, true) => "srai",
        (AluOp::Or, false) => "or",
        (AluOp::Or, true) => "ori",
        (AluOp::And, false) => "and",
        (AluOp::And, true) => "andi",
        (AluOp::Mul, _) => "mul",
        (AluOp::Mulh, _) => "mulh",
        (AluOp::Mulhsu, _) => "mulhsu",
        (AluOp::Mulhu, _) => "mulhu",
        (AluOp::Div, _) => "div",
        (AluOp::Divu, _) => "divu",
        (AluOp::Rem, _) => "rem",
        (AluOp::Remu, _) => "remu",
    }
}

/// Formats a ` <name>` annotation when the target address has a symbol.
fn annotate(target: u32, symbols: Option<&SymbolTable>) -> String {
    symbols
        .and_then(|s| s.lookup(target))
        .map(|name| format!(" <{name}>"))
        .unwrap_or_default()
}
