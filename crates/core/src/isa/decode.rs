//! RISC-V Instruction Decoder.
//!
//! This module decodes 32-bit RV32IM encodings into the tagged
//! [`Instruction`] form. It extracts opcodes, register indices, and function
//! codes, reconstructs and sign-extends immediate values for all instruction
//! formats (R, I, S, B, U, J), and resolves the operation variant once so
//! execution never re-inspects function codes.
//!
//! The decoder is the single source of truth for field extraction: both the
//! executor and the disassembler consume its output.

use crate::isa::instruction::{
    AluOp, BranchCond, Instruction, InstructionBits, LoadWidth, StoreWidth,
};
use crate::isa::privileged::opcodes as sys_op;
use crate::isa::rv32i::{funct3, funct7, opcodes};
use crate::isa::rv32m::{funct3 as m_funct3, opcodes as m_opcodes};

/// Total width of a RISC-V instruction in bits.
const INSTRUCTION_WIDTH: u32 = 32;

/// Total number of bits in an S-type immediate.
const S_IMM_BITS: u32 = 12;

/// Total number of bits in a B-type immediate (bit 0 implicitly zero).
const B_IMM_BITS: u32 = 13;

/// Total number of bits in a J-type immediate (bit 0 implicitly zero).
const J_IMM_BITS: u32 = 21;

/// Decodes a 32-bit instruction word.
///
/// Returns [`Instruction::Unknown`] for unrecognized major opcodes and for
/// unrecognized function-code combinations within a known opcode; the caller
/// decides whether that is fatal.
pub fn decode(word: u32) -> Instruction {
    match word.opcode() {
        opcodes::OP_REG => decode_op_reg(word),
        opcodes::OP_IMM => decode_op_imm(word),
        opcodes::OP_LOAD => decode_load(word),
        opcodes::OP_STORE => decode_store(word),
        opcodes::OP_BRANCH => decode_branch(word),
        opcodes::OP_JAL => Instruction::Jal {
            rd: word.rd(),
            offset: j_type_imm(word),
        },
        opcodes::OP_JALR if word.funct3() == 0 => Instruction::Jalr {
            rd: word.rd(),
            rs1: word.rs1(),
            offset: i_type_imm(word),
        },
        opcodes::OP_LUI => Instruction::Lui {
            rd: word.rd(),
            imm: u_type_imm(word),
        },
        opcodes::OP_AUIPC => Instruction::Auipc {
            rd: word.rd(),
            imm: u_type_imm(word),
        },
        sys_op::OP_SYSTEM => {
            if word == sys_op::ECALL {
                Instruction::Ecall
            } else {
                Instruction::System { word }
            }
        }
        _ => Instruction::Unknown { word },
    }
}

/// Decodes OP_REG (register-register, base set and M extension).
fn decode_op_reg(word: u32) -> Instruction {
    let (rd, rs1, rs2) = (word.rd(), word.rs1(), word.rs2());

    let op = if word.funct7() == m_opcodes::M_EXTENSION {
        match word.funct3() {
            m_funct3::MUL => AluOp::Mul,
            m_funct3::MULH => AluOp::Mulh,
            m_funct3::MULHSU => AluOp::Mulhsu,
            m_funct3::MULHU => AluOp::Mulhu,
            m_funct3::DIV => AluOp::Div,
            m_funct3::DIVU => AluOp::Divu,
            m_funct3::REM => AluOp::Rem,
            m_funct3::REMU => AluOp::Remu,
            _ => return Instruction::Unknown { word },
        }
    } else {
        match (word.funct3(), word.funct7()) {
            (funct3::ADD_SUB, funct7::DEFAULT) => AluOp::Add,
            (funct3::ADD_SUB, funct7::SUB) => AluOp::Sub,
            (funct3::SLL, funct7::DEFAULT) => AluOp::Sll,
            (funct3::SLT, funct7::DEFAULT) => AluOp::Slt,
            (funct3::SLTU, funct7::DEFAULT) => AluOp::Sltu,
            (funct3::XOR, funct7::DEFAULT) => AluOp::Xor,
            (funct3::SRL_SRA, funct7::DEFAULT) => AluOp::Srl,
            (funct3::SRL_SRA, funct7::SRA) => AluOp::Sra,
            (funct3::OR, funct7::DEFAULT) => AluOp::Or,
            (funct3::AND, funct7::DEFAULT) => AluOp::And,
            _ => return Instruction::Unknown { word },
        }
    };

    Instruction::Register { op, rd, rs1, rs2 }
}

/// Decodes OP_IMM (immediate arithmetic/logic).
///
/// The shift forms carry their amount in the low bits of the immediate
/// field; the arithmetic/logical right shift split lives in funct7.
fn decode_op_imm(word: u32) -> Instruction {
    let (rd, rs1) = (word.rd(), word.rs1());

    let (op, imm) = match word.funct3() {
        funct3::ADD_SUB => (AluOp::Add, i_type_imm(word)),
        funct3::SLT => (AluOp::Slt, i_type_imm(word)),
        funct3::SLTU => (AluOp::Sltu, i_type_imm(word)),
        funct3::XOR => (AluOp::Xor, i_type_imm(word)),
        funct3::OR => (AluOp::Or, i_type_imm(word)),
        funct3::AND => (AluOp::And, i_type_imm(word)),
        funct3::SLL if word.funct7() == funct7::DEFAULT => (AluOp::Sll, word.shamt() as i32),
        funct3::SRL_SRA if word.funct7() == funct7::DEFAULT => (AluOp::Srl, word.shamt() as i32),
        funct3::SRL_SRA if word.funct7() == funct7::SRA => (AluOp::Sra, word.shamt() as i32),
        _ => return Instruction::Unknown { word },
    };

    Instruction::Immediate { op, rd, rs1, imm }
}

/// Decodes OP_LOAD.
fn decode_load(word: u32) -> Instruction {
    let width = match word.funct3() {
        funct3::LB => LoadWidth::Byte,
        funct3::LH => LoadWidth::Half,
        funct3::LW => LoadWidth::Word,
        funct3::LBU => LoadWidth::ByteUnsigned,
        funct3::LHU => LoadWidth::HalfUnsigned,
        _ => return Instruction::Unknown { word },
    };

    Instruction::Load {
        width,
        rd: word.rd(),
        rs1: word.rs1(),
        offset: i_type_imm(word),
    }
}

/// Decodes OP_STORE.
fn decode_store(word: u32) -> Instruction {
    let width = match word.funct3() {
        funct3::SB => StoreWidth::Byte,
        funct3::SH => StoreWidth::Half,
        funct3::SW => StoreWidth::Word,
        _ => return Instruction::Unknown { word },
    };

    Instruction::Store {
        width,
        rs1: word.rs1(),
        rs2: word.rs2(),
        offset: s_type_imm(word),
    }
}

/// Decodes OP_BRANCH.
fn decode_branch(word: u32) -> Instruction {
    let cond = match word.funct3() {
        funct3::BEQ => BranchCond::Eq,
        funct3::BNE => BranchCond::Ne,
        funct3::BLT => BranchCond::Lt,
        funct3::BGE => BranchCond::Ge,
        funct3::BLTU => BranchCond::Ltu,
        funct3::BGEU => BranchCond::Geu,
        _ => return Instruction::Unknown { word },
    };

    Instruction::Branch {
        cond,
        rs1: word.rs1(),
        rs2: word.rs2(),
        offset: b_type_imm(word),
    }
}

/// Decodes the immediate value of an I-type instruction.
///
/// I-type format: `imm[11:0] | rs1 | funct3 | rd | opcode`
/// Used for loads, JALR, and immediate arithmetic.
pub(crate) fn i_type_imm(word: u32) -> i32 {
    (word as i32) >> 20
}

/// Decodes the immediate value of an S-type instruction.
///
/// S-type format: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`
pub(crate) fn s_type_imm(word: u32) -> i32 {
    let low = (word >> 7) & 0x1F;
    let high = (word >> 25) & 0x7F;
    sign_extend((high << 5) | low, S_IMM_BITS)
}

/// Decodes the immediate value of a B-type instruction.
///
/// B-type format: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`
/// The reconstructed value is always even.
pub(crate) fn b_type_imm(word: u32) -> i32 {
    let bit_11 = (word >> 7) & 1;
    let bits_4_1 = (word >> 8) & 0xF;
    let bits_10_5 = (word >> 25) & 0x3F;
    let bit_12 = (word >> 31) & 1;

    let combined = (bit_12 << 12) | (bit_11 << 11) | (bits_10_5 << 5) | (bits_4_1 << 1);
    sign_extend(combined, B_IMM_BITS)
}

/// Decodes the immediate value of a U-type instruction.
///
/// U-type format: `imm[31:12] | rd | opcode`
/// The value is already in its final position; the low 12 bits are zero.
pub(crate) fn u_type_imm(word: u32) -> i32 {
    (word & 0xFFFF_F000) as i32
}

/// Decodes the immediate value of a J-type instruction.
///
/// J-type format: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`
/// The reconstructed value is always even.
pub(crate) fn j_type_imm(word: u32) -> i32 {
    let bits_19_12 = (word >> 12) & 0xFF;
    let bit_11 = (word >> 20) & 1;
    let bits_10_1 = (word >> 21) & 0x3FF;
    let bit_20 = (word >> 31) & 1;

    let combined = (bit_20 << 20) | (bits_19_12 << 12) | (bit_11 << 11) | (bits_10_1 << 1);
    sign_extend(combined, J_IMM_BITS)
}

/// Sign extends a value of `bits` width to a 32-bit signed integer.
fn sign_extend(val: u32, bits: u32) -> i32 {
    let shift = INSTRUCTION_WIDTH - bits;
    ((val << shift) as i32) >> shift
}
