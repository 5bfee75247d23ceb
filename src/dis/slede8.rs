//! Facilities for disassembling SLEDE8 machine code.
//!
//! Every SLEDE8 instruction is a two-byte word `(b1, b2)`.  The low nibble
//! of `b1` selects the opcode class; the remaining twelve bits hold the
//! operands.

use crate::addr::Addr;
use crate::label::{LabelKind, LabelTable};
use std::fmt;
use thiserror::Error;

//===========================================================================//

/// One of the sixteen general-purpose SLEDE8 registers.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Register(u8);

impl Register {
    /// Returns the register named by the low four bits of `nibble`.
    pub fn from_nibble(nibble: u8) -> Register {
        Register(nibble & 0x0f)
    }

    /// Returns the register with the given index, or `None` if the index is
    /// greater than 15.
    pub fn from_index(index: u8) -> Option<Register> {
        if index <= 15 { Some(Register(index)) } else { None }
    }

    /// Returns the register's index, from 0 to 15.
    pub fn index(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "r{}", self.0)
    }
}

//===========================================================================//

/// A two-register arithmetic or logical operation (opcode class 0x5).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AluOp {
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise XOR.
    Xor,
    /// Shift left.
    ShiftLeft,
    /// Shift right.
    ShiftRight,
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
}

impl AluOp {
    const ALL: [AluOp; 7] = [
        AluOp::And,
        AluOp::Or,
        AluOp::Xor,
        AluOp::ShiftLeft,
        AluOp::ShiftRight,
        AluOp::Add,
        AluOp::Sub,
    ];

    /// Returns the operation with the given index, or `None` if the index is
    /// out of range.
    pub fn from_index(index: u8) -> Option<AluOp> {
        AluOp::ALL.get(usize::from(index)).copied()
    }

    /// Returns the assembler mnemonic for this operation.
    pub fn mnemonic(self) -> &'static str {
        match self {
            AluOp::And => "OG",
            AluOp::Or => "ELLER",
            AluOp::Xor => "XELLER",
            AluOp::ShiftLeft => "VSKIFT",
            AluOp::ShiftRight => "HSKIFT",
            AluOp::Add => "PLUSS",
            AluOp::Sub => "MINUS",
        }
    }
}

//===========================================================================//

/// A two-register comparison (opcode class 0x7).  Comparisons set the flag
/// that `BHOPP` later tests.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CmpOp {
    /// Equal.
    Eq,
    /// Not equal.
    Neq,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
}

impl CmpOp {
    const ALL: [CmpOp; 6] =
        [CmpOp::Eq, CmpOp::Neq, CmpOp::Lt, CmpOp::Lte, CmpOp::Gt, CmpOp::Gte];

    /// Returns the comparison with the given index, or `None` if the index is
    /// out of range.
    pub fn from_index(index: u8) -> Option<CmpOp> {
        CmpOp::ALL.get(usize::from(index)).copied()
    }

    /// Returns the assembler mnemonic for this comparison.
    pub fn mnemonic(self) -> &'static str {
        match self {
            CmpOp::Eq => "LIK",
            CmpOp::Neq => "ULIK",
            CmpOp::Lt => "ME",
            CmpOp::Lte => "MEL",
            CmpOp::Gt => "SE",
            CmpOp::Gte => "SEL",
        }
    }
}

//===========================================================================//

/// A decoded SLEDE8 instruction.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Instruction {
    /// Halt the program (`STOPP`).
    Stop,
    /// Load an immediate byte into a register (`SETT reg, imm`).
    SetImm(Register, u8),
    /// Copy one register into another (`SETT reg, reg`).
    SetReg(Register, Register),
    /// Load a data pointer (`FINN addr`).
    Find(Addr),
    /// Store a register through the data pointer (`LAGR reg`).
    Store(Register),
    /// Load a register through the data pointer (`LAST reg`).
    Load(Register),
    /// Arithmetic or logical operation on two registers.
    Alu(AluOp, Register, Register),
    /// Write a register to the output (`SKRIV reg`).
    Output(Register),
    /// Read a register from the input (`LES reg`).
    Input(Register),
    /// Compare two registers.
    Compare(CmpOp, Register, Register),
    /// Unconditional jump (`HOPP addr`).
    Jump(Addr),
    /// Jump if the last comparison held (`BHOPP addr`).
    JumpIf(Addr),
    /// Call a subroutine (`TUR addr`).
    Call(Addr),
    /// Return from a subroutine (`RETUR`).
    Return,
    /// No-op (`NOPE`).
    Nop,
}

/// A reason an instruction word could not be decoded.  The `Display` text of
/// each variant is the comment line that stands in for the instruction in a
/// listing.
#[derive(Clone, Copy, Debug, Eq, Error, Hash, PartialEq)]
pub enum DecodeIssue {
    /// The opcode class is unassigned, or an operand failed validation.
    #[error("; Unknown operation {0:#x} {1:#x}")]
    Unknown(u8, u8),
    /// The image ends after the first byte of the word.
    #[error("; Truncated operation {0:#x}")]
    Truncated(u8),
}

impl Instruction {
    /// Decodes a single instruction word.  `image_len` is the length of the
    /// program image, which bounds the address operands.
    pub fn decode(
        b1: u8,
        b2: u8,
        image_len: usize,
    ) -> Result<Instruction, DecodeIssue> {
        let hi = b1 >> 4;
        let addr = Addr::from_word(b1, b2);
        let in_bounds = addr.is_within(image_len);
        let reg1 = Register::from_nibble(b2);
        let reg2 = Register::from_nibble(b2 >> 4);
        let instruction = match b1 & 0x0f {
            0x0 => Some(Instruction::Stop),
            0x1 => Some(Instruction::SetImm(Register::from_nibble(hi), b2)),
            0x2 => {
                Some(Instruction::SetReg(Register::from_nibble(hi), reg1))
            }
            0x3 if in_bounds => Some(Instruction::Find(addr)),
            0x4 if hi != 0 => Some(Instruction::Store(reg1)),
            0x4 => Some(Instruction::Load(reg1)),
            0x5 => AluOp::from_index(hi)
                .map(|op| Instruction::Alu(op, reg1, reg2)),
            0x6 => Register::from_index(b2).map(|reg| {
                if hi != 0 {
                    Instruction::Output(reg)
                } else {
                    Instruction::Input(reg)
                }
            }),
            0x7 => CmpOp::from_index(hi)
                .map(|op| Instruction::Compare(op, reg1, reg2)),
            0x8 if in_bounds => Some(Instruction::Jump(addr)),
            0x9 if in_bounds => Some(Instruction::JumpIf(addr)),
            0xa if in_bounds => Some(Instruction::Call(addr)),
            0xb => Some(Instruction::Return),
            0xc => Some(Instruction::Nop),
            _ => None,
        };
        instruction.ok_or(DecodeIssue::Unknown(b1, b2))
    }

    /// Decodes the instruction word starting at offset `pc` of `image`.  If
    /// `pc` is the last offset of the image, the word is truncated.
    ///
    /// Panics if `pc` is not a valid offset into `image`.
    pub fn decode_at(
        image: &[u8],
        pc: usize,
    ) -> Result<Instruction, DecodeIssue> {
        let b1 = image[pc];
        match image.get(pc + 1) {
            Some(&b2) => Instruction::decode(b1, b2, image.len()),
            None => Err(DecodeIssue::Truncated(b1)),
        }
    }

    /// Returns the address operand of this instruction, if it has one.
    pub fn target(self) -> Option<Addr> {
        match self {
            Instruction::Find(addr)
            | Instruction::Jump(addr)
            | Instruction::JumpIf(addr)
            | Instruction::Call(addr) => Some(addr),
            _ => None,
        }
    }

    /// Formats a disassembled SLEDE8 instruction as assembler text.  Address
    /// operands are printed as their label from `labels`, if any.
    pub fn format(self, labels: &LabelTable) -> String {
        match self {
            Instruction::Stop => "STOPP".to_string(),
            Instruction::SetImm(reg, imm) => format!("SETT {reg}, {imm:#x}"),
            Instruction::SetReg(dst, src) => format!("SETT {dst}, {src}"),
            Instruction::Find(addr) => {
                format!("FINN {}", format_address(labels, addr))
            }
            Instruction::Store(reg) => format!("LAGR {reg}"),
            Instruction::Load(reg) => format!("LAST {reg}"),
            Instruction::Alu(op, reg1, reg2) => {
                format!("{} {reg1}, {reg2}", op.mnemonic())
            }
            Instruction::Output(reg) => format!("SKRIV {reg}"),
            Instruction::Input(reg) => format!("LES {reg}"),
            Instruction::Compare(op, reg1, reg2) => {
                format!("{} {reg1}, {reg2}", op.mnemonic())
            }
            Instruction::Jump(addr) => {
                format!("HOPP {}", format_address(labels, addr))
            }
            Instruction::JumpIf(addr) => {
                format!("BHOPP {}", format_address(labels, addr))
            }
            Instruction::Call(addr) => {
                format!("TUR {}", format_address(labels, addr))
            }
            Instruction::Return => "RETUR".to_string(),
            Instruction::Nop => "NOPE".to_string(),
        }
    }
}

fn format_address(labels: &LabelTable, addr: Addr) -> String {
    match labels.label_at(addr) {
        None => format!("{addr:#05x}"),
        Some(label) => label.to_string(),
    }
}

//===========================================================================//

/// Returns the kind of label that the word starting with `b1` would assign
/// to its address operand, or `None` if the opcode class takes no address.
pub fn reference_kind(b1: u8) -> Option<LabelKind> {
    match b1 & 0x0f {
        0x3 => Some(LabelKind::DataBlock),
        0x8..=0xa => Some(LabelKind::Branch),
        _ => None,
    }
}

/// Disassembles one instruction word into a line of assembler text.  Words
/// that fail to decode produce a comment line naming both bytes.
pub fn disassemble_word(
    b1: u8,
    b2: u8,
    image_len: usize,
    labels: &LabelTable,
) -> String {
    match Instruction::decode(b1, b2, image_len) {
        Ok(instruction) => instruction.format(labels),
        Err(issue) => issue.to_string(),
    }
}

//===========================================================================//


//===========================================================================//
