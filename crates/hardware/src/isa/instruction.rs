//! Instruction representation and raw field extraction.
//!
//! An instruction is a closed enum over the four operand shapes. Each variant
//! embeds the shared [`Header`] (opcode plus register/condition field) and
//! only the payload fields its shape needs. The immediate and indexed flags of
//! the encoded word are implied by the variant.

use std::fmt;

use super::condition::Condition;
use super::disasm::disassemble;
use super::opcode::{OPCODE_MASK, Opcode};
use crate::common::error::InstructionError;
use crate::common::reg::Reg;

/// Bit position of the immediate flag.
pub const IMMEDIATE_BIT: u32 = 6;
/// Bit position of the indexed flag.
pub const INDEXED_BIT: u32 = 7;
/// Shift of the 4-bit register/condition field.
pub const REG_COND_SHIFT: u32 = 8;
/// Mask of the register/condition field after shifting.
pub const REG_COND_MASK: u32 = 0xF;
/// Shift of the 20-bit payload.
pub const PAYLOAD_SHIFT: u32 = 12;
/// Mask of the payload after shifting.
pub const PAYLOAD_MASK: u32 = 0xF_FFFF;
/// Shift of the base register in an indexed payload.
pub const INDEX_BASE_SHIFT: u32 = 12;
/// Shift of the signed 16-bit offset in an indexed payload.
pub const INDEX_OFFSET_SHIFT: u32 = 16;

/// Smallest immediate literal that fits the signed 20-bit payload.
pub const IMMEDIATE_MIN: i32 = -(1 << 19);
/// Largest immediate literal that fits the signed 20-bit payload.
pub const IMMEDIATE_MAX: i32 = (1 << 19) - 1;
/// Largest absolute address that fits the unsigned 20-bit payload.
pub const ADDRESS_MAX: u32 = PAYLOAD_MASK;

/// Raw field extraction from an encoded instruction word.
pub trait InstructionBits {
    /// Extracts the 6-bit opcode field (bits 0-5).
    fn opcode(&self) -> u32;

    /// Extracts the immediate flag (bit 6).
    fn immediate(&self) -> bool;

    /// Extracts the indexed flag (bit 7).
    fn indexed(&self) -> bool;

    /// Extracts the 4-bit register/condition field (bits 8-11).
    fn reg_cond(&self) -> u8;

    /// Extracts the payload as a sign-extended 20-bit literal.
    fn imm_value(&self) -> i32;

    /// Extracts the payload as an unsigned 20-bit address.
    fn address(&self) -> u32;

    /// Extracts the base register of an indexed payload (bits 12-15).
    fn index_base(&self) -> Reg;

    /// Extracts the signed offset of an indexed payload (bits 16-31).
    fn index_offset(&self) -> i16;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn immediate(&self) -> bool {
        (self >> IMMEDIATE_BIT) & 1 != 0
    }

    #[inline(always)]
    fn indexed(&self) -> bool {
        (self >> INDEXED_BIT) & 1 != 0
    }

    #[inline(always)]
    fn reg_cond(&self) -> u8 {
        ((self >> REG_COND_SHIFT) & REG_COND_MASK) as u8
    }

    /// The payload occupies the top 20 bits, so an arithmetic shift of the
    /// whole word sign-extends it.
    #[inline(always)]
    fn imm_value(&self) -> i32 {
        (*self as i32) >> PAYLOAD_SHIFT
    }

    #[inline(always)]
    fn address(&self) -> u32 {
        (self >> PAYLOAD_SHIFT) & PAYLOAD_MASK
    }

    #[inline(always)]
    fn index_base(&self) -> Reg {
        Reg::from_bits(self >> INDEX_BASE_SHIFT)
    }

    #[inline(always)]
    fn index_offset(&self) -> i16 {
        (self >> INDEX_OFFSET_SHIFT) as u16 as i16
    }
}

/// Prefix shared by every instruction shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Header {
    /// Operation selector.
    pub opcode: Opcode,
    /// Register index or branch condition, depending on the opcode (4 bits).
    pub reg_cond: u8,
}

impl Header {
    /// Creates a header, rejecting a register/condition value wider than 4 bits.
    pub const fn new(opcode: Opcode, reg_cond: u8) -> Result<Self, InstructionError> {
        if reg_cond as u32 > REG_COND_MASK {
            return Err(InstructionError::RegCondOutOfRange(reg_cond));
        }
        Ok(Self { opcode, reg_cond })
    }

    /// Interprets the register/condition field as a register index.
    #[inline(always)]
    pub const fn register(self) -> Reg {
        Reg::from_bits(self.reg_cond as u32)
    }

    /// Interprets the register/condition field as a branch condition.
    pub const fn condition(self) -> Option<Condition> {
        Condition::from_bits(self.reg_cond)
    }
}

/// A decoded instruction.
///
/// `Generic` carries no payload; it encodes with both flags clear and a zero
/// payload, so an opcode that does expect an operand reads it as absolute
/// address 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// No operand (`ILLOP`, `NOP`, `RET`, `HALT`).
    Generic(Header),
    /// Literal operand.
    Immediate {
        /// Shared prefix.
        header: Header,
        /// Signed 20-bit literal.
        value: i32,
    },
    /// Absolute data or text address.
    Absolute {
        /// Shared prefix.
        header: Header,
        /// Unsigned 20-bit address.
        address: u32,
    },
    /// Register-relative address: `registers[base] + offset`.
    Indexed {
        /// Shared prefix.
        header: Header,
        /// Base register.
        base: Reg,
        /// Signed offset added to the base register.
        offset: i16,
    },
}

impl Instruction {
    /// `ILLOP`.
    pub const ILLOP: Self = Self::generic(Opcode::Illop);
    /// `NOP`.
    pub const NOP: Self = Self::generic(Opcode::Nop);
    /// `RET`.
    pub const RET: Self = Self::generic(Opcode::Ret);
    /// `HALT`.
    pub const HALT: Self = Self::generic(Opcode::Halt);

    /// Builds an operand-less instruction with a zero register/condition field.
    pub const fn generic(opcode: Opcode) -> Self {
        Self::Generic(Header {
            opcode,
            reg_cond: 0,
        })
    }

    /// Builds an instruction with a literal operand.
    pub const fn immediate(
        opcode: Opcode,
        reg_cond: u8,
        value: i32,
    ) -> Result<Self, InstructionError> {
        if value < IMMEDIATE_MIN || value > IMMEDIATE_MAX {
            return Err(InstructionError::ImmediateOutOfRange(value));
        }
        match Header::new(opcode, reg_cond) {
            Ok(header) => Ok(Self::Immediate { header, value }),
            Err(e) => Err(e),
        }
    }

    /// Builds an instruction with an absolute address operand.
    pub const fn absolute(
        opcode: Opcode,
        reg_cond: u8,
        address: u32,
    ) -> Result<Self, InstructionError> {
        if address > ADDRESS_MAX {
            return Err(InstructionError::AddressOutOfRange(address));
        }
        match Header::new(opcode, reg_cond) {
            Ok(header) => Ok(Self::Absolute { header, address }),
            Err(e) => Err(e),
        }
    }

    /// Builds an instruction with a register-relative address operand.
    pub const fn indexed(
        opcode: Opcode,
        reg_cond: u8,
        base: Reg,
        offset: i16,
    ) -> Result<Self, InstructionError> {
        match Header::new(opcode, reg_cond) {
            Ok(header) => Ok(Self::Indexed {
                header,
                base,
                offset,
            }),
            Err(e) => Err(e),
        }
    }

    /// Returns the shared prefix.
    pub const fn header(&self) -> Header {
        match *self {
            Self::Generic(header)
            | Self::Immediate { header, .. }
            | Self::Absolute { header, .. }
            | Self::Indexed { header, .. } => header,
        }
    }

    /// Returns the opcode.
    pub const fn opcode(&self) -> Opcode {
        self.header().opcode
    }

    /// Whether the operand is a literal (immediate flag set).
    pub const fn is_immediate(&self) -> bool {
        matches!(self, Self::Immediate { .. })
    }

    /// Whether the operand is register-relative (indexed flag set).
    pub const fn is_indexed(&self) -> bool {
        matches!(self, Self::Indexed { .. })
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&disassemble(self))
    }
}
