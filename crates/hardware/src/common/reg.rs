//! General-purpose register indices.
//!
//! `Reg` is the only way the core addresses the register file. It is built
//! either from a checked `u8` or from the 4-bit register field of an encoded
//! instruction, so an out-of-range index cannot reach the register file.

use std::fmt;

use super::constants::NUM_REGISTERS;
use super::error::InstructionError;

/// Mask of the 4-bit register field.
const REG_MASK: u32 = 0xF;

/// Index of a general-purpose register (`R00`-`R15`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reg(u8);

impl Reg {
    /// Creates a register index, or `None` if `idx` is not below [`NUM_REGISTERS`].
    pub const fn new(idx: u8) -> Option<Self> {
        if (idx as usize) < NUM_REGISTERS {
            Some(Self(idx))
        } else {
            None
        }
    }

    /// Builds a register index from the low 4 bits of a raw field.
    #[inline(always)]
    pub const fn from_bits(bits: u32) -> Self {
        Self((bits & REG_MASK) as u8)
    }

    /// Returns the index as a `usize` suitable for array access.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the raw 4-bit field value.
    #[inline(always)]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Reg {
    type Error = InstructionError;

    fn try_from(idx: u8) -> Result<Self, Self::Error> {
        Self::new(idx).ok_or(InstructionError::InvalidRegister(idx))
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{:02}", self.0)
    }
}
