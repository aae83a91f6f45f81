//! Operation codes.
//!
//! The opcode field is 6 bits wide but only the first twelve values are
//! defined. Decoding never fails: anything else becomes [`Opcode::Unknown`]
//! and faults when executed.

use std::fmt;

/// Mask of the 6-bit opcode field.
pub const OPCODE_MASK: u32 = 0x3F;

/// Operation selector of an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Illegal-instruction sentinel; always faults.
    Illop,
    /// No operation.
    Nop,
    /// `rN = value`.
    Load,
    /// `data[addr] = rN`.
    Store,
    /// `rN += value`.
    Add,
    /// `rN -= value`.
    Sub,
    /// Conditional jump.
    Branch,
    /// Conditional subroutine call.
    Call,
    /// Return from subroutine.
    Ret,
    /// Push a value onto the stack.
    Push,
    /// Pop the stack into memory.
    Pop,
    /// Stop the machine.
    Halt,
    /// Any opcode value outside the defined set (12-63).
    Unknown(RawOpcode),
}

/// Opcode field value with no defined instruction.
///
/// Only [`Opcode::from_bits`] builds one, so the value is always in 12..=63.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RawOpcode(u8);

impl RawOpcode {
    /// Returns the raw 6-bit field value.
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for RawOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Opcode {
    /// Decodes the low 6 bits of `bits`.
    pub const fn from_bits(bits: u32) -> Self {
        match bits & OPCODE_MASK {
            0 => Self::Illop,
            1 => Self::Nop,
            2 => Self::Load,
            3 => Self::Store,
            4 => Self::Add,
            5 => Self::Sub,
            6 => Self::Branch,
            7 => Self::Call,
            8 => Self::Ret,
            9 => Self::Push,
            10 => Self::Pop,
            11 => Self::Halt,
            other => Self::Unknown(RawOpcode(other as u8)),
        }
    }

    /// Returns the 6-bit field value.
    pub const fn bits(self) -> u32 {
        match self {
            Self::Illop => 0,
            Self::Nop => 1,
            Self::Load => 2,
            Self::Store => 3,
            Self::Add => 4,
            Self::Sub => 5,
            Self::Branch => 6,
            Self::Call => 7,
            Self::Ret => 8,
            Self::Push => 9,
            Self::Pop => 10,
            Self::Halt => 11,
            Self::Unknown(raw) => raw.0 as u32,
        }
    }

    /// Returns the assembler mnemonic.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Illop => "ILLOP",
            Self::Nop => "NOP",
            Self::Load => "LOAD",
            Self::Store => "STORE",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Branch => "BRANCH",
            Self::Call => "CALL",
            Self::Ret => "RET",
            Self::Push => "PUSH",
            Self::Pop => "POP",
            Self::Halt => "HALT",
            Self::Unknown(_) => "UNKNOWN",
        }
    }

    /// Whether the instruction carries an operand payload.
    ///
    /// Unknown opcodes are assumed to, so their payload survives a
    /// decode/encode round trip.
    pub const fn takes_operand(self) -> bool {
        !matches!(self, Self::Illop | Self::Nop | Self::Ret | Self::Halt)
    }

    /// Whether the operand must be an address rather than a literal.
    pub const fn requires_address(self) -> bool {
        matches!(self, Self::Store | Self::Branch | Self::Call | Self::Pop)
    }

    /// Whether the register/condition field names a branch condition.
    pub const fn uses_condition(self) -> bool {
        matches!(self, Self::Branch | Self::Call)
    }

    /// Whether the register/condition field names a register.
    pub const fn uses_register(self) -> bool {
        matches!(self, Self::Load | Self::Store | Self::Add | Self::Sub)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(raw) => write!(f, "UNKNOWN({raw})"),
            other => f.write_str(other.name()),
        }
    }
}
