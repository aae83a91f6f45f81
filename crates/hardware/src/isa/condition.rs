//! Branch and call conditions.
//!
//! A condition is evaluated against the machine's condition code. `NE`, `GE`
//! and `LE` are defined as "not the opposite" (`cc != Zero`, `cc != Negative`,
//! `cc != Positive`), so they also hold while the condition code is still
//! `Undefined`.

use std::fmt;

use crate::core::arch::cc::ConditionCode;

/// Condition selector carried by `BRANCH` and `CALL`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Unconditional.
    Nc,
    /// Equal (`cc == Zero`).
    Eq,
    /// Not equal (`cc != Zero`).
    Ne,
    /// Greater (`cc == Positive`).
    Gt,
    /// Greater or equal (`cc != Negative`).
    Ge,
    /// Less (`cc == Negative`).
    Lt,
    /// Less or equal (`cc != Positive`).
    Le,
}

impl Condition {
    /// All conditions in field order.
    pub const ALL: [Self; 7] = [
        Self::Nc,
        Self::Eq,
        Self::Ne,
        Self::Gt,
        Self::Ge,
        Self::Lt,
        Self::Le,
    ];

    /// Decodes a register/condition field value, or `None` if it names no condition.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Nc),
            1 => Some(Self::Eq),
            2 => Some(Self::Ne),
            3 => Some(Self::Gt),
            4 => Some(Self::Ge),
            5 => Some(Self::Lt),
            6 => Some(Self::Le),
            _ => None,
        }
    }

    /// Returns the field value.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Returns the assembler mnemonic.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nc => "NC",
            Self::Eq => "EQ",
            Self::Ne => "NE",
            Self::Gt => "GT",
            Self::Ge => "GE",
            Self::Lt => "LT",
            Self::Le => "LE",
        }
    }

    /// Evaluates the condition against a condition code.
    pub fn holds(self, cc: ConditionCode) -> bool {
        match self {
            Self::Nc => true,
            Self::Eq => cc == ConditionCode::Zero,
            Self::Ne => cc != ConditionCode::Zero,
            Self::Gt => cc == ConditionCode::Positive,
            Self::Ge => cc != ConditionCode::Negative,
            Self::Lt => cc == ConditionCode::Negative,
            Self::Le => cc != ConditionCode::Positive,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
