//! Condition Code.
//!
//! The condition code records the sign of the last value produced by `LOAD`,
//! `ADD`, or `SUB`. It starts out `Undefined` and never returns to it.

use std::fmt;

use crate::common::Word;

/// Sign of the most recent value-producing instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConditionCode {
    /// No value-producing instruction has run since the program was loaded.
    #[default]
    Undefined,
    /// The last value was zero.
    Zero,
    /// The last value was strictly positive.
    Positive,
    /// The last value was strictly negative.
    Negative,
}

impl ConditionCode {
    /// Classifies a value by its sign.
    pub const fn from_value(value: Word) -> Self {
        if value == 0 {
            Self::Zero
        } else if value > 0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    /// Returns the one-letter name used in state dumps.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Undefined => "U",
            Self::Zero => "Z",
            Self::Positive => "P",
            Self::Negative => "N",
        }
    }
}

impl fmt::Display for ConditionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
