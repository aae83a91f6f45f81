//! Fault and error definitions.
//!
//! This module defines every failure the simulator can report. It provides:
//! 1. **Fault Representation:** The terminal faults raised by the execution unit and bounds checker.
//! 2. **Encoding Errors:** Rejection of instruction fields that do not fit the 32-bit layout.
//! 3. **Load and Config Errors:** Failures while reading program images or configuration files.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Machine faults.
///
/// Every fault is terminal: the instruction that raised it cannot complete and
/// the run ends. The associated value is the text address of the instruction
/// that was executing when the fault was detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum Fault {
    /// The opcode field holds a value outside the defined instruction set.
    #[error("unknown instruction at address {0:#010x}")]
    UnknownInstruction(u32),

    /// The instruction is the designated illegal sentinel (`ILLOP`).
    #[error("illegal instruction at address {0:#010x}")]
    IllegalInstruction(u32),

    /// A branch or call carries a condition value outside the defined seven.
    #[error("illegal condition at address {0:#010x}")]
    IllegalCondition(u32),

    /// An instruction that needs an addressable operand received a literal.
    #[error("immediate value not allowed at address {0:#010x}")]
    ImmediateValue(u32),

    /// The program counter left the text segment.
    #[error("segmentation fault: text segment size violation at address {0:#010x}")]
    SegmentText(u32),

    /// A data access fell outside the data segment.
    #[error("segmentation fault: data segment size violation at address {0:#010x}")]
    SegmentData(u32),

    /// The stack pointer left the `[data_end, data_size)` window.
    #[error("segmentation fault: stack segment size violation at address {0:#010x}")]
    SegmentStack(u32),
}

impl Fault {
    /// Returns the text address at which the fault was raised.
    pub const fn addr(&self) -> u32 {
        match *self {
            Self::UnknownInstruction(addr)
            | Self::IllegalInstruction(addr)
            | Self::IllegalCondition(addr)
            | Self::ImmediateValue(addr)
            | Self::SegmentText(addr)
            | Self::SegmentData(addr)
            | Self::SegmentStack(addr) => addr,
        }
    }

    /// Returns the short name of the fault kind, as used in logs and summaries.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnknownInstruction(_) => "unknown-instruction",
            Self::IllegalInstruction(_) => "illegal-instruction",
            Self::IllegalCondition(_) => "illegal-condition",
            Self::ImmediateValue(_) => "immediate-value",
            Self::SegmentText(_) => "segment-text",
            Self::SegmentData(_) => "segment-data",
            Self::SegmentStack(_) => "segment-stack",
        }
    }
}

/// Errors raised while building an instruction whose fields do not fit the
/// fixed 32-bit layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InstructionError {
    /// Immediate literal outside the signed 20-bit range.
    #[error("immediate value {0} does not fit in 20 signed bits")]
    ImmediateOutOfRange(i32),

    /// Absolute address outside the unsigned 20-bit range.
    #[error("address {0:#x} does not fit in 20 bits")]
    AddressOutOfRange(u32),

    /// Register or condition value wider than the 4-bit field.
    #[error("register/condition field {0} does not fit in 4 bits")]
    RegCondOutOfRange(u8),

    /// Register index beyond the register file.
    #[error("register index {0} out of range (0-15)")]
    InvalidRegister(u8),
}

/// Errors raised while reading or writing a binary program image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The program file could not be opened, read, or written.
    #[error("could not access program file '{}': {source}", path.display())]
    Io {
        /// Path of the file being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The image ended before a section was complete.
    #[error("truncated {section}: expected {expected} bytes, found {found}")]
    Truncated {
        /// Section being read (`header`, `text`, or `data`).
        section: &'static str,
        /// Bytes the section needs.
        expected: usize,
        /// Bytes actually available.
        found: usize,
    },

    /// Bytes remain after the data section.
    #[error("{0} trailing bytes after the data section")]
    TrailingBytes(usize),

    /// The header's data end lies beyond the data segment.
    #[error("data end {data_end} exceeds data size {data_size}")]
    DataEndOutOfRange {
        /// First address past the initialized data.
        data_end: u32,
        /// Declared size of the data segment.
        data_size: u32,
    },
}

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read config file '{}': {source}", path.display())]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration is not valid JSON for [`crate::config::Config`].
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
