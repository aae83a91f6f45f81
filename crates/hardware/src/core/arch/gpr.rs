//! General-Purpose Register File.
//!
//! This module implements the register file of the machine. It performs the following:
//! 1. **Storage:** Maintains 16 signed word registers (`R00`-`R15`).
//! 2. **Indexing:** Accepts only [`Reg`] indices, which are always in range.
//! 3. **Debugging:** Exposes the raw register slice for state dumps.

use crate::common::{NUM_REGISTERS, Reg, Word};

/// General-Purpose Register file.
///
/// All registers are general purpose; none is hardwired.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [Word; NUM_REGISTERS],
}

impl Gpr {
    /// Creates a register file with all registers set to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register.
    #[inline(always)]
    pub const fn read(&self, reg: Reg) -> Word {
        self.regs[reg.index()]
    }

    /// Writes a register.
    #[inline(always)]
    pub const fn write(&mut self, reg: Reg, val: Word) {
        self.regs[reg.index()] = val;
    }

    /// Sets every register back to zero.
    pub fn reset(&mut self) {
        self.regs = [0; NUM_REGISTERS];
    }

    /// Returns all register values in index order.
    pub const fn as_slice(&self) -> &[Word] {
        &self.regs
    }
}
