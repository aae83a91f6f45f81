//! Operand resolution.
//!
//! Turns an instruction's operand into either an effective data address or a
//! value. Literals are only legal where a value is expected; every
//! address-form use of an immediate operand raises `ImmediateValue`.

use super::Machine;
use crate::common::{Fault, Word};
use crate::isa::Instruction;

impl Machine {
    /// Address of the instruction currently being executed.
    ///
    /// The pc has already been advanced past it by the fetch.
    #[inline(always)]
    pub(crate) const fn current_addr(&self) -> u32 {
        self.pc.wrapping_sub(1)
    }

    /// Computes the effective address named by an operand.
    ///
    /// The result is signed and unbounded; callers validate it against the
    /// segment they are about to touch. A `Generic` instruction names
    /// address 0.
    ///
    /// # Arguments
    ///
    /// * `inst` - The instruction whose operand is resolved.
    ///
    /// # Returns
    ///
    /// The effective address, or `ImmediateValue` if the operand is a literal.
    pub fn resolve_address(&self, inst: &Instruction) -> Result<i64, Fault> {
        match *inst {
            Instruction::Immediate { .. } => Err(Fault::ImmediateValue(self.current_addr())),
            Instruction::Indexed { base, offset, .. } => {
                Ok(i64::from(self.regs.read(base)) + i64::from(offset))
            }
            Instruction::Absolute { address, .. } => Ok(i64::from(address)),
            Instruction::Generic(_) => Ok(0),
        }
    }

    /// Computes the value of an operand.
    ///
    /// A literal is returned as is. Any other operand is resolved to an
    /// address, checked against the data segment, and read.
    pub fn resolve_value(&self, inst: &Instruction) -> Result<Word, Fault> {
        if let Instruction::Immediate { value, .. } = *inst {
            return Ok(value);
        }
        let addr = self.resolve_address(inst)?;
        self.read_data(addr)
    }
}
