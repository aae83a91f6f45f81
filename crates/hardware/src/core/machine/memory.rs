//! Segment Bounds Checking and Data Access.
//!
//! This module implements the bounds checker that stands between the
//! execution unit and the data array. It performs the following:
//! 1. **Data Checks:** Every data access must satisfy `0 <= addr < data_size`.
//! 2. **Text Checks:** Every control transfer target must satisfy `0 <= addr < text_size`.
//! 3. **Stack Discipline:** Push and pop validate the adjusted stack pointer
//!    against `[data_end, data_size)` before anything is modified.
//!
//! A failed check returns a fault tagged with the address of the executing
//! instruction and leaves the machine state as it was.

use super::Machine;
use crate::common::{Fault, Word};
use crate::isa::Instruction;

impl Machine {
    /// Validates a data address.
    ///
    /// # Returns
    ///
    /// The address as an index into the data array, or `SegmentData`.
    pub fn check_data(&self, addr: i64) -> Result<usize, Fault> {
        usize::try_from(addr)
            .ok()
            .filter(|&idx| idx < self.data.len())
            .ok_or(Fault::SegmentData(self.current_addr()))
    }

    /// Validates a control transfer target.
    ///
    /// # Returns
    ///
    /// The target as a program counter value, or `SegmentText`.
    pub fn check_text(&self, addr: i64) -> Result<u32, Fault> {
        u32::try_from(addr)
            .ok()
            .filter(|&target| target < self.text_size())
            .ok_or(Fault::SegmentText(self.current_addr()))
    }

    /// Validates a stack pointer value against `[data_end, data_size)`.
    pub fn check_stack(&self, sp: u32) -> Result<usize, Fault> {
        if sp >= self.data_end && sp < self.data_size() {
            Ok(sp as usize)
        } else {
            Err(Fault::SegmentStack(self.current_addr()))
        }
    }

    /// Reads a data word after validating its address.
    pub fn read_data(&self, addr: i64) -> Result<Word, Fault> {
        let idx = self.check_data(addr)?;
        self.data
            .get(idx)
            .copied()
            .ok_or(Fault::SegmentData(self.current_addr()))
    }

    /// Writes a data word after validating its address.
    pub fn write_data(&mut self, addr: i64, value: Word) -> Result<(), Fault> {
        let fault = Fault::SegmentData(self.current_addr());
        let idx = self.check_data(addr)?;
        let slot = self.data.get_mut(idx).ok_or(fault)?;
        *slot = value;
        Ok(())
    }

    /// Pushes a word onto the stack.
    ///
    /// The word is stored at the current stack pointer, which then moves down
    /// one slot. The moved pointer must stay inside the stack window.
    pub fn push(&mut self, value: Word) -> Result<(), Fault> {
        let fault = Fault::SegmentStack(self.current_addr());
        let new_sp = self.sp.checked_sub(1).ok_or(fault)?;
        let _ = self.check_stack(new_sp)?;
        let slot = self.data.get_mut(self.sp as usize).ok_or(fault)?;
        *slot = value;
        self.sp = new_sp;
        Ok(())
    }

    /// Pops a word from the stack.
    ///
    /// The stack pointer moves up one slot, must stay inside the stack window,
    /// and the word stored there is returned.
    pub fn pop(&mut self) -> Result<Word, Fault> {
        let fault = Fault::SegmentStack(self.current_addr());
        let new_sp = self.sp.checked_add(1).ok_or(fault)?;
        let idx = self.check_stack(new_sp)?;
        let value = self.data.get(idx).copied().ok_or(fault)?;
        self.sp = new_sp;
        Ok(value)
    }

    /// Rejects a literal operand on an instruction that needs an address.
    pub fn reject_immediate(&self, inst: &Instruction) -> Result<(), Fault> {
        if inst.is_immediate() {
            Err(Fault::ImmediateValue(self.current_addr()))
        } else {
            Ok(())
        }
    }
}
