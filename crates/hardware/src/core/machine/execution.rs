//! Fetch-Decode-Execute Cycle.
//!
//! This module implements the execution unit of the machine. It performs the following:
//! 1. **Lifecycle:** Refuses to execute once the machine has halted or faulted.
//! 2. **Fetch:** Reads `text[pc]` and advances the program counter.
//! 3. **Dispatch:** Runs one handler per opcode against the machine state.
//! 4. **Condition Codes:** Evaluates branch conditions and updates the condition code.

use tracing::trace;

use super::{Machine, RunState, Status};
use crate::common::{Fault, Reg, Word};
use crate::core::arch::cc::ConditionCode;
use crate::isa::{Header, Instruction, Opcode};

impl Machine {
    /// Executes one instruction.
    ///
    /// Once the machine is halted or faulted, further calls return the same
    /// terminal outcome without executing anything.
    ///
    /// # Returns
    ///
    /// `Continue` or `Halted` on success, or the fault that ended the run.
    pub fn step(&mut self) -> Result<Status, Fault> {
        match self.state {
            RunState::Halted => return Ok(Status::Halted),
            RunState::Faulted(fault) => return Err(fault),
            RunState::Running => {}
        }

        self.taken = false;
        let result = self.fetch().and_then(|inst| self.execute(&inst));
        match result {
            Ok(Status::Halted) => self.state = RunState::Halted,
            Err(fault) => self.state = RunState::Faulted(fault),
            Ok(Status::Continue) => {}
        }
        result
    }

    /// Reads the instruction at the program counter and advances it.
    fn fetch(&mut self) -> Result<Instruction, Fault> {
        let Some(inst) = self.text.get(self.pc as usize).copied() else {
            return Err(Fault::SegmentText(self.pc.saturating_sub(1)));
        };
        trace!(pc = self.pc, inst = %inst, "execute");
        self.pc = self.pc.wrapping_add(1);
        Ok(inst)
    }

    /// Dispatches a fetched instruction to its handler.
    fn execute(&mut self, inst: &Instruction) -> Result<Status, Fault> {
        let header = inst.header();
        if header.opcode.requires_address() {
            self.reject_immediate(inst)?;
        }
        match header.opcode {
            Opcode::Illop => Err(Fault::IllegalInstruction(self.current_addr())),
            Opcode::Nop => Ok(Status::Continue),
            Opcode::Load => self.exec_load(header.register(), inst),
            Opcode::Store => self.exec_store(header.register(), inst),
            Opcode::Add => self.exec_arith(header.register(), inst, Word::wrapping_add),
            Opcode::Sub => self.exec_arith(header.register(), inst, Word::wrapping_sub),
            Opcode::Branch => self.exec_branch(header, inst),
            Opcode::Call => self.exec_call(header, inst),
            Opcode::Ret => self.exec_ret(),
            Opcode::Push => self.exec_push(inst),
            Opcode::Pop => self.exec_pop(inst),
            Opcode::Halt => Ok(Status::Halted),
            Opcode::Unknown(_) => Err(Fault::UnknownInstruction(self.current_addr())),
        }
    }

    /// Evaluates the condition field of a `BRANCH` or `CALL`.
    ///
    /// # Returns
    ///
    /// Whether the condition holds under the current condition code, or
    /// `IllegalCondition` if the field names no condition.
    pub fn check_condition(&self, header: Header) -> Result<bool, Fault> {
        header
            .condition()
            .map(|cond| cond.holds(self.cc))
            .ok_or(Fault::IllegalCondition(self.current_addr()))
    }

    /// Sets the condition code from the sign of a produced value.
    #[inline(always)]
    fn update_cc(&mut self, value: Word) {
        self.cc = ConditionCode::from_value(value);
    }

    fn exec_load(&mut self, reg: Reg, inst: &Instruction) -> Result<Status, Fault> {
        let value = self.resolve_value(inst)?;
        self.regs.write(reg, value);
        self.update_cc(value);
        Ok(Status::Continue)
    }

    fn exec_store(&mut self, reg: Reg, inst: &Instruction) -> Result<Status, Fault> {
        let addr = self.resolve_address(inst)?;
        self.write_data(addr, self.regs.read(reg))?;
        Ok(Status::Continue)
    }

    /// `ADD` and `SUB`. Overflow wraps.
    fn exec_arith(
        &mut self,
        reg: Reg,
        inst: &Instruction,
        op: fn(Word, Word) -> Word,
    ) -> Result<Status, Fault> {
        let operand = self.resolve_value(inst)?;
        let result = op(self.regs.read(reg), operand);
        self.regs.write(reg, result);
        self.update_cc(result);
        Ok(Status::Continue)
    }

    fn exec_branch(&mut self, header: Header, inst: &Instruction) -> Result<Status, Fault> {
        if self.check_condition(header)? {
            let target = self.check_text(self.resolve_address(inst)?)?;
            self.pc = target;
            self.taken = true;
        }
        Ok(Status::Continue)
    }

    /// Pushes the return address (the instruction after the call) and jumps.
    fn exec_call(&mut self, header: Header, inst: &Instruction) -> Result<Status, Fault> {
        if self.check_condition(header)? {
            let target = self.check_text(self.resolve_address(inst)?)?;
            self.push(self.pc as Word)?;
            self.pc = target;
            self.taken = true;
        }
        Ok(Status::Continue)
    }

    fn exec_ret(&mut self) -> Result<Status, Fault> {
        let saved_sp = self.sp;
        let ret = self.pop()?;
        match self.check_text(i64::from(ret)) {
            Ok(target) => {
                self.pc = target;
                Ok(Status::Continue)
            }
            Err(fault) => {
                self.sp = saved_sp;
                Err(fault)
            }
        }
    }

    fn exec_push(&mut self, inst: &Instruction) -> Result<Status, Fault> {
        let value = self.resolve_value(inst)?;
        self.push(value)?;
        Ok(Status::Continue)
    }

    /// The destination is validated before the stack is touched.
    fn exec_pop(&mut self, inst: &Instruction) -> Result<Status, Fault> {
        let addr = self.resolve_address(inst)?;
        let _ = self.check_data(addr)?;
        let value = self.pop()?;
        self.write_data(addr, value)?;
        Ok(Status::Continue)
    }
}
