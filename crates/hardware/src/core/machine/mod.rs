//! Machine State Definition and Initialization.
//!
//! This module defines the `Machine` aggregate, which owns the entire
//! architectural state of one simulated program. It coordinates the following:
//! 1. **State Management:** Registers, program counter, condition code, and stack pointer.
//! 2. **Segments:** The immutable text segment and the data array shared by data and stack.
//! 3. **Lifecycle:** Loading a program and tracking the Running/Halted/Faulted state.
//!
//! The execution unit, operand resolver, and bounds checker are implemented as
//! further `impl Machine` blocks in the submodules.

/// Fetch-decode-execute cycle and per-opcode handlers.
pub mod execution;

/// Segment bounds checking, data access, and stack operations.
pub mod memory;

/// Effective value and address resolution.
pub mod operand;

use tracing::debug;

use crate::common::{Fault, Reg, Word};
use crate::core::arch::cc::ConditionCode;
use crate::core::arch::gpr::Gpr;
use crate::isa::Instruction;

/// Outcome of one successful step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// The instruction completed and the machine is ready for the next one.
    Continue,
    /// `HALT` was executed.
    Halted,
}

/// Lifecycle state of the machine.
///
/// `Halted` and `Faulted` are terminal: once entered, stepping reports the
/// same outcome again without executing anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    /// Instructions are being executed.
    #[default]
    Running,
    /// The program executed `HALT`.
    Halted,
    /// The program raised a fault.
    Faulted(Fault),
}

/// Architectural state of one simulated program.
///
/// Text and data are installed by [`Machine::load`]; afterwards only the data
/// words, registers, pc, condition code, and stack pointer change.
#[derive(Clone, Debug, Default)]
pub struct Machine {
    regs: Gpr,
    pc: u32,
    cc: ConditionCode,
    sp: u32,
    text: Vec<Instruction>,
    data: Vec<Word>,
    data_end: u32,
    state: RunState,
    taken: bool,
}

impl Machine {
    /// Creates an empty machine with no text and no data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a machine and loads a program into it.
    pub fn with_program(text: Vec<Instruction>, data: Vec<Word>, data_end: u32) -> Self {
        let mut machine = Self::new();
        machine.load(text, data, data_end);
        machine
    }

    /// Installs a program and resets the machine.
    ///
    /// Registers are zeroed, the pc returns to 0, the condition code becomes
    /// `Undefined`, and the stack pointer is placed on the last data word.
    /// Sizes are taken from the slices; the caller is responsible for
    /// `data_end <= data.len()`.
    ///
    /// # Arguments
    ///
    /// * `text` - The instructions, addressed from 0.
    /// * `data` - The initial data segment, addressed from 0.
    /// * `data_end` - First address past the statically initialized data.
    pub fn load(&mut self, text: Vec<Instruction>, data: Vec<Word>, data_end: u32) {
        self.regs.reset();
        self.pc = 0;
        self.cc = ConditionCode::Undefined;
        self.text = text;
        self.data = data;
        self.data_end = data_end;
        self.sp = self.data_size().wrapping_sub(1);
        self.state = RunState::Running;
        self.taken = false;

        debug!(
            text_size = self.text_size(),
            data_size = self.data_size(),
            data_end,
            "program loaded"
        );
    }

    /// Returns all register values in index order.
    pub const fn registers(&self) -> &[Word] {
        self.regs.as_slice()
    }

    /// Reads one register.
    pub const fn register(&self, reg: Reg) -> Word {
        self.regs.read(reg)
    }

    /// Returns the program counter (index of the next instruction to fetch).
    pub const fn pc(&self) -> u32 {
        self.pc
    }

    /// Returns the condition code.
    pub const fn cc(&self) -> ConditionCode {
        self.cc
    }

    /// Returns the stack pointer (index of the next free stack slot).
    pub const fn sp(&self) -> u32 {
        self.sp
    }

    /// Returns the text segment.
    pub fn text(&self) -> &[Instruction] {
        &self.text
    }

    /// Returns the data segment, stack included.
    pub fn data(&self) -> &[Word] {
        &self.data
    }

    /// Returns the first address past the statically initialized data.
    pub const fn data_end(&self) -> u32 {
        self.data_end
    }

    /// Returns the number of instructions in the text segment.
    pub fn text_size(&self) -> u32 {
        len_u32(self.text.len())
    }

    /// Returns the number of words in the data segment.
    pub fn data_size(&self) -> u32 {
        len_u32(self.data.len())
    }

    /// Returns the lifecycle state.
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Address of the `HALT` that stopped the machine, once it has halted.
    pub const fn halt_addr(&self) -> Option<u32> {
        match self.state {
            RunState::Halted => Some(self.current_addr()),
            RunState::Running | RunState::Faulted(_) => None,
        }
    }

    /// Whether the last executed `BRANCH` or `CALL` transferred control.
    pub const fn transfer_taken(&self) -> bool {
        self.taken
    }

    /// Returns the number of words currently on the stack.
    pub fn stack_depth(&self) -> u32 {
        self.data_size()
            .wrapping_sub(1)
            .saturating_sub(self.sp)
    }

    /// Returns the instruction the next step will fetch, if the pc is inside text.
    pub fn next_instruction(&self) -> Option<&Instruction> {
        self.text.get(self.pc as usize)
    }
}

/// Converts a segment length to the 32-bit size used by the address space.
fn len_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
