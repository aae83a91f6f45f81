//! Simulator: owns the machine, its statistics, and the stepping hook.
//!
//! The run loop executes one instruction at a time. Between instructions it
//! enforces the configured step budget and yields to an optional
//! [`StepHook`], which is how the interactive debugger pauses a run.

use std::fmt;

use tracing::{error, info};

use super::loader::Program;
use crate::common::Fault;
use crate::config::Config;
use crate::core::{Machine, RunState, Status};
use crate::stats::SimStats;

/// Decision returned by a [`StepHook`] after each step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookAction {
    /// Keep running and consult the hook again after the next step.
    Continue,
    /// Keep running without consulting the hook again.
    Detach,
    /// End the run now.
    Stop,
}

/// Callback invoked between instructions.
pub trait StepHook {
    /// Called after every completed instruction that did not halt the machine.
    fn after_step(&mut self, machine: &Machine) -> HookAction;
}

/// Reason a run ended without a fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exit {
    /// The program executed `HALT`.
    Halted,
    /// The configured step budget was exhausted.
    StepLimit,
    /// The step hook ended the run.
    Stopped,
}

/// Top-level simulator: machine state, statistics, and run policy.
pub struct Simulator {
    /// Architectural state of the loaded program.
    pub machine: Machine,
    /// Run statistics.
    pub stats: SimStats,
    max_steps: Option<u64>,
    trace: bool,
    hook: Option<Box<dyn StepHook>>,
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("machine", &self.machine)
            .field("stats", &self.stats)
            .field("max_steps", &self.max_steps)
            .field("trace", &self.trace)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

impl Simulator {
    /// Creates a simulator with an empty machine.
    ///
    /// A `max_steps` of zero leaves the run unbounded.
    pub fn new(config: &Config) -> Self {
        Self {
            machine: Machine::new(),
            stats: SimStats::default(),
            max_steps: config.general.max_steps.filter(|&max| max != 0),
            trace: config.general.trace_instructions,
            hook: None,
        }
    }

    /// Creates a simulator and loads a program into it.
    pub fn with_program(config: &Config, program: Program) -> Self {
        let mut sim = Self::new(config);
        sim.load(program);
        sim
    }

    /// Installs a program, resetting the machine and the statistics.
    pub fn load(&mut self, program: Program) {
        self.machine
            .load(program.text, program.data, program.data_end);
        self.stats = SimStats::default();
    }

    /// Installs a hook consulted after every step, replacing any previous one.
    pub fn set_hook(&mut self, hook: Box<dyn StepHook>) {
        self.hook = Some(hook);
    }

    /// Removes and returns the installed hook.
    pub fn take_hook(&mut self) -> Option<Box<dyn StepHook>> {
        self.hook.take()
    }

    /// Returns the step budget, if any.
    pub const fn max_steps(&self) -> Option<u64> {
        self.max_steps
    }

    /// Executes one instruction and records it in the statistics.
    ///
    /// After the machine has halted or faulted this returns the terminal
    /// outcome again and records nothing.
    pub fn step(&mut self) -> Result<Status, Fault> {
        if self.machine.state() != RunState::Running {
            return self.machine.step();
        }

        let pc = self.machine.pc();
        let next = self.machine.next_instruction().copied();
        if let Some(inst) = next.filter(|_| self.trace) {
            info!(pc, %inst, "exec");
        }

        let status = self.machine.step().inspect_err(|fault| {
            error!(kind = fault.kind(), addr = fault.addr(), "{fault}");
        })?;

        if let Some(inst) = next {
            self.stats.record(
                inst.opcode(),
                self.machine.transfer_taken(),
                self.machine.stack_depth(),
            );
        }
        Ok(status)
    }

    /// Runs until the program halts, faults, exhausts the step budget, or the
    /// hook stops it.
    ///
    /// # Returns
    ///
    /// Why the run ended, or the fault that ended it.
    pub fn run(&mut self) -> Result<Exit, Fault> {
        loop {
            if self.max_steps.is_some_and(|max| self.stats.steps >= max) {
                info!(steps = self.stats.steps, "step limit reached");
                return Ok(Exit::StepLimit);
            }

            if self.step()? == Status::Halted {
                info!(steps = self.stats.steps, "halted");
                return Ok(Exit::Halted);
            }

            let action = match self.hook.as_mut() {
                Some(hook) => hook.after_step(&self.machine),
                None => HookAction::Continue,
            };
            match action {
                HookAction::Continue => {}
                HookAction::Detach => self.hook = None,
                HookAction::Stop => {
                    info!(steps = self.stats.steps, "stopped by step hook");
                    return Ok(Exit::Stopped);
                }
            }
        }
    }
}
