//! Simulation statistics collection and reporting.
//!
//! This module tracks run metrics for the simulator. It provides:
//! 1. **Throughput:** Executed instructions, host time, and derived rate.
//! 2. **Instruction mix:** Counts by category (load, store, ALU, control, stack, other).
//! 3. **Control flow:** Taken and not-taken counts for conditional branches and calls.
//! 4. **Stack:** Peak stack depth reached during the run.

use std::time::{Duration, Instant};

use crate::isa::Opcode;

/// Simulation statistics structure tracking run metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Number of instructions that completed.
    pub steps: u64,

    /// Count of `LOAD` instructions.
    pub inst_load: u64,
    /// Count of `STORE` instructions.
    pub inst_store: u64,
    /// Count of `ADD` and `SUB` instructions.
    pub inst_alu: u64,
    /// Count of `BRANCH`, `CALL`, and `RET` instructions.
    pub inst_control: u64,
    /// Count of `PUSH` and `POP` instructions.
    pub inst_stack: u64,
    /// Count of `NOP` and `HALT` instructions.
    pub inst_other: u64,

    /// Branches whose condition held.
    pub branches_taken: u64,
    /// Branches whose condition did not hold.
    pub branches_not_taken: u64,
    /// Calls whose condition held.
    pub calls_taken: u64,
    /// Calls whose condition did not hold.
    pub calls_not_taken: u64,

    /// Deepest stack observed after any instruction, in words.
    pub peak_stack_depth: u32,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            steps: 0,
            inst_load: 0,
            inst_store: 0,
            inst_alu: 0,
            inst_control: 0,
            inst_stack: 0,
            inst_other: 0,
            branches_taken: 0,
            branches_not_taken: 0,
            calls_taken: 0,
            calls_not_taken: 0,
            peak_stack_depth: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"instruction_mix"`, `"control"`, `"stack"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "instruction_mix", "control", "stack"];

impl SimStats {
    /// Records one completed instruction.
    ///
    /// # Arguments
    ///
    /// * `opcode` - Opcode of the instruction that completed.
    /// * `taken` - Whether a `BRANCH` or `CALL` transferred control.
    /// * `stack_depth` - Stack depth after the instruction.
    pub fn record(&mut self, opcode: Opcode, taken: bool, stack_depth: u32) {
        self.steps += 1;
        match opcode {
            Opcode::Load => self.inst_load += 1,
            Opcode::Store => self.inst_store += 1,
            Opcode::Add | Opcode::Sub => self.inst_alu += 1,
            Opcode::Branch => {
                self.inst_control += 1;
                if taken {
                    self.branches_taken += 1;
                } else {
                    self.branches_not_taken += 1;
                }
            }
            Opcode::Call => {
                self.inst_control += 1;
                if taken {
                    self.calls_taken += 1;
                } else {
                    self.calls_not_taken += 1;
                }
            }
            Opcode::Ret => self.inst_control += 1,
            Opcode::Push | Opcode::Pop => self.inst_stack += 1,
            Opcode::Nop | Opcode::Halt | Opcode::Illop | Opcode::Unknown(_) => {
                self.inst_other += 1;
            }
        }
        self.peak_stack_depth = self.peak_stack_depth.max(stack_depth);
    }

    /// Returns the host time elapsed since the statistics were created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to print, or empty for all.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.elapsed().as_secs_f64();
        let total = self.steps.max(1) as f64;
        let pct = |n: u64| (n as f64 / total) * 100.0;

        if want("summary") {
            let kips = if seconds > 0.0 {
                (self.steps as f64 / seconds) / 1000.0
            } else {
                0.0
            };
            println!("\n==========================================================");
            println!("SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("sim_insts                {}", self.steps);
            println!("sim_kips                 {kips:.2}");
            println!("----------------------------------------------------------");
        }
        if want("instruction_mix") {
            println!("INSTRUCTION MIX");
            for (name, count) in [
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.alu", self.inst_alu),
                ("op.control", self.inst_control),
                ("op.stack", self.inst_stack),
                ("op.other", self.inst_other),
            ] {
                println!("  {name:<22} {count} ({:.2}%)", pct(count));
            }
            println!("----------------------------------------------------------");
        }
        if want("control") {
            println!("CONTROL FLOW");
            println!("  branch.taken           {}", self.branches_taken);
            println!("  branch.not_taken       {}", self.branches_not_taken);
            println!("  call.taken             {}", self.calls_taken);
            println!("  call.not_taken         {}", self.calls_not_taken);
            println!("----------------------------------------------------------");
        }
        if want("stack") {
            println!("STACK");
            println!("  stack.peak_depth       {}", self.peak_stack_depth);
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
