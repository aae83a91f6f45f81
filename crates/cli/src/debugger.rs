//! Interactive step debugger.
//!
//! Installed as the simulator's step hook in debug mode. After every
//! instruction it prompts for commands until the user asks to step, continue,
//! or quit.

use std::io::{self, BufRead, Write};

use vnsim_core::Machine;
use vnsim_core::sim::inspect::{format_cpu, format_data, format_program};
use vnsim_core::sim::{HookAction, StepHook};

const HELP: &str = "\
h\thelp
c\tcontinue (exit interactive debug mode)
s\tstep by step (next instruction)
RET\tstep by step (next instruction)
r\tprint registers
d\tprint data memory
t\tprint text (program) memory
p\tprint text (program) memory
m\tprint registers and data memory
q\tquit (stop the run)
";

/// Command-driven debugger reading from `R` and writing to `W`.
#[derive(Debug)]
pub struct DebugRepl<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> DebugRepl<R, W> {
    /// Creates a debugger over the given streams.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prompts until a command resumes or ends the run.
    ///
    /// End of input leaves debug mode and lets the run continue.
    pub fn prompt(&mut self, machine: &Machine) -> io::Result<HookAction> {
        let mut line = String::new();
        loop {
            write!(self.output, "DEBUG? ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(HookAction::Detach);
            }

            match line.trim().chars().next() {
                None | Some('s') => return Ok(HookAction::Continue),
                Some('c') => return Ok(HookAction::Detach),
                Some('q') => return Ok(HookAction::Stop),
                Some('h') => self.output.write_all(HELP.as_bytes())?,
                Some('r') => self.output.write_all(format_cpu(machine).as_bytes())?,
                Some('d') => self.output.write_all(format_data(machine).as_bytes())?,
                Some('t' | 'p') => self.output.write_all(format_program(machine).as_bytes())?,
                Some('m') => {
                    self.output.write_all(format_cpu(machine).as_bytes())?;
                    self.output.write_all(format_data(machine).as_bytes())?;
                }
                Some(other) => writeln!(self.output, "unknown command '{other}' (h for help)")?,
            }
        }
    }

    /// Consumes the debugger, returning its streams.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> StepHook for DebugRepl<R, W> {
    fn after_step(&mut self, machine: &Machine) -> HookAction {
        self.prompt(machine).unwrap_or(HookAction::Detach)
    }
}
