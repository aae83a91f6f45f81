//! Simulation driver, program loading, and state inspection.
//!
//! Provides the program-file codec, the run loop with its stepping hook, and
//! text dumps of machine state.

/// Machine state dumps (CPU, data, program listing).
pub mod inspect;

/// Binary program image reader and writer.
pub mod loader;

/// Run loop, step hook, and step budget.
pub mod simulator;

pub use loader::{Program, read_program, write_program};
pub use simulator::{Exit, HookAction, Simulator, StepHook};
