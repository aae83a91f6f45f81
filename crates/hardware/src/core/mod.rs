//! Machine core.
//!
//! This module contains the architectural state and the engine that runs it:
//! the register file and condition code, the machine aggregate, the operand
//! resolver, the execution unit, and the segment bounds checker.

/// Architectural state components (condition code, register file).
pub mod arch;

/// Machine state and its fetch-decode-execute cycle.
pub mod machine;

pub use self::machine::{Machine, RunState, Status};
