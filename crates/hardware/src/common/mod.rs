//! Common utilities and types used throughout the simulator.
//!
//! This module provides the building blocks shared by every other component:
//! 1. **Constants:** Register count, word width, and program-file layout sizes.
//! 2. **Error Handling:** The fault taxonomy and loader/encoding error types.
//! 3. **Register Indices:** A checked index type for the general-purpose registers.

/// Common constants used throughout the simulator.
pub mod constants;

/// Fault and error type definitions.
pub mod error;

/// Register index type.
pub mod reg;

pub use constants::{NUM_REGISTERS, WORD_BYTES, Word};
pub use error::{ConfigError, Fault, InstructionError, LoadError};
pub use reg::Reg;
