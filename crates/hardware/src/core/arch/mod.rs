//! Architectural state components.
//!
//! This module contains the pieces of state that instructions read and write
//! besides memory:
//! 1. **Condition Code:** The four-valued flag set by value-producing instructions.
//! 2. **GPRs:** The general-purpose register file.

/// Condition code definitions.
pub mod cc;

/// General-Purpose Register file implementation.
pub mod gpr;
