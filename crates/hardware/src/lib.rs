//! Segmented von-Neumann instruction-set simulator library.
//!
//! This crate implements a small register machine whose address space is split
//! into text, data, and stack segments:
//! 1. **ISA:** Opcodes, branch conditions, the tagged instruction enum, and its 32-bit codec.
//! 2. **Core:** Machine state, operand resolution, the execution unit, and segment bounds checks.
//! 3. **Simulation:** Program-file loader, run loop with step hooks, and state dumps.
//! 4. **Support:** Configuration, statistics, and the typed fault model.

/// Common types and constants (register indices, words, faults).
pub mod common;
/// Simulator configuration (defaults, JSON loading).
pub mod config;
/// Machine core (architectural state, operand resolver, execution unit, bounds checker).
pub mod core;
/// Instruction set (opcodes, conditions, instruction shapes, codec, disassembler).
pub mod isa;
/// Program loading, run loop, and inspection helpers.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Machine state plus its fetch-decode-execute cycle.
pub use crate::core::Machine;
/// Top-level driver owning a machine, its statistics, and an optional step hook.
pub use crate::sim::simulator::Simulator;
