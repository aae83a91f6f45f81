//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the opcode and condition enumerations, the tagged instruction
//! representation, and the fixed 32-bit word codec.
//!
//! # Word layout (version 1)
//!
//! | Bits   | Field                                                   |
//! |--------|---------------------------------------------------------|
//! | 0-5    | opcode                                                  |
//! | 6      | immediate flag                                          |
//! | 7      | indexed flag                                            |
//! | 8-11   | register or branch condition                            |
//! | 12-31  | payload: signed literal, unsigned address, or base + offset |

/// Branch and call conditions.
pub mod condition;

/// Word-to-instruction decoding.
pub mod decode;

/// Human-readable disassembly.
pub mod disasm;

/// Instruction-to-word encoding.
pub mod encode;

/// Instruction shapes, the shared header, and raw field extraction.
pub mod instruction;

/// Operation codes.
pub mod opcode;

pub use condition::Condition;
pub use decode::decode;
pub use disasm::disassemble;
pub use encode::encode;
pub use instruction::{Header, Instruction, InstructionBits};
pub use opcode::{Opcode, RawOpcode};
