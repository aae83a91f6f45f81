//! System-wide constants.
//!
//! Sizes that are fixed by the instruction encoding or the program-file layout
//! live here so the codec, the machine, and the loader agree on them.

/// A machine word: every register and every data cell holds one.
pub type Word = i32;

/// Width of a word (and of an encoded instruction) in bytes.
pub const WORD_BYTES: usize = 4;

/// Number of general-purpose registers.
///
/// The register field of the instruction word is 4 bits wide, so every
/// encodable register index addresses one of these.
pub const NUM_REGISTERS: usize = 16;

/// Number of `u32` fields in the program-file header (text size, data size, data end).
pub const HEADER_FIELDS: usize = 3;

/// Size of the program-file header in bytes.
pub const HEADER_BYTES: usize = HEADER_FIELDS * WORD_BYTES;
