//! Instruction set tests.


/// Decode/encode properties of the 32-bit word layout.
pub mod decode_properties;
