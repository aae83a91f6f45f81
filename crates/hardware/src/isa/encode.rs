//! Instruction Encoder.
//!
//! Writes an [`Instruction`] back into the fixed version-1 word layout. The
//! encoder never reads an in-memory representation back as bytes; every field
//! is placed explicitly.

use super::instruction::{
    Header, IMMEDIATE_BIT, INDEX_BASE_SHIFT, INDEX_OFFSET_SHIFT, INDEXED_BIT, Instruction,
    PAYLOAD_MASK, PAYLOAD_SHIFT, REG_COND_MASK, REG_COND_SHIFT,
};
use super::opcode::OPCODE_MASK;

/// Encodes an instruction into its 32-bit word.
///
/// # Arguments
///
/// * `inst` - The instruction to encode.
pub fn encode(inst: &Instruction) -> u32 {
    match *inst {
        Instruction::Generic(header) => encode_header(header),
        Instruction::Immediate { header, value } => {
            encode_header(header)
                | (1 << IMMEDIATE_BIT)
                | ((value as u32 & PAYLOAD_MASK) << PAYLOAD_SHIFT)
        }
        Instruction::Absolute { header, address } => {
            encode_header(header) | ((address & PAYLOAD_MASK) << PAYLOAD_SHIFT)
        }
        Instruction::Indexed {
            header,
            base,
            offset,
        } => {
            encode_header(header)
                | (1 << INDEXED_BIT)
                | ((base.bits() as u32) << INDEX_BASE_SHIFT)
                | ((offset as u16 as u32) << INDEX_OFFSET_SHIFT)
        }
    }
}

/// Encodes the opcode and register/condition fields.
fn encode_header(header: Header) -> u32 {
    (header.opcode.bits() & OPCODE_MASK)
        | ((header.reg_cond as u32 & REG_COND_MASK) << REG_COND_SHIFT)
}
