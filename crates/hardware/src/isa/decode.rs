//! Instruction Decoder.
//!
//! Turns a 32-bit instruction word into an [`Instruction`]. Decoding is
//! total: unknown opcodes and out-of-range conditions are carried through and
//! only fault when the execution unit reaches them.

use super::instruction::{Header, Instruction, InstructionBits};
use super::opcode::Opcode;

/// Decodes a 32-bit instruction word.
///
/// The shape is chosen as follows:
/// - opcodes without an operand (`ILLOP`, `NOP`, `RET`, `HALT`) become `Generic`;
/// - the immediate flag selects `Immediate` and the indexed flag is not consulted;
/// - otherwise the indexed flag selects `Indexed`, and `Absolute` is the fallback.
///
/// # Arguments
///
/// * `word` - The encoded instruction.
pub fn decode(word: u32) -> Instruction {
    let header = Header {
        opcode: Opcode::from_bits(word.opcode()),
        reg_cond: word.reg_cond(),
    };

    if !header.opcode.takes_operand() {
        return Instruction::Generic(header);
    }

    if word.immediate() {
        Instruction::Immediate {
            header,
            value: word.imm_value(),
        }
    } else if word.indexed() {
        Instruction::Indexed {
            header,
            base: word.index_base(),
            offset: word.index_offset(),
        }
    } else {
        Instruction::Absolute {
            header,
            address: word.address(),
        }
    }
}
