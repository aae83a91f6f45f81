//! Instruction Disassembler.
//!
//! Converts an [`Instruction`] into the assembler syntax used by traces, the
//! interactive debugger, and program listings.
//!
//! # Syntax
//!
//! - registers: `R04`
//! - immediate operand: `#8`
//! - absolute operand: `@0x000a`
//! - indexed operand: `2[R04]`
//!
//! # Usage
//!
//! ```
//! use vnsim_core::isa::{Instruction, Opcode, disassemble};
//! let inst = Instruction::immediate(Opcode::Load, 4, 8).unwrap();
//! assert_eq!(disassemble(&inst), "LOAD R04, #8");
//! ```

use std::fmt::Write;

use super::instruction::Instruction;

/// Disassembles one instruction.
///
/// Unknown opcodes render as `UNKNOWN(n)` and undefined branch conditions as
/// `C?n`, so malformed programs can still be listed.
///
/// # Arguments
///
/// * `inst` - The instruction to render.
pub fn disassemble(inst: &Instruction) -> String {
    let header = inst.header();
    let mut text = header.opcode.to_string();

    if !header.opcode.takes_operand() {
        return text;
    }

    text.push(' ');
    if header.opcode.uses_condition() {
        match header.condition() {
            Some(cond) => text.push_str(cond.name()),
            None => {
                let _ = write!(text, "C?{}", header.reg_cond);
            }
        }
        text.push_str(", ");
    } else if header.opcode.uses_register() {
        let _ = write!(text, "{}, ", header.register());
    }

    text.push_str(&operand(inst));
    text
}

/// Renders the operand of an instruction that takes one.
fn operand(inst: &Instruction) -> String {
    match *inst {
        Instruction::Immediate { value, .. } => format!("#{value}"),
        Instruction::Absolute { address, .. } => format!("@{address:#06x}"),
        Instruction::Indexed { base, offset, .. } => format!("{offset}[{base}]"),
        Instruction::Generic(_) => format!("@{:#06x}", 0),
    }
}
