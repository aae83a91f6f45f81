//! Machine state dumps.
//!
//! Text renderings of the CPU, data segment, and program used by the
//! debugger and by the CLI after a run.

use std::fmt::Write;

use crate::common::Reg;
use crate::core::Machine;

/// Registers shown per line in [`format_cpu`].
const REGS_PER_LINE: usize = 4;

/// Renders pc, condition code, stack pointer, and registers.
///
/// ```
/// use vnsim_core::Machine;
/// use vnsim_core::sim::inspect::format_cpu;
///
/// let machine = Machine::with_program(Vec::new(), vec![0; 4], 0);
/// let dump = format_cpu(&machine);
/// assert!(dump.starts_with("PC: 0x00000000  CC: U  SP: 0x00000003"));
/// ```
pub fn format_cpu(machine: &Machine) -> String {
    let mut out = format!(
        "PC: {:#010x}  CC: {}  SP: {:#010x}\n",
        machine.pc(),
        machine.cc(),
        machine.sp()
    );
    for (row, chunk) in machine.registers().chunks(REGS_PER_LINE).enumerate() {
        let cells: Vec<String> = chunk
            .iter()
            .enumerate()
            .map(|(col, value)| {
                let reg = Reg::from_bits((row * REGS_PER_LINE + col) as u32);
                format!("{reg}: {value:>11}")
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join("  "));
    }
    out
}

/// Renders every data word, marking the data end and the stack pointer.
pub fn format_data(machine: &Machine) -> String {
    let mut out = format!(
        "data_size: {}  data_end: {:#06x}  sp: {:#06x}\n",
        machine.data_size(),
        machine.data_end(),
        machine.sp()
    );
    for (addr, value) in machine.data().iter().enumerate() {
        let _ = write!(out, "{addr:#06x}: {value:>11}");
        if addr as u32 == machine.data_end() {
            out.push_str("  <- data_end");
        }
        if addr as u32 == machine.sp() {
            out.push_str("  <- sp");
        }
        out.push('\n');
    }
    out
}

/// Renders the text segment as a listing, marking the instruction at the pc.
pub fn format_program(machine: &Machine) -> String {
    let mut out = String::new();
    for (addr, inst) in machine.text().iter().enumerate() {
        let marker = if addr as u32 == machine.pc() { "=>" } else { "  " };
        let _ = writeln!(out, "{marker} {addr:#06x}: {inst}");
    }
    out
}
