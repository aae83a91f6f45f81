//! # End-to-End Program Scenarios
//!
//! Small complete programs run through the simulator from an encoded image,
//! checking the final machine state or the terminating fault.

use pretty_assertions::assert_eq;
use vnsim_core::common::Fault;
use vnsim_core::config::Config;
use vnsim_core::core::arch::cc::ConditionCode;
use vnsim_core::core::RunState;
use vnsim_core::isa::{Condition, Opcode};
use vnsim_core::sim::{Exit, Program, Simulator};

use crate::common::builder::instruction::{InstructionBuilder, asm};

/// Runs a program after a trip through the binary image format.
fn run_image(program: Program) -> (Simulator, Result<Exit, Fault>) {
    let program = Program::from_bytes(&program.to_bytes()).unwrap();
    let mut sim = Simulator::with_program(&Config::default(), program);
    let result = sim.run();
    (sim, result)
}

#[test]
fn test_add_to_zero() {
    let (sim, result) = run_image(Program::new(
        vec![asm::load_imm(0, 5), asm::add_imm(0, -5), asm::HALT],
        Vec::new(),
        0,
    ));
    assert_eq!(result, Ok(Exit::Halted));
    assert_eq!(sim.machine.registers()[0], 0);
    assert_eq!(sim.machine.cc(), ConditionCode::Zero);
    assert_eq!(sim.machine.halt_addr(), Some(2));
}

#[test]
fn test_push_then_pop_into_data() {
    let (sim, result) = run_image(Program::new(
        vec![asm::push_imm(1), asm::pop_abs(0), asm::HALT],
        vec![0; 4],
        1,
    ));
    assert_eq!(result, Ok(Exit::Halted));
    assert_eq!(sim.machine.data()[0], 1);
    assert_eq!(sim.machine.sp(), 3);
}

#[test]
fn test_illop_program() {
    let (sim, result) = run_image(Program::new(vec![asm::ILLOP], Vec::new(), 0));
    assert_eq!(result, Err(Fault::IllegalInstruction(0)));
    assert_eq!(
        sim.machine.state(),
        RunState::Faulted(Fault::IllegalInstruction(0))
    );
    assert_eq!(sim.machine.halt_addr(), None);
}

#[test]
fn test_untaken_branch_runs_off_text() {
    let (_, result) = run_image(Program::new(
        vec![asm::branch(Condition::Eq, 0)],
        Vec::new(),
        0,
    ));
    assert_eq!(result, Err(Fault::SegmentText(0)));
}

#[test]
fn test_call_with_immediate_operand() {
    let call = InstructionBuilder::new(Opcode::Call)
        .cond(Condition::Nc)
        .imm(0)
        .build();
    let (sim, result) = run_image(Program::new(vec![call, asm::HALT], vec![3; 4], 1));
    assert_eq!(result, Err(Fault::ImmediateValue(0)));
    assert_eq!(sim.machine.sp(), 3);
    assert_eq!(sim.machine.data(), &[3; 4]);
}

/// Mixed data, stack, and indexed arithmetic program.
fn custom_program() -> Program {
    let mut data = vec![0; 20];
    data[..3].copy_from_slice(&[10, 5, 20]);
    Program::new(
        vec![
            asm::load_imm(4, 8),
            asm::load_imm(5, 12),
            asm::store_abs(5, 10),
            asm::push_imm(1),
            asm::push_imm(4),
            asm::NOP,
            asm::NOP,
            asm::pop_abs(1),
            asm::load_imm(4, 10),
            asm::add_idx(0, 4, 2),
            asm::HALT,
        ],
        data,
        5,
    )
}

#[test]
fn test_custom_program_final_state() {
    let (sim, result) = run_image(custom_program());
    assert_eq!(result, Ok(Exit::Halted));

    let machine = &sim.machine;
    assert_eq!(machine.registers()[4], 10);
    assert_eq!(machine.registers()[5], 12);
    assert_eq!(machine.registers()[0], 0);
    assert_eq!(machine.cc(), ConditionCode::Zero);
    assert_eq!(machine.sp(), 18);
    assert_eq!(machine.pc(), 11);

    let mut expected = vec![0; 20];
    expected[..3].copy_from_slice(&[10, 4, 20]);
    expected[10] = 12;
    expected[18] = 4;
    expected[19] = 1;
    assert_eq!(machine.data(), expected.as_slice());
    assert_eq!(sim.stats.steps, 11);
}

#[test]
fn test_pushes_then_run_off_text() {
    let (sim, result) = run_image(Program::new(vec![asm::push_abs(2); 10], vec![7; 20], 5));
    assert_eq!(result, Err(Fault::SegmentText(9)));
    assert_eq!(sim.machine.sp(), 9);
    assert_eq!(sim.machine.data()[10..], [7; 10]);
    assert_eq!(sim.machine.stack_depth(), 10);
}

#[test]
fn test_countdown_loop() {
    // r0 = 5; do { r1 += 2; r0 -= 1 } while r0 > 0
    let (sim, result) = run_image(Program::new(
        vec![
            asm::load_imm(0, 5),
            asm::add_imm(1, 2),
            asm::sub_imm(0, 1),
            asm::branch(Condition::Gt, 1),
            asm::store_abs(1, 0),
            asm::HALT,
        ],
        vec![0],
        1,
    ));
    assert_eq!(result, Ok(Exit::Halted));
    assert_eq!(sim.machine.data(), &[10]);
    assert_eq!(sim.stats.branches_taken, 4);
    assert_eq!(sim.stats.branches_not_taken, 1);
}
