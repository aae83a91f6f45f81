//! # Simulator Run Loop Tests
//!
//! Tests for run termination, the step budget, step hooks, and statistics
//! collection.

use mockall::predicate::always;
use vnsim_core::common::Fault;
use vnsim_core::config::Config;
use vnsim_core::core::{Machine, RunState, Status};
use vnsim_core::isa::Condition;
use vnsim_core::sim::{Exit, HookAction, Program, Simulator};

use crate::common::builder::instruction::asm;
use crate::common::harness::TestContext;
use crate::common::mocks::hook::{MockHook, RecordingHook};

fn config_with_limit(max_steps: Option<u64>) -> Config {
    let mut config = Config::default();
    config.general.max_steps = max_steps;
    config
}

fn three_step_program() -> Vec<vnsim_core::isa::Instruction> {
    vec![asm::load_imm(0, 5), asm::add_imm(0, -5), asm::HALT]
}

#[test]
fn test_run_until_halt_counts_steps() {
    let mut ctx = TestContext::new().load_program(&three_step_program());
    assert_eq!(ctx.run(), Ok(Exit::Halted));
    assert_eq!(ctx.sim.stats.steps, 3);
}

#[test]
fn test_step_limit_stops_infinite_loop() {
    let mut ctx = TestContext::with_config(&config_with_limit(Some(10)))
        .load_program(&[asm::branch(Condition::Nc, 0)]);
    assert_eq!(ctx.run(), Ok(Exit::StepLimit));
    assert_eq!(ctx.sim.stats.steps, 10);
    assert_eq!(ctx.machine().state(), RunState::Running);
}

#[test]
fn test_zero_step_limit_is_unbounded() {
    let mut ctx = TestContext::with_config(&config_with_limit(Some(0)))
        .load_program(&three_step_program());
    assert_eq!(ctx.sim.max_steps(), None);
    assert_eq!(ctx.run(), Ok(Exit::Halted));
    assert_eq!(ctx.sim.stats.steps, 3);
}

#[test]
fn test_step_limit_of_one() {
    let mut ctx = TestContext::with_config(&config_with_limit(Some(1)))
        .load_program(&three_step_program());
    assert_eq!(ctx.run(), Ok(Exit::StepLimit));
    assert_eq!(ctx.machine().pc(), 1);
}

#[test]
fn test_unbounded_run_reaches_halt() {
    let mut ctx = TestContext::with_config(&config_with_limit(None))
        .load_program(&three_step_program());
    assert_eq!(ctx.sim.max_steps(), None);
    assert_eq!(ctx.run(), Ok(Exit::Halted));
}

#[test]
fn test_run_returns_fault() {
    let mut ctx = TestContext::new().load_program(&[asm::NOP, asm::ILLOP]);
    assert_eq!(ctx.run(), Err(Fault::IllegalInstruction(1)));
    assert_eq!(ctx.sim.stats.steps, 1);

    assert_eq!(ctx.step(), Err(Fault::IllegalInstruction(1)));
    assert_eq!(ctx.sim.stats.steps, 1);
}

#[test]
fn test_step_after_halt_records_nothing() {
    let mut ctx = TestContext::new().load_program(&[asm::HALT]);
    assert_eq!(ctx.step(), Ok(Status::Halted));
    assert_eq!(ctx.step(), Ok(Status::Halted));
    assert_eq!(ctx.sim.stats.steps, 1);
}

#[test]
fn test_hook_called_after_each_non_halting_step() {
    let mut hook = MockHook::new();
    hook.expect_after_step()
        .with(always())
        .times(2)
        .returning(|_| HookAction::Continue);

    let mut ctx = TestContext::new().load_program(&three_step_program());
    ctx.sim.set_hook(Box::new(hook));
    assert_eq!(ctx.run(), Ok(Exit::Halted));
    drop(ctx.sim.take_hook());
}

#[test]
fn test_hook_stop_ends_run() {
    let mut hook = MockHook::new();
    hook.expect_after_step()
        .times(1)
        .returning(|_| HookAction::Stop);

    let mut ctx = TestContext::new().load_program(&three_step_program());
    ctx.sim.set_hook(Box::new(hook));
    assert_eq!(ctx.run(), Ok(Exit::Stopped));
    assert_eq!(ctx.machine().pc(), 1);
    assert_eq!(ctx.sim.stats.steps, 1);
}

#[test]
fn test_hook_detach_is_not_consulted_again() {
    let mut hook = MockHook::new();
    hook.expect_after_step()
        .times(1)
        .returning(|_| HookAction::Detach);

    let mut ctx = TestContext::new().load_program(&[asm::NOP, asm::NOP, asm::NOP, asm::HALT]);
    ctx.sim.set_hook(Box::new(hook));
    assert_eq!(ctx.run(), Ok(Exit::Halted));
    assert!(ctx.sim.take_hook().is_none());
}

#[test]
fn test_hook_sees_state_after_step() {
    let mut hook = MockHook::new();
    hook.expect_after_step()
        .withf(|machine: &Machine| machine.pc() == 1 && machine.registers()[0] == 5)
        .times(1)
        .returning(|_| HookAction::Stop);

    let mut ctx = TestContext::new().load_program(&three_step_program());
    ctx.sim.set_hook(Box::new(hook));
    assert_eq!(ctx.run(), Ok(Exit::Stopped));
}

#[test]
fn test_recording_hook_observes_every_pc() {
    let (hook, pcs) = RecordingHook::new();
    let mut ctx = TestContext::new().load_program(&[
        asm::NOP,
        asm::branch(Condition::Nc, 3),
        asm::ILLOP,
        asm::HALT,
    ]);
    ctx.sim.set_hook(Box::new(hook));
    assert_eq!(ctx.run(), Ok(Exit::Halted));
    assert_eq!(*pcs.borrow(), vec![1, 3]);
}

#[test]
fn test_hook_not_called_after_fault() {
    let mut hook = MockHook::new();
    hook.expect_after_step().never();

    let mut ctx = TestContext::new().load_program(&[asm::ILLOP]);
    ctx.sim.set_hook(Box::new(hook));
    assert!(ctx.run().is_err());
}

#[test]
fn test_load_resets_stats() {
    let mut sim = Simulator::with_program(
        &Config::default(),
        Program::new(three_step_program(), Vec::new(), 0),
    );
    assert_eq!(sim.run(), Ok(Exit::Halted));
    assert_eq!(sim.stats.steps, 3);

    sim.load(Program::new(vec![asm::HALT], Vec::new(), 0));
    assert_eq!(sim.stats.steps, 0);
    assert_eq!(sim.machine.state(), RunState::Running);
}

#[test]
fn test_stats_track_control_flow() {
    let mut ctx = TestContext::new().load(
        &[
            asm::load_imm(0, 1),
            asm::branch(Condition::Eq, 0),
            asm::branch(Condition::Gt, 3),
            asm::call(Condition::Lt, 0),
            asm::call(Condition::Nc, 6),
            asm::HALT,
            asm::push_imm(4),
            asm::pop_abs(0),
            asm::RET,
        ],
        &[0; 8],
        2,
    );
    assert_eq!(ctx.run(), Ok(Exit::Halted));

    let stats = &ctx.sim.stats;
    assert_eq!(stats.steps, 9);
    assert_eq!(stats.branches_taken, 1);
    assert_eq!(stats.branches_not_taken, 1);
    assert_eq!(stats.calls_taken, 1);
    assert_eq!(stats.calls_not_taken, 1);
    assert_eq!(stats.inst_load, 1);
    assert_eq!(stats.inst_control, 5);
    assert_eq!(stats.inst_stack, 2);
    assert_eq!(stats.inst_other, 1);
    assert_eq!(stats.peak_stack_depth, 2);
}

#[test]
fn test_trace_instructions_does_not_change_result() {
    let mut config = Config::default();
    config.general.trace_instructions = true;
    let mut ctx = TestContext::with_config(&config).load_program(&three_step_program());
    assert_eq!(ctx.run(), Ok(Exit::Halted));
    assert_eq!(ctx.reg(0), 0);
}

#[test]
fn test_simulator_debug_hides_hook() {
    let mut sim = Simulator::new(&Config::default());
    sim.set_hook(Box::new(RecordingHook::new().0));
    let text = format!("{sim:?}");
    assert!(text.contains("hook: true"));
}
