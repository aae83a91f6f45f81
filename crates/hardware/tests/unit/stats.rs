//! # Statistics Tests
//!
//! Verifies instruction categorisation, taken and not-taken accounting, and
//! the peak stack depth watermark.

use rstest::rstest;
use vnsim_core::isa::Opcode;
use vnsim_core::stats::{STATS_SECTIONS, SimStats};

#[rstest]
#[case(Opcode::Load, |s: &SimStats| s.inst_load)]
#[case(Opcode::Store, |s: &SimStats| s.inst_store)]
#[case(Opcode::Add, |s: &SimStats| s.inst_alu)]
#[case(Opcode::Sub, |s: &SimStats| s.inst_alu)]
#[case(Opcode::Ret, |s: &SimStats| s.inst_control)]
#[case(Opcode::Push, |s: &SimStats| s.inst_stack)]
#[case(Opcode::Pop, |s: &SimStats| s.inst_stack)]
#[case(Opcode::Nop, |s: &SimStats| s.inst_other)]
#[case(Opcode::Halt, |s: &SimStats| s.inst_other)]
fn test_record_category(#[case] opcode: Opcode, #[case] counter: fn(&SimStats) -> u64) {
    let mut stats = SimStats::default();
    stats.record(opcode, false, 0);
    assert_eq!(stats.steps, 1);
    assert_eq!(counter(&stats), 1);
}

#[test]
fn test_branch_and_call_outcomes() {
    let mut stats = SimStats::default();
    stats.record(Opcode::Branch, true, 0);
    stats.record(Opcode::Branch, true, 0);
    stats.record(Opcode::Branch, false, 0);
    stats.record(Opcode::Call, true, 1);
    stats.record(Opcode::Call, false, 1);

    assert_eq!(stats.inst_control, 5);
    assert_eq!(stats.branches_taken, 2);
    assert_eq!(stats.branches_not_taken, 1);
    assert_eq!(stats.calls_taken, 1);
    assert_eq!(stats.calls_not_taken, 1);
}

#[test]
fn test_taken_flag_ignored_for_other_opcodes() {
    let mut stats = SimStats::default();
    stats.record(Opcode::Ret, true, 0);
    stats.record(Opcode::Load, true, 0);
    assert_eq!(stats.branches_taken + stats.calls_taken, 0);
}

#[test]
fn test_peak_stack_depth_is_a_watermark() {
    let mut stats = SimStats::default();
    for depth in [1, 3, 2, 0] {
        stats.record(Opcode::Push, false, depth);
    }
    assert_eq!(stats.peak_stack_depth, 3);
}

#[test]
fn test_print_every_section() {
    let mut stats = SimStats::default();
    stats.record(Opcode::Halt, false, 0);
    stats.print();
    let sections: Vec<String> = STATS_SECTIONS.iter().map(ToString::to_string).collect();
    stats.print_sections(&sections);
    stats.print_sections(&["control".to_string()]);
}

#[test]
fn test_print_with_no_steps() {
    SimStats::default().print();
}
