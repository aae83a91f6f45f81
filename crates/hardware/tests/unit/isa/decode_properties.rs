//! Instruction Word Layout Properties.
//!
//! Verifies that `decode()` and `encode()` agree with the version-1 word
//! layout and with each other.
//!
//! # Coverage Matrix
//!
//! - Generic:   ILLOP, NOP, RET, HALT (payload ignored)
//! - Immediate: signed 20-bit literal, both extremes
//! - Absolute:  unsigned 20-bit address
//! - Indexed:   base register + signed 16-bit offset
//! - Unknown opcodes and out-of-range conditions survive decoding

use proptest::prelude::*;
use vnsim_core::common::{InstructionError, Reg};
use vnsim_core::isa::instruction::{ADDRESS_MAX, IMMEDIATE_MAX, IMMEDIATE_MIN};
use vnsim_core::isa::opcode::OPCODE_MASK;
use vnsim_core::isa::{Header, Instruction, InstructionBits, Opcode, decode, encode};

use crate::common::builder::instruction::{InstructionBuilder, asm};

/// Opcodes whose words carry an operand payload.
const OPERAND_OPCODES: [Opcode; 8] = [
    Opcode::Load,
    Opcode::Store,
    Opcode::Add,
    Opcode::Sub,
    Opcode::Branch,
    Opcode::Call,
    Opcode::Push,
    Opcode::Pop,
];

#[test]
fn test_encode_load_immediate_layout() {
    // opcode 2 | immediate | R4 | literal 8
    assert_eq!(encode(&asm::load_imm(4, 8)), 0x0000_8442);
}

#[test]
fn test_encode_add_indexed_layout() {
    // opcode 4 | indexed | R0 | base R4 | offset 2
    assert_eq!(encode(&asm::add_idx(0, 4, 2)), 0x0002_4084);
}

#[test]
fn test_encode_negative_immediate_layout() {
    assert_eq!(encode(&asm::add_imm(0, -5)), 0xFFFF_B044);
    assert_eq!(decode(0xFFFF_B044), asm::add_imm(0, -5));
}

#[test]
fn test_encode_store_absolute_layout() {
    // opcode 3 | R5 | address 10
    assert_eq!(encode(&asm::store_abs(5, 10)), 0x0000_A503);
}

#[test]
fn test_decode_zero_is_illop() {
    assert_eq!(decode(0), Instruction::ILLOP);
}

#[test]
fn test_decode_generic_ignores_payload() {
    let word = 11 | (1 << 6) | (0xABC << 12);
    assert_eq!(decode(word), Instruction::HALT);
    assert_eq!(decode(8), Instruction::RET);
}

#[test]
fn test_decode_immediate_wins_over_indexed() {
    let word = InstructionBuilder::new(Opcode::Push).imm(3).word() | (1 << 7);
    assert_eq!(decode(word), asm::push_imm(3));
}

#[test]
fn test_decode_unknown_opcode() {
    let inst = decode(63 | (0x12 << 12));
    assert_eq!(inst.opcode(), Opcode::from_bits(63));
    assert!(matches!(inst.opcode(), Opcode::Unknown(raw) if raw.value() == 63));
    assert_eq!(encode(&inst), 63 | (0x12 << 12));
}

#[test]
fn test_decode_keeps_illegal_condition() {
    let word = InstructionBuilder::new(Opcode::Branch)
        .raw_cond(9)
        .abs(3)
        .word();
    let inst = decode(word);
    assert_eq!(inst.header().reg_cond, 9);
    assert_eq!(inst.header().condition(), None);
}

#[test]
fn test_immediate_extremes() {
    for value in [IMMEDIATE_MIN, IMMEDIATE_MAX, 0, -1] {
        let inst = asm::load_imm(1, value);
        assert_eq!(encode(&inst).imm_value(), value);
    }
}

#[test]
fn test_constructors_reject_oversized_fields() {
    assert_eq!(
        Instruction::immediate(Opcode::Load, 0, IMMEDIATE_MAX + 1),
        Err(InstructionError::ImmediateOutOfRange(IMMEDIATE_MAX + 1))
    );
    assert_eq!(
        Instruction::immediate(Opcode::Load, 0, IMMEDIATE_MIN - 1),
        Err(InstructionError::ImmediateOutOfRange(IMMEDIATE_MIN - 1))
    );
    assert_eq!(
        Instruction::absolute(Opcode::Store, 0, ADDRESS_MAX + 1),
        Err(InstructionError::AddressOutOfRange(ADDRESS_MAX + 1))
    );
    assert_eq!(
        Header::new(Opcode::Load, 16),
        Err(InstructionError::RegCondOutOfRange(16))
    );
}

fn operand_opcode() -> impl Strategy<Value = Opcode> {
    prop::sample::select(OPERAND_OPCODES.to_vec())
}

fn operand_instruction() -> impl Strategy<Value = Instruction> {
    prop_oneof![
        (operand_opcode(), 0u8..16, IMMEDIATE_MIN..=IMMEDIATE_MAX)
            .prop_map(|(op, rc, v)| Instruction::immediate(op, rc, v).unwrap()),
        (operand_opcode(), 0u8..16, 0u32..=ADDRESS_MAX)
            .prop_map(|(op, rc, a)| Instruction::absolute(op, rc, a).unwrap()),
        (operand_opcode(), 0u8..16, 0u8..16, any::<i16>()).prop_map(|(op, rc, b, o)| {
            Instruction::indexed(op, rc, Reg::new(b).unwrap(), o).unwrap()
        }),
    ]
}

proptest! {
    #[test]
    fn encoded_instructions_decode_to_themselves(inst in operand_instruction()) {
        prop_assert_eq!(decode(encode(&inst)), inst);
    }

    #[test]
    fn decode_is_total_and_keeps_header_fields(word in any::<u32>()) {
        let inst = decode(word);
        prop_assert_eq!(inst.opcode(), Opcode::from_bits(word));
        prop_assert_eq!(inst.header().reg_cond, word.reg_cond());
        prop_assert!(word.reg_cond() < 16);
        prop_assert!(word.address() <= ADDRESS_MAX);
        prop_assert!((IMMEDIATE_MIN..=IMMEDIATE_MAX).contains(&word.imm_value()));
    }

    #[test]
    fn operand_words_reencode_exactly(word in any::<u32>()) {
        let inst = decode(word);
        // With both flags set the indexed flag is ignored and not re-emitted.
        prop_assume!(inst.opcode().takes_operand());
        prop_assume!(!(word.immediate() && word.indexed()));
        prop_assert_eq!(encode(&inst), word);
    }
}

#[test]
fn test_opcode_field_values_are_canonical() {
    for bits in 0..=OPCODE_MASK {
        let opcode = Opcode::from_bits(bits);
        assert_eq!(opcode.bits(), bits);
        assert_eq!(matches!(opcode, Opcode::Unknown(_)), bits >= 12, "bits {bits}");
    }
    assert_eq!(Opcode::from_bits(5), Opcode::Sub);
}
