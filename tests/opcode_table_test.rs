//! Cross-checks the opcode table against the executing CPU.
//!
//! Every documented opcode is executed once from a zeroed machine and must
//! cost exactly its table cycles and advance PC by its table size (control
//! flow aside). Every undocumented opcode must be refused.

use std::collections::HashSet;

use cpu6502::{ExecutionError, FlatMemory, MemoryBus, CPU, OPCODE_TABLE};

fn setup_cpu(opcode: u8) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.write(0x8000, opcode);
    CPU::new(memory)
}

/// Branches that are taken with P = 0x20 (all condition flags clear).
const TAKEN_FROM_CLEAR_FLAGS: [u8; 4] = [0x10, 0x50, 0x90, 0xD0];

const CONTROL_FLOW: [&str; 5] = ["BRK", "JMP", "JSR", "RTS", "RTI"];

#[test]
fn test_table_has_56_mnemonics() {
    let mnemonics: HashSet<_> = OPCODE_TABLE
        .iter()
        .filter(|m| m.is_legal())
        .map(|m| m.mnemonic)
        .collect();
    assert_eq!(mnemonics.len(), 56);
}

#[test]
fn test_every_documented_opcode_costs_its_table_cycles() {
    for opcode in 0..=255u8 {
        let metadata = &OPCODE_TABLE[opcode as usize];
        if !metadata.is_legal() {
            continue;
        }

        let mut cpu = setup_cpu(opcode);
        cpu.step()
            .unwrap_or_else(|e| panic!("opcode {:02X} failed: {}", opcode, e));

        let expected = metadata.base_cycles as u64 + TAKEN_FROM_CLEAR_FLAGS.contains(&opcode) as u64;
        assert_eq!(
            cpu.cycles(),
            expected,
            "cycles for {:02X} {}",
            opcode,
            metadata.mnemonic
        );

        if !CONTROL_FLOW.contains(&metadata.mnemonic) {
            assert_eq!(
                cpu.pc(),
                0x8000 + metadata.size_bytes as u16,
                "size of {:02X} {}",
                opcode,
                metadata.mnemonic
            );
        }
    }
}

#[test]
fn test_every_undocumented_opcode_is_refused() {
    let mut refused = 0;
    for opcode in 0..=255u8 {
        if OPCODE_TABLE[opcode as usize].is_legal() {
            continue;
        }

        let mut cpu = setup_cpu(opcode);
        assert_eq!(cpu.step(), Err(ExecutionError::InvalidOpcode(opcode)));
        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.cycles(), 0);
        refused += 1;
    }
    assert_eq!(refused, 105);
}

#[test]
fn test_invalid_opcode_error_message() {
    assert_eq!(
        ExecutionError::InvalidOpcode(0x02).to_string(),
        "invalid opcode $02"
    );
}
