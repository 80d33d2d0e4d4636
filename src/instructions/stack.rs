//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PHA: Push Accumulator on Stack
//! - PHP: Push Processor Status on Stack
//! - PLA: Pull Accumulator from Stack
//! - PLP: Pull Processor Status from Stack
//!
//! The 6502 stack is located at memory addresses 0x0100-0x01FF and grows downward.
//! The stack pointer (SP) is an 8-bit register that serves as an offset into this
//! page. The full stack address is calculated as 0x0100 | SP.

use crate::{ExecutionError, MemoryBus, StatusFlags, CPU, OPCODE_TABLE};

/// Executes the PHA (Push Accumulator) instruction.
///
/// Stack operation:
/// 1. Write accumulator value to 0x0100 | SP
/// 2. Decrement SP (wraps from 0x00 to 0xFF)
///
/// Cycles: 3. Flags affected: None
///
/// # Examples
///
/// ```
/// use cpu6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
/// memory.write(0x8000, 0x48); // PHA
///
/// let mut cpu = CPU::new(memory);
/// cpu.set_a(0x42);
///
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.memory().peek(0x01FF), 0x42);
/// assert_eq!(cpu.sp(), 0xFE);
/// assert_eq!(cpu.pc(), 0x8001);
/// assert_eq!(cpu.cycles(), 3);
/// ```
pub(crate) fn execute_pha<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];

    cpu.push(cpu.a);

    cpu.retire(metadata, false);
    Ok(())
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// The pushed copy always has B (bit 4) and bit 5 set. 3 cycles.
pub(crate) fn execute_php<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];

    cpu.push(cpu.p.bits() | StatusFlags::BREAK | StatusFlags::UNUSED);

    cpu.retire(metadata, false);
    Ok(())
}

/// Executes the PLA (Pull Accumulator) instruction.
///
/// Updates Z and N from the pulled value. 4 cycles.
pub(crate) fn execute_pla<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];

    cpu.a = cpu.pull();
    cpu.p.set_nz(cpu.a);

    cpu.retire(metadata, false);
    Ok(())
}

/// Executes the PLP (Pull Processor Status) instruction.
///
/// The pulled byte is stored verbatim. 4 cycles.
pub(crate) fn execute_plp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let status = cpu.pull();
    cpu.p = StatusFlags::from_bits(status);

    cpu.retire(metadata, false);
    Ok(())
}
