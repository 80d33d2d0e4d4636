//! # Status Flag Manipulation Instructions
//!
//! This module implements instructions that directly modify processor status flags:
//! - CLC: Clear Carry Flag
//! - SEC: Set Carry Flag
//! - CLI: Clear Interrupt Disable
//! - SEI: Set Interrupt Disable
//! - CLV: Clear Overflow Flag
//! - CLD: Clear Decimal Mode
//! - SED: Set Decimal Mode
//!
//! These instructions use implied addressing mode and execute in 2 cycles.

use crate::{ExecutionError, MemoryBus, StatusFlags, CPU, OPCODE_TABLE};

fn write_flag<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8, mask: u8, value: bool) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let bits = if value {
        cpu.p.bits() | mask
    } else {
        cpu.p.bits() & !mask
    };
    cpu.p = StatusFlags::from_bits(bits);

    cpu.retire(metadata, false);
}

/// Executes the CLC (Clear Carry Flag) instruction.
///
/// # Examples
///
/// ```
/// use cpu6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
/// memory.write(0x8000, 0x18); // CLC
///
/// let mut cpu = CPU::new(memory);
/// cpu.set_flag_c(true);
///
/// cpu.step().unwrap();
///
/// assert!(!cpu.flag_c());
/// assert_eq!(cpu.pc(), 0x8001);
/// assert_eq!(cpu.cycles(), 2);
/// ```
pub(crate) fn execute_clc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    write_flag(cpu, opcode, StatusFlags::CARRY, false);
    Ok(())
}

/// Executes the SEC (Set Carry Flag) instruction.
pub(crate) fn execute_sec<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    write_flag(cpu, opcode, StatusFlags::CARRY, true);
    Ok(())
}

/// Executes the CLI (Clear Interrupt Disable) instruction.
///
/// A pending IRQ is taken before the next instruction.
pub(crate) fn execute_cli<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    write_flag(cpu, opcode, StatusFlags::INTERRUPT, false);
    Ok(())
}

/// Executes the SEI (Set Interrupt Disable) instruction.
pub(crate) fn execute_sei<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    write_flag(cpu, opcode, StatusFlags::INTERRUPT, true);
    Ok(())
}

/// Executes the CLD (Clear Decimal Mode) instruction.
pub(crate) fn execute_cld<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    write_flag(cpu, opcode, StatusFlags::DECIMAL, false);
    Ok(())
}

/// Executes the SED (Set Decimal Mode) instruction.
///
/// The flag is stored only; ADC and SBC stay binary.
pub(crate) fn execute_sed<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    write_flag(cpu, opcode, StatusFlags::DECIMAL, true);
    Ok(())
}

/// Executes the CLV (Clear Overflow Flag) instruction.
pub(crate) fn execute_clv<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    write_flag(cpu, opcode, StatusFlags::OVERFLOW, false);
    Ok(())
}
