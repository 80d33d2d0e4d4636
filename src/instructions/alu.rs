//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC: Add with Carry
//! - SBC: Subtract with Borrow
//! - AND, ORA, EOR: Bitwise logic on the accumulator
//! - CMP, CPX, CPY: Register comparisons
//! - BIT: Bit test
//!
//! Arithmetic is binary only. The D flag is stored and restored but never
//! changes how ADC or SBC compute their result.
//!
//! All read-type addressing modes charge one extra cycle when indexing
//! crosses a page boundary.

use crate::{ExecutionError, MemoryBus, CPU, OPCODE_TABLE};

/// Adds `value` and the carry flag to the accumulator, setting N, V, Z and C.
///
/// Overflow occurs when both operands share a sign and the result does not:
/// `V = (A ^ result) & (M ^ result) & 0x80`.
fn add_with_carry<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.a;
    let sum = a as u16 + value as u16 + cpu.p.carry() as u16;
    let result = sum as u8;

    cpu.p.set_carry(sum > 0xFF);
    cpu.p.set_overflow((a ^ result) & (value ^ result) & 0x80 != 0);
    cpu.p.set_nz(result);
    cpu.a = result;
}

/// Executes the ADC (Add with Carry) instruction.
///
/// Adds the value at the effective address plus the carry flag to the
/// accumulator. Updates N, V, Z and C.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `opcode` - The opcode byte for this ADC instruction
pub(crate) fn execute_adc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (value, page_crossed) = cpu.get_operand_value(metadata.addressing_mode);

    add_with_carry(cpu, value);

    cpu.retire(metadata, page_crossed);
    Ok(())
}

/// Executes the SBC (Subtract with Borrow) instruction.
///
/// `A - M - (1 - C)` is computed as `A + !M + C`, so carry set after the
/// operation means no borrow occurred.
pub(crate) fn execute_sbc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (value, page_crossed) = cpu.get_operand_value(metadata.addressing_mode);

    add_with_carry(cpu, !value);

    cpu.retire(metadata, page_crossed);
    Ok(())
}

/// Executes the AND (Logical AND) instruction.
///
/// Performs a bitwise AND between the accumulator and the operand.
/// Updates Z and N flags.
pub(crate) fn execute_and<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (value, page_crossed) = cpu.get_operand_value(metadata.addressing_mode);

    cpu.a &= value;
    cpu.p.set_nz(cpu.a);

    cpu.retire(metadata, page_crossed);
    Ok(())
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(crate) fn execute_ora<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (value, page_crossed) = cpu.get_operand_value(metadata.addressing_mode);

    cpu.a |= value;
    cpu.p.set_nz(cpu.a);

    cpu.retire(metadata, page_crossed);
    Ok(())
}

/// Executes the EOR (Exclusive OR) instruction.
pub(crate) fn execute_eor<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (value, page_crossed) = cpu.get_operand_value(metadata.addressing_mode);

    cpu.a ^= value;
    cpu.p.set_nz(cpu.a);

    cpu.retire(metadata, page_crossed);
    Ok(())
}

/// Shared compare: C = register >= M, Z = register == M, N = bit 7 of the difference.
fn compare<M: MemoryBus>(cpu: &mut CPU<M>, register: u8, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (value, page_crossed) = cpu.get_operand_value(metadata.addressing_mode);

    cpu.p.set_carry(register >= value);
    cpu.p.set_nz(register.wrapping_sub(value));

    cpu.retire(metadata, page_crossed);
}

/// Executes the CMP (Compare Accumulator) instruction.
pub(crate) fn execute_cmp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let register = cpu.a;
    compare(cpu, register, opcode);
    Ok(())
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn execute_cpx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let register = cpu.x;
    compare(cpu, register, opcode);
    Ok(())
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn execute_cpy<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let register = cpu.y;
    compare(cpu, register, opcode);
    Ok(())
}

/// Executes the BIT (Bit Test) instruction.
///
/// Z is set from `A & M`; N and V are copied from bits 7 and 6 of the operand.
/// The accumulator is not modified.
pub(crate) fn execute_bit<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (value, page_crossed) = cpu.get_operand_value(metadata.addressing_mode);

    cpu.p.set_zero(cpu.a & value == 0);
    cpu.p.set_negative(value & 0x80 != 0);
    cpu.p.set_overflow(value & 0x40 != 0);

    cpu.retire(metadata, page_crossed);
    Ok(())
}
