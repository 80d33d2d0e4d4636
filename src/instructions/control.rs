//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - BRK: Force Interrupt
//! - JMP: Jump to address
//! - JSR / RTS: Subroutine call and return
//! - RTI: Return from interrupt
//! - NOP: No operation
//!
//! BRK is a software interrupt that:
//! 1. Pushes PC+2 to the stack (high byte first, then low byte)
//! 2. Pushes processor status to stack with B and bit 5 set
//! 3. Sets the I (interrupt disable) flag
//! 4. Loads PC from IRQ vector at $FFFE/F

use crate::cpu::IRQ_VECTOR;
use crate::{ExecutionError, MemoryBus, StatusFlags, CPU, OPCODE_TABLE};

/// Executes the BRK (Force Interrupt) instruction.
///
/// BRK is one byte long but pushes PC+2, so the byte after it is skipped
/// on return. The B flag exists only in the pushed copy of the status.
///
/// Cycle timing: 7 cycles (fixed)
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `opcode` - The opcode byte for this BRK instruction (0x00)
pub(crate) fn execute_brk<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let return_address = cpu.pc.wrapping_add(2);
    cpu.push_u16(return_address);

    let status = cpu.p.bits() | StatusFlags::BREAK | StatusFlags::UNUSED;
    cpu.push(status);

    cpu.p.set_interrupt_disable(true);
    cpu.pc = cpu.read_u16(IRQ_VECTOR);

    cpu.cycles += metadata.base_cycles as u64;
    Ok(())
}

/// Executes the JMP (Jump) instruction.
///
/// Addressing modes:
/// - Absolute (0x4C): JMP $1234 - Jump to address $1234
/// - Indirect (0x6C): JMP ($1234) - Jump to address stored at $1234/$1235
///
/// Cycle timing:
/// - Absolute: 3 cycles
/// - Indirect: 5 cycles
///
/// Note: The Indirect addressing mode reproduces the NMOS page bug:
/// JMP ($10FF) reads from $10FF and $1000 (not $1100).
pub(crate) fn execute_jmp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];

    cpu.pc = cpu.get_effective_address(metadata.addressing_mode);
    cpu.cycles += metadata.base_cycles as u64;

    Ok(())
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of the last byte of the JSR (PC+2), high byte first,
/// then jumps to the absolute target. 6 cycles.
pub(crate) fn execute_jsr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let target = cpu.get_effective_address(metadata.addressing_mode);
    let return_address = cpu.pc.wrapping_add(2);
    cpu.push_u16(return_address);

    cpu.pc = target;
    cpu.cycles += metadata.base_cycles as u64;

    Ok(())
}

/// Executes the RTS (Return from Subroutine) instruction.
///
/// Pulls the return address and resumes at the byte after it. 6 cycles.
pub(crate) fn execute_rts<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];

    cpu.pc = cpu.pull_u16().wrapping_add(1);
    cpu.cycles += metadata.base_cycles as u64;

    Ok(())
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls P (stored verbatim) then PC. Unlike RTS the pulled address is used
/// as is. 6 cycles.
pub(crate) fn execute_rti<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let status = cpu.pull();
    cpu.p = StatusFlags::from_bits(status);
    cpu.pc = cpu.pull_u16();
    cpu.cycles += metadata.base_cycles as u64;

    Ok(())
}

/// Executes the NOP (No Operation) instruction. 2 cycles.
pub(crate) fn execute_nop<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];
    cpu.retire(metadata, false);
    Ok(())
}
