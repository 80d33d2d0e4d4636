//! # Increment and Decrement Instructions
//!
//! - INC, DEC: Read-modify-write on memory
//! - INX, INY, DEX, DEY: Register increments and decrements
//!
//! All wrap modulo 256 and set Z and N from the result. The memory forms
//! never pay a page-crossing penalty; their AbsoluteX cost is fixed.

use crate::{ExecutionError, MemoryBus, CPU, OPCODE_TABLE};

fn modify_memory<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8, delta: i8) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let addr = cpu.get_effective_address(metadata.addressing_mode);
    let result = cpu.memory.read(addr).wrapping_add_signed(delta);
    cpu.memory.write(addr, result);
    cpu.p.set_nz(result);

    cpu.retire(metadata, false);
}

/// Executes the INC (Increment Memory) instruction.
pub(crate) fn execute_inc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    modify_memory(cpu, opcode, 1);
    Ok(())
}

/// Executes the DEC (Decrement Memory) instruction.
pub(crate) fn execute_dec<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    modify_memory(cpu, opcode, -1);
    Ok(())
}

/// Executes the INX (Increment X) instruction.
pub(crate) fn execute_inx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.p.set_nz(cpu.x);
    cpu.retire(&OPCODE_TABLE[opcode as usize], false);
    Ok(())
}

/// Executes the INY (Increment Y) instruction.
pub(crate) fn execute_iny<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.p.set_nz(cpu.y);
    cpu.retire(&OPCODE_TABLE[opcode as usize], false);
    Ok(())
}

/// Executes the DEX (Decrement X) instruction.
pub(crate) fn execute_dex<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.p.set_nz(cpu.x);
    cpu.retire(&OPCODE_TABLE[opcode as usize], false);
    Ok(())
}

/// Executes the DEY (Decrement Y) instruction.
pub(crate) fn execute_dey<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.p.set_nz(cpu.y);
    cpu.retire(&OPCODE_TABLE[opcode as usize], false);
    Ok(())
}
