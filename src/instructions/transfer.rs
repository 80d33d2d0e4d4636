//! # Register Transfer Instructions
//!
//! - TAX, TAY, TXA, TYA, TSX: Copy between registers, setting Z and N
//! - TXS: Copy X into the stack pointer, no flags affected
//!
//! All use implied addressing and take 2 cycles.

use crate::{ExecutionError, MemoryBus, CPU, OPCODE_TABLE};

/// Executes the TAX (Transfer Accumulator to X) instruction.
pub(crate) fn execute_tax<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    cpu.x = cpu.a;
    cpu.p.set_nz(cpu.x);
    cpu.retire(&OPCODE_TABLE[opcode as usize], false);
    Ok(())
}

/// Executes the TAY (Transfer Accumulator to Y) instruction.
pub(crate) fn execute_tay<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    cpu.y = cpu.a;
    cpu.p.set_nz(cpu.y);
    cpu.retire(&OPCODE_TABLE[opcode as usize], false);
    Ok(())
}

/// Executes the TXA (Transfer X to Accumulator) instruction.
pub(crate) fn execute_txa<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    cpu.a = cpu.x;
    cpu.p.set_nz(cpu.a);
    cpu.retire(&OPCODE_TABLE[opcode as usize], false);
    Ok(())
}

/// Executes the TYA (Transfer Y to Accumulator) instruction.
pub(crate) fn execute_tya<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    cpu.a = cpu.y;
    cpu.p.set_nz(cpu.a);
    cpu.retire(&OPCODE_TABLE[opcode as usize], false);
    Ok(())
}

/// Executes the TSX (Transfer Stack Pointer to X) instruction.
pub(crate) fn execute_tsx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    cpu.x = cpu.sp;
    cpu.p.set_nz(cpu.x);
    cpu.retire(&OPCODE_TABLE[opcode as usize], false);
    Ok(())
}

/// Executes the TXS (Transfer X to Stack Pointer) instruction.
///
/// Unlike the other transfers, TXS leaves the flags untouched.
pub(crate) fn execute_txs<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    cpu.sp = cpu.x;
    cpu.retire(&OPCODE_TABLE[opcode as usize], false);
    Ok(())
}
