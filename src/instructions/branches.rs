//! # Branch Instructions
//!
//! This module implements the eight conditional branches:
//! BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS.
//!
//! All branch instructions use relative addressing with a signed 8-bit offset
//! measured from the address of the next instruction.
//!
//! Cycle timing:
//! - 2 cycles if branch not taken
//! - 3 cycles if branch taken to same page
//! - 4 cycles if branch taken to different page
//!
//! No flags are affected.

use crate::{ExecutionError, MemoryBus, CPU, OPCODE_TABLE};

/// Common branch logic shared by all eight instructions.
fn branch_if<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8, condition: bool) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let offset = cpu.memory.read(cpu.pc.wrapping_add(1)) as i8;
    let pc_after_instruction = cpu.pc.wrapping_add(metadata.size_bytes as u16);
    let mut cycles = metadata.base_cycles as u64;

    if condition {
        let target_pc = pc_after_instruction.wrapping_add_signed(offset as i16);

        cycles += 1;
        if (pc_after_instruction & 0xFF00) != (target_pc & 0xFF00) {
            cycles += 1;
        }
        cpu.pc = target_pc;
    } else {
        cpu.pc = pc_after_instruction;
    }

    cpu.cycles += cycles;
}

/// Executes BCC (Branch if Carry Clear).
pub(crate) fn execute_bcc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let condition = !cpu.p.carry();
    branch_if(cpu, opcode, condition);
    Ok(())
}

/// Executes BCS (Branch if Carry Set).
pub(crate) fn execute_bcs<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let condition = cpu.p.carry();
    branch_if(cpu, opcode, condition);
    Ok(())
}

/// Executes BEQ (Branch if Equal, Z set).
pub(crate) fn execute_beq<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let condition = cpu.p.zero();
    branch_if(cpu, opcode, condition);
    Ok(())
}

/// Executes BNE (Branch if Not Equal, Z clear).
pub(crate) fn execute_bne<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let condition = !cpu.p.zero();
    branch_if(cpu, opcode, condition);
    Ok(())
}

/// Executes BMI (Branch if Minus, N set).
pub(crate) fn execute_bmi<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let condition = cpu.p.negative();
    branch_if(cpu, opcode, condition);
    Ok(())
}

/// Executes BPL (Branch if Plus, N clear).
pub(crate) fn execute_bpl<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let condition = !cpu.p.negative();
    branch_if(cpu, opcode, condition);
    Ok(())
}

/// Executes BVC (Branch if Overflow Clear).
pub(crate) fn execute_bvc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let condition = !cpu.p.overflow();
    branch_if(cpu, opcode, condition);
    Ok(())
}

/// Executes BVS (Branch if Overflow Set).
pub(crate) fn execute_bvs<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let condition = cpu.p.overflow();
    branch_if(cpu, opcode, condition);
    Ok(())
}
