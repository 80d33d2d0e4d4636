//! # Shift and Rotate Instructions
//!
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left through carry
//! - ROR: Rotate Right through carry
//!
//! Each has an Accumulator form and read-modify-write memory forms. C receives
//! the bit shifted out; Z and N are set from the result.

use crate::{AddressingMode, ExecutionError, MemoryBus, CPU, OPCODE_TABLE};

/// Applies `op` to the accumulator or the memory operand.
///
/// `op` takes the input byte and the current carry and returns the result
/// and the new carry.
fn shift_with<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8, op: fn(u8, bool) -> (u8, bool)) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let carry_in = cpu.p.carry();

    let result = if metadata.addressing_mode == AddressingMode::Accumulator {
        let (result, carry_out) = op(cpu.a, carry_in);
        cpu.a = result;
        cpu.p.set_carry(carry_out);
        result
    } else {
        let addr = cpu.get_effective_address(metadata.addressing_mode);
        let (result, carry_out) = op(cpu.memory.read(addr), carry_in);
        cpu.memory.write(addr, result);
        cpu.p.set_carry(carry_out);
        result
    };

    cpu.p.set_nz(result);
    cpu.retire(metadata, false);
}

/// Executes the ASL (Arithmetic Shift Left) instruction.
///
/// # Examples
///
/// ```
/// use cpu6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
/// memory.write(0x8000, 0x0A); // ASL A
///
/// let mut cpu = CPU::new(memory);
/// cpu.set_a(0x81);
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.a(), 0x02);
/// assert!(cpu.flag_c());
/// assert_eq!(cpu.cycles(), 2);
/// ```
pub(crate) fn execute_asl<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    shift_with(cpu, opcode, |value, _| (value << 1, value & 0x80 != 0));
    Ok(())
}

/// Executes the LSR (Logical Shift Right) instruction. N is always cleared.
pub(crate) fn execute_lsr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    shift_with(cpu, opcode, |value, _| (value >> 1, value & 0x01 != 0));
    Ok(())
}

/// Executes the ROL (Rotate Left) instruction.
pub(crate) fn execute_rol<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    shift_with(cpu, opcode, |value, carry| {
        ((value << 1) | carry as u8, value & 0x80 != 0)
    });
    Ok(())
}

/// Executes the ROR (Rotate Right) instruction.
pub(crate) fn execute_ror<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    shift_with(cpu, opcode, |value, carry| {
        ((value >> 1) | ((carry as u8) << 7), value & 0x01 != 0)
    });
    Ok(())
}
