//! # Load and Store Instructions
//!
//! - LDA, LDX, LDY: Load a register from memory, setting Z and N
//! - STA, STX, STY: Store a register to memory, no flags affected
//!
//! Loads pay +1 cycle when indexed addressing crosses a page. Stores never
//! do: their indexed forms already include the fix-up cycle in the base cost.

use crate::{ExecutionError, MemoryBus, CPU, OPCODE_TABLE};

/// Executes the LDA (Load Accumulator) instruction.
///
/// # Examples
///
/// ```
/// use cpu6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
/// memory.write(0x8000, 0xBD); // LDA $12FF,X
/// memory.write(0x8001, 0xFF);
/// memory.write(0x8002, 0x12);
/// memory.write(0x1300, 0x80);
///
/// let mut cpu = CPU::new(memory);
/// cpu.set_x(0x01);
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.a(), 0x80);
/// assert!(cpu.flag_n());
/// assert_eq!(cpu.cycles(), 5); // 4 + 1 for the page crossing
/// ```
pub(crate) fn execute_lda<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (value, page_crossed) = cpu.get_operand_value(metadata.addressing_mode);

    cpu.a = value;
    cpu.p.set_nz(value);

    cpu.retire(metadata, page_crossed);
    Ok(())
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (value, page_crossed) = cpu.get_operand_value(metadata.addressing_mode);

    cpu.x = value;
    cpu.p.set_nz(value);

    cpu.retire(metadata, page_crossed);
    Ok(())
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let (value, page_crossed) = cpu.get_operand_value(metadata.addressing_mode);

    cpu.y = value;
    cpu.p.set_nz(value);

    cpu.retire(metadata, page_crossed);
    Ok(())
}

fn store<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8, value: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];

    let addr = cpu.get_effective_address(metadata.addressing_mode);
    cpu.memory.write(addr, value);

    cpu.retire(metadata, false);
}

/// Executes the STA (Store Accumulator) instruction.
pub(crate) fn execute_sta<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let value = cpu.a;
    store(cpu, opcode, value);
    Ok(())
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn execute_stx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let value = cpu.x;
    store(cpu, opcode, value);
    Ok(())
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn execute_sty<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let value = cpu.y;
    store(cpu, opcode, value);
    Ok(())
}
