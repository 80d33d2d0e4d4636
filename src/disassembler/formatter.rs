//! Formatting functions for disassembled instructions and CPU state

use crate::addressing::AddressingMode;
use crate::disassembler::Instruction;
use crate::{MemoryBus, CPU};

/// Format a single instruction as assembly text
///
/// Relative branches show their absolute target address.
pub fn format_instruction(instr: &Instruction) -> String {
    let operand = format_operand(instr);

    if operand.is_empty() {
        instr.mnemonic.to_string()
    } else {
        format!("{} {}", instr.mnemonic, operand)
    }
}

/// Format an instruction as a listing line: address, raw bytes, assembly.
///
/// ```
/// use cpu6502::disassembler::{decode_instruction, format_listing};
///
/// let instr = decode_instruction(&[0xA9, 0x42], 0x8000).unwrap();
/// assert_eq!(format_listing(&instr), "8000: A9 42     LDA #$42");
/// ```
pub fn format_listing(instr: &Instruction) -> String {
    let raw = std::iter::once(instr.opcode)
        .chain(instr.operand_bytes.iter().copied())
        .map(|byte| format!("{:02X}", byte))
        .collect::<Vec<_>>()
        .join(" ");

    format!("{:04X}: {:<10}{}", instr.address, raw, format_instruction(instr))
}

/// Format the register file as `A=00 X=00 Y=00 S=FF NV-BDIZC`.
pub fn format_registers<M: MemoryBus>(cpu: &CPU<M>) -> String {
    format!(
        "A={:02X} X={:02X} Y={:02X} S={:02X} {}",
        cpu.a(),
        cpu.x(),
        cpu.y(),
        cpu.sp(),
        cpu.flags()
    )
}

fn format_operand(instr: &Instruction) -> String {
    use AddressingMode::*;

    if instr.mnemonic == ".byte" {
        return format!("${:02X}", instr.opcode);
    }

    let byte = instr.operand_bytes.first().copied().unwrap_or(0);
    let word = match instr.operand_bytes.as_slice() {
        [lo, hi, ..] => u16::from_le_bytes([*lo, *hi]),
        _ => byte as u16,
    };

    match instr.addressing_mode {
        Implicit => String::new(),
        Accumulator => "A".to_string(),
        Immediate => format!("#${:02X}", byte),
        ZeroPage => format!("${:02X}", byte),
        ZeroPageX => format!("${:02X},X", byte),
        ZeroPageY => format!("${:02X},Y", byte),
        Relative => {
            let target = instr
                .address
                .wrapping_add(2)
                .wrapping_add_signed(byte as i8 as i16);
            format!("${:04X}", target)
        }
        Absolute => format!("${:04X}", word),
        AbsoluteX => format!("${:04X},X", word),
        AbsoluteY => format!("${:04X},Y", word),
        Indirect => format!("(${:04X})", word),
        IndirectX => format!("(${:02X},X)", byte),
        IndirectY => format!("(${:02X}),Y", byte),
    }
}
