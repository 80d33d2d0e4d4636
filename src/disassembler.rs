//! 6502 Disassembler Module
//!
//! Converts binary machine code into human-readable assembly mnemonics.
//! Used for execution traces; it never touches emulated state, reading live
//! memory only through `MemoryBus::peek`.

pub mod decoder;
pub mod formatter;

pub use decoder::decode_instruction;
pub use formatter::{format_instruction, format_listing, format_registers};

use crate::addressing::AddressingMode;
use crate::MemoryBus;

/// A single disassembled instruction with full metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Memory address where this instruction starts
    pub address: u16,

    /// The opcode byte value (0x00-0xFF)
    pub opcode: u8,

    /// Instruction mnemonic (e.g., "LDA", "STA", "JMP"), or ".byte" for data
    pub mnemonic: &'static str,

    /// Addressing mode used by this instruction
    pub addressing_mode: AddressingMode,

    /// Operand bytes (0-2 bytes depending on addressing mode)
    pub operand_bytes: Vec<u8>,

    /// Total size in bytes (1-3 bytes: opcode + operands)
    pub size_bytes: u8,

    /// Base cycle cost (excluding page-crossing penalties)
    pub base_cycles: u8,
}

impl Instruction {
    /// A one-byte `.byte` directive for an undocumented opcode or a
    /// truncated instruction.
    fn data_byte(address: u16, byte: u8) -> Self {
        Self {
            address,
            opcode: byte,
            mnemonic: ".byte",
            addressing_mode: AddressingMode::Implicit,
            operand_bytes: Vec::new(),
            size_bytes: 1,
            base_cycles: 0,
        }
    }
}

/// Options controlling disassembly output
#[derive(Debug, Clone, Copy, Default)]
pub struct DisassemblyOptions {
    /// Address of the first byte, used for listing addresses and branch targets
    pub start_address: u16,
}

/// Disassemble a byte slice into a vector of instructions
///
/// Undocumented opcodes and trailing partial instructions become one-byte
/// `.byte` entries, so every input byte is accounted for.
///
/// # Examples
///
/// ```
/// use cpu6502::disassembler::{disassemble, format_instruction, DisassemblyOptions};
///
/// let options = DisassemblyOptions { start_address: 0x8000 };
/// let listing = disassemble(&[0xA9, 0x42, 0xD0, 0xFC, 0x02], options);
///
/// let text: Vec<String> = listing.iter().map(format_instruction).collect();
/// assert_eq!(text, vec!["LDA #$42", "BNE $8000", ".byte $02"]);
/// ```
pub fn disassemble(bytes: &[u8], options: DisassemblyOptions) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut offset = 0;
    let mut address = options.start_address;

    while offset < bytes.len() {
        let instr = decoder::decode_instruction(&bytes[offset..], address)
            .unwrap_or_else(|| Instruction::data_byte(address, bytes[offset]));

        offset += instr.size_bytes as usize;
        address = address.wrapping_add(instr.size_bytes as u16);
        instructions.push(instr);
    }

    instructions
}

/// Decodes the instruction at `address` in live memory without side effects.
pub fn disassemble_at<M: MemoryBus>(bus: &M, address: u16) -> Instruction {
    let bytes = [
        bus.peek(address),
        bus.peek(address.wrapping_add(1)),
        bus.peek(address.wrapping_add(2)),
    ];

    decoder::decode_instruction(&bytes, address)
        .unwrap_or_else(|| Instruction::data_byte(address, bytes[0]))
}
