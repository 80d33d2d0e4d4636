//! # Opcode Metadata Table
//!
//! The 256-entry table that decodes every opcode byte. It is the single
//! source of truth for mnemonics, addressing modes, base cycle costs and
//! instruction sizes; both the CPU dispatcher and the disassembler read it.
//!
//! The table covers:
//! - **151 documented instructions** - official NMOS 6502 opcodes
//! - **105 undocumented opcodes** - marked with the "???" mnemonic and
//!   rejected by the CPU as invalid

use crate::addressing::AddressingMode;
use crate::addressing::AddressingMode::*;

/// Metadata for a single 6502 opcode.
///
/// # Examples
///
/// ```
/// use cpu6502::{OPCODE_TABLE, AddressingMode};
///
/// // Look up LDA immediate (opcode 0xA9)
/// let lda_imm = &OPCODE_TABLE[0xA9];
/// assert_eq!(lda_imm.mnemonic, "LDA");
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes, 2);
/// assert!(lda_imm.is_legal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic (e.g., "LDA", "STA", "???" for illegal opcodes).
    pub mnemonic: &'static str,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Base cycle cost (before page crossing and branch penalties).
    ///
    /// Documented instructions cost 2-7 cycles; illegal opcodes are 0.
    pub base_cycles: u8,

    /// Total instruction size in bytes (opcode + operands, 1-3).
    pub size_bytes: u8,
}

impl OpcodeMetadata {
    /// Returns true for the 151 documented opcodes.
    pub const fn is_legal(&self) -> bool {
        self.base_cycles != 0
    }
}

const fn op(mnemonic: &'static str, addressing_mode: AddressingMode, base_cycles: u8) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic,
        addressing_mode,
        base_cycles,
        size_bytes: 1 + addressing_mode.operand_bytes(),
    }
}

const ILLEGAL: OpcodeMetadata = OpcodeMetadata {
    mnemonic: "???",
    addressing_mode: Implicit,
    base_cycles: 0,
    size_bytes: 1,
};

/// Complete 256-entry opcode metadata table indexed by opcode byte value.
///
/// Read-type instructions using AbsoluteX, AbsoluteY or IndirectY add one
/// cycle when the indexed address crosses a page; stores and
/// read-modify-write instructions already carry their worst-case cost here.
///
/// # Examples
///
/// ```
/// use cpu6502::OPCODE_TABLE;
///
/// let brk = &OPCODE_TABLE[0x00];
/// assert_eq!((brk.mnemonic, brk.base_cycles, brk.size_bytes), ("BRK", 7, 1));
///
/// let illegal = &OPCODE_TABLE[0x02];
/// assert_eq!(illegal.mnemonic, "???");
/// assert!(!illegal.is_legal());
/// ```
pub const OPCODE_TABLE: [OpcodeMetadata; 256] = [
    // 0x00
    op("BRK", Implicit, 7),
    op("ORA", IndirectX, 6),
    ILLEGAL,
    ILLEGAL,
    ILLEGAL,
    op("ORA", ZeroPage, 3),
    op("ASL", ZeroPage, 5),
    ILLEGAL,
    op("PHP", Implicit, 3),
    op("ORA", Immediate, 2),
    op("ASL", Accumulator, 2),
    ILLEGAL,
    ILLEGAL,
    op("ORA", Absolute, 4),
    op("ASL", Absolute, 6),
    ILLEGAL,
    // 0x10
    op("BPL", Relative, 2),
    op("ORA", IndirectY, 5),
    ILLEGAL,
    ILLEGAL,
    ILLEGAL,
    op("ORA", ZeroPageX, 4),
    op("ASL", ZeroPageX, 6),
    ILLEGAL,
    op("CLC", Implicit, 2),
    op("ORA", AbsoluteY, 4),
    ILLEGAL,
    ILLEGAL,
    ILLEGAL,
    op("ORA", AbsoluteX, 4),
    op("ASL", AbsoluteX, 7),
    ILLEGAL,
    // 0x20
    op("JSR", Absolute, 6),
    op("AND", IndirectX, 6),
    ILLEGAL,
    ILLEGAL,
    op("BIT", ZeroPage, 3),
    op("AND", ZeroPage, 3),
    op("ROL", ZeroPage, 5),
    ILLEGAL,
    op("PLP", Implicit, 4),
    op("AND", Immediate, 2),
    op("ROL", Accumulator, 2),
    ILLEGAL,
    op("BIT", Absolute, 4),
    op("AND", Absolute, 4),
    op("ROL", Absolute, 6),
    ILLEGAL,
    // 0x30
    op("BMI", Relative, 2),
    op("AND", IndirectY, 5),
    ILLEGAL,
    ILLEGAL,
    ILLEGAL,
    op("AND", ZeroPageX, 4),
    op("ROL", ZeroPageX, 6),
    ILLEGAL,
    op("SEC", Implicit, 2),
    op("AND", AbsoluteY, 4),
    ILLEGAL,
    ILLEGAL,
    ILLEGAL,
    op("AND", AbsoluteX, 4),
    op("ROL", AbsoluteX, 7),
    ILLEGAL,
    // 0x40
    op("RTI", Implicit, 6),
    op("EOR", IndirectX, 6),
    ILLEGAL,
    ILLEGAL,
    ILLEGAL,
    op("EOR", ZeroPage, 3),
    op("LSR", ZeroPage, 5),
    ILLEGAL,
    op("PHA", Implicit, 3),
    op("EOR", Immediate, 2),
    op("LSR", Accumulator, 2),
    ILLEGAL,
    op("JMP", Absolute, 3),
    op("EOR", Absolute, 4),
    op("LSR", Absolute, 6),
    ILLEGAL,
    // 0x50
    op("BVC", Relative, 2),
    op("EOR", IndirectY, 5),
    ILLEGAL,
    ILLEGAL,
    ILLEGAL,
    op("EOR", ZeroPageX, 4),
    op("LSR", ZeroPageX, 6),
    ILLEGAL,
    op("CLI", Implicit, 2),
    op("EOR", AbsoluteY, 4),
    ILLEGAL,
    ILLEGAL,
    ILLEGAL,
    op("EOR", AbsoluteX, 4),
    op("LSR", AbsoluteX, 7),
    ILLEGAL,
    // 0x60
    op("RTS", Implicit, 6),
    op("ADC", IndirectX, 6),
    ILLEGAL,
    ILLEGAL,
    ILLEGAL,
    op("ADC", ZeroPage, 3),
    op("ROR", ZeroPage, 5),
    ILLEGAL,
    op("PLA", Implicit, 4),
    op("ADC", Immediate, 2),
    op("ROR", Accumulator, 2),
    ILLEGAL,
    op("JMP", Indirect, 5),
    op("ADC", Absolute, 4),
    op("ROR", Absolute, 6),
    ILLEGAL,
    // 0x70
    op("BVS", Relative, 2),
    op("ADC", IndirectY, 5),
    ILLEGAL,
    ILLEGAL,
    ILLEGAL,
    op("ADC", ZeroPageX, 4),
    op("ROR", ZeroPageX, 6),
    ILLEGAL,
    op("SEI", Implicit, 2),
    op("ADC", AbsoluteY, 4),
    ILLEGAL,
    ILLEGAL,
    ILLEGAL,
    op("ADC", AbsoluteX, 4),
    op("ROR", AbsoluteX, 7),
    ILLEGAL,
    // 0x80
    ILLEGAL,
    op("STA", IndirectX, 6),
    ILLEGAL,
    ILLEGAL,
    op("STY", ZeroPage, 3),
    op("STA", ZeroPage, 3),
    op("STX", ZeroPage, 3),
    ILLEGAL,
    op("DEY", Implicit, 2),
    ILLEGAL,
    op("TXA", Implicit, 2),
    ILLEGAL,
    op("STY", Absolute, 4),
    op("STA", Absolute, 4),
    op("STX", Absolute, 4),
    ILLEGAL,
    // 0x90
    op("BCC", Relative, 2),
    op("STA", IndirectY, 6),
    ILLEGAL,
    ILLEGAL,
    op("STY", ZeroPageX, 4),
    op("STA", ZeroPageX, 4),
    op("STX", ZeroPageY, 4),
    ILLEGAL,
    op("TYA", Implicit, 2),
    op("STA", AbsoluteY, 5),
    op("TXS", Implicit, 2),
    ILLEGAL,
    ILLEGAL,
    op("STA", AbsoluteX, 5),
    ILLEGAL,
    ILLEGAL,
    // 0xA0
    op("LDY", Immediate, 2),
    op("LDA", IndirectX, 6),
    op("LDX", Immediate, 2),
    ILLEGAL,
    op("LDY", ZeroPage, 3),
    op("LDA", ZeroPage, 3),
    op("LDX", ZeroPage, 3),
    ILLEGAL,
    op("TAY", Implicit, 2),
    op("LDA", Immediate, 2),
    op("TAX", Implicit, 2),
    ILLEGAL,
    op("LDY", Absolute, 4),
    op("LDA", Absolute, 4),
    op("LDX", Absolute, 4),
    ILLEGAL,
    // 0xB0
    op("BCS", Relative, 2),
    op("LDA", IndirectY, 5),
    ILLEGAL,
    ILLEGAL,
    op("LDY", ZeroPageX, 4),
    op("LDA", ZeroPageX, 4),
    op("LDX", ZeroPageY, 4),
    ILLEGAL,
    op("CLV", Implicit, 2),
    op("LDA", AbsoluteY, 4),
    op("TSX", Implicit, 2),
    ILLEGAL,
    op("LDY", AbsoluteX, 4),
    op("LDA", AbsoluteX, 4),
    op("LDX", AbsoluteY, 4),
    ILLEGAL,
    // 0xC0
    op("CPY", Immediate, 2),
    op("CMP", IndirectX, 6),
    ILLEGAL,
    ILLEGAL,
    op("CPY", ZeroPage, 3),
    op("CMP", ZeroPage, 3),
    op("DEC", ZeroPage, 5),
    ILLEGAL,
    op("INY", Implicit, 2),
    op("CMP", Immediate, 2),
    op("DEX", Implicit, 2),
    ILLEGAL,
    op("CPY", Absolute, 4),
    op("CMP", Absolute, 4),
    op("DEC", Absolute, 6),
    ILLEGAL,
    // 0xD0
    op("BNE", Relative, 2),
    op("CMP", IndirectY, 5),
    ILLEGAL,
    ILLEGAL,
    ILLEGAL,
    op("CMP", ZeroPageX, 4),
    op("DEC", ZeroPageX, 6),
    ILLEGAL,
    op("CLD", Implicit, 2),
    op("CMP", AbsoluteY, 4),
    ILLEGAL,
    ILLEGAL,
    ILLEGAL,
    op("CMP", AbsoluteX, 4),
    op("DEC", AbsoluteX, 7),
    ILLEGAL,
    // 0xE0
    op("CPX", Immediate, 2),
    op("SBC", IndirectX, 6),
    ILLEGAL,
    ILLEGAL,
    op("CPX", ZeroPage, 3),
    op("SBC", ZeroPage, 3),
    op("INC", ZeroPage, 5),
    ILLEGAL,
    op("INX", Implicit, 2),
    op("SBC", Immediate, 2),
    op("NOP", Implicit, 2),
    ILLEGAL,
    op("CPX", Absolute, 4),
    op("SBC", Absolute, 4),
    op("INC", Absolute, 6),
    ILLEGAL,
    // 0xF0
    op("BEQ", Relative, 2),
    op("SBC", IndirectY, 5),
    ILLEGAL,
    ILLEGAL,
    ILLEGAL,
    op("SBC", ZeroPageX, 4),
    op("INC", ZeroPageX, 6),
    ILLEGAL,
    op("SED", Implicit, 2),
    op("SBC", AbsoluteY, 4),
    ILLEGAL,
    ILLEGAL,
    ILLEGAL,
    op("SBC", AbsoluteX, 4),
    op("INC", AbsoluteX, 7),
    ILLEGAL,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_opcode_count() {
        let legal = OPCODE_TABLE.iter().filter(|m| m.is_legal()).count();
        assert_eq!(legal, 151);
        assert!(OPCODE_TABLE
            .iter()
            .filter(|m| !m.is_legal())
            .all(|m| m.mnemonic == "???"));
    }

    #[test]
    fn test_sizes_follow_addressing_mode() {
        assert_eq!(OPCODE_TABLE[0x6C].size_bytes, 3); // JMP (ind)
        assert_eq!(OPCODE_TABLE[0xB1].size_bytes, 2); // LDA (zp),Y
        assert_eq!(OPCODE_TABLE[0x0A].size_bytes, 1); // ASL A
    }

    #[test]
    fn test_store_and_rmw_costs_are_fixed() {
        assert_eq!(OPCODE_TABLE[0x9D].base_cycles, 5); // STA abs,X
        assert_eq!(OPCODE_TABLE[0x99].base_cycles, 5); // STA abs,Y
        assert_eq!(OPCODE_TABLE[0x91].base_cycles, 6); // STA (zp),Y
        assert_eq!(OPCODE_TABLE[0xFE].base_cycles, 7); // INC abs,X
    }
}
