//! # Addressing Modes
//!
//! The 13 ways a 6502 instruction can locate its operand.

/// 6502 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction (CLC, RTS, NOP).
    Implicit,

    /// Operates directly on the accumulator (LSR A, ROL A).
    Accumulator,

    /// 8-bit constant operand (LDA #$10).
    Immediate,

    /// 8-bit address in page zero (LDA $80).
    ZeroPage,

    /// Zero page address plus X, wrapping within page zero (LDA $80,X).
    ZeroPageX,

    /// Zero page address plus Y, wrapping within page zero (LDX $80,Y).
    ZeroPageY,

    /// Signed 8-bit offset from the next instruction, used by branches.
    Relative,

    /// Full 16-bit address (JMP $1234).
    Absolute,

    /// 16-bit address plus X. Reads pay +1 cycle on a page crossing.
    AbsoluteX,

    /// 16-bit address plus Y. Reads pay +1 cycle on a page crossing.
    AbsoluteY,

    /// JMP through a 16-bit pointer, with the page-wrap quirk.
    Indirect,

    /// (ZP + X) then dereference (LDA ($40,X)).
    IndirectX,

    /// ZP dereference then + Y (LDA ($40),Y). Reads pay +1 cycle on a page crossing.
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes that follow the opcode.
    ///
    /// ```
    /// use cpu6502::AddressingMode;
    ///
    /// assert_eq!(AddressingMode::Implicit.operand_bytes(), 0);
    /// assert_eq!(AddressingMode::IndirectY.operand_bytes(), 1);
    /// assert_eq!(AddressingMode::AbsoluteX.operand_bytes(), 2);
    /// ```
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}
