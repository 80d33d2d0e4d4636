//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 6502 processor state and
//! the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status flags**: packed NV-BDIZC byte (`StatusFlags`)
//! - **Cycle counter**: u64 monotonically increasing cycle count
//! - **Interrupt lines**: RESET and IRQ levels, a pending NMI edge
//!
//! ## Execution Model
//!
//! `step()` performs exactly one unit of work, in hardware priority order:
//!
//! 1. RESET asserted: reload PC from 0xFFFC, P = 0x20, S = 0xFF (0 cycles)
//! 2. NMI pending: push PC and P, vector through 0xFFFA (7 cycles, one-shot)
//! 3. IRQ asserted and I clear: push PC and P, set I, vector through 0xFFFE (7 cycles)
//! 4. Otherwise fetch, decode and execute one instruction

use crate::instructions::{
    alu, branches, control, flags, inc_dec, load_store, shifts, stack, transfer,
};
use crate::{AddressingMode, ExecutionError, MemoryBus, OpcodeMetadata, StatusFlags, OPCODE_TABLE};
use log::{debug, trace};

/// NMI vector location.
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Reset vector location.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// IRQ/BRK vector location.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Cycles taken to service an NMI or IRQ.
const INTERRUPT_CYCLES: u64 = 7;

/// 6502 CPU state and execution context.
///
/// The CPU owns its memory bus; machines reach their devices through
/// `memory()` / `memory_mut()`.
///
/// # Type Parameters
///
/// * `M` - Memory bus implementation (must implement `MemoryBus` trait)
///
/// # Examples
///
/// ```
/// use cpu6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00); // Low byte
/// memory.write(0xFFFD, 0x80); // High byte (PC = 0x8000)
///
/// let cpu = CPU::new(memory);
///
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFF);
/// assert_eq!(cpu.status(), 0x20);
/// assert_eq!(cpu.cycles(), 0);
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    /// Processor status register
    pub(crate) p: StatusFlags,

    /// Total CPU cycles executed
    pub(crate) cycles: u64,

    /// RESET line level, driven by `set_reset`
    reset_line: bool,

    /// IRQ line level driven by `set_irq`; OR-ed with the bus IRQ line
    irq_line: bool,

    /// NMI edge waiting to be serviced
    nmi_pending: bool,

    /// Bus NMI level seen on the previous step, for edge detection
    nmi_level: bool,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU with the given memory bus.
    ///
    /// The CPU starts in the same state a reset step leaves it in: PC loaded
    /// from the reset vector (little-endian), P = 0x20, S = 0xFF, A/X/Y zero
    /// and the cycle counter at 0.
    pub fn new(mut memory: M) -> Self {
        let lo = memory.read(RESET_VECTOR) as u16;
        let hi = memory.read(RESET_VECTOR.wrapping_add(1)) as u16;

        Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            pc: (hi << 8) | lo,
            sp: 0xFF,
            p: StatusFlags::from_bits(StatusFlags::UNUSED),
            cycles: 0,
            reset_line: false,
            irq_line: false,
            nmi_pending: false,
            nmi_level: false,
            memory,
        }
    }

    /// Executes one instruction, or services one pending RESET/NMI/IRQ.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the step completed
    /// - `Err(ExecutionError::InvalidOpcode(opcode))` if the byte at PC is not a
    ///   documented opcode; PC and the cycle counter are left unchanged
    ///
    /// # Examples
    ///
    /// ```
    /// use cpu6502::{CPU, FlatMemory, MemoryBus, ExecutionError};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    /// mem.write(0x8000, 0xEA); // NOP
    /// mem.write(0x8001, 0x02); // undocumented
    ///
    /// let mut cpu = CPU::new(mem);
    ///
    /// assert_eq!(cpu.step(), Ok(()));
    /// assert_eq!(cpu.step(), Err(ExecutionError::InvalidOpcode(0x02)));
    /// assert_eq!(cpu.pc(), 0x8001);
    /// ```
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        if self.reset_line {
            self.load_reset_state();
            return Ok(());
        }

        let nmi_level = self.memory.nmi_active();
        if nmi_level && !self.nmi_level {
            self.nmi_pending = true;
        }
        self.nmi_level = nmi_level;

        if self.nmi_pending {
            self.nmi_pending = false;
            trace!("NMI at {:04X}", self.pc);
            self.service_interrupt(NMI_VECTOR);
            return Ok(());
        }

        if self.irq_asserted() && !self.p.interrupt_disable() {
            trace!("IRQ at {:04X}", self.pc);
            self.service_interrupt(IRQ_VECTOR);
            self.p.set_interrupt_disable(true);
            return Ok(());
        }

        let opcode = self.memory.read(self.pc);
        if !OPCODE_TABLE[opcode as usize].is_legal() {
            debug!("invalid opcode ${:02X} at {:04X}", opcode, self.pc);
            return Err(ExecutionError::InvalidOpcode(opcode));
        }
        self.execute(opcode)
    }

    /// Runs the CPU for at least `cycle_budget` cycles.
    ///
    /// Returns the number of cycles actually consumed, which may overshoot the
    /// budget by up to one instruction.
    ///
    /// # Examples
    ///
    /// ```
    /// use cpu6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    /// for addr in 0x8000..0x8010 {
    ///     mem.write(addr, 0xEA); // NOP, 2 cycles
    /// }
    ///
    /// let mut cpu = CPU::new(mem);
    /// assert_eq!(cpu.run_for_cycles(10), Ok(10));
    /// assert_eq!(cpu.pc(), 0x8005);
    /// ```
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles + cycle_budget;

        while self.cycles < target_cycles {
            self.step()?;
        }

        Ok(self.cycles - start_cycles)
    }

    // ========== Interrupt Lines ==========

    /// Drives the RESET line.
    ///
    /// While asserted every `step()` reloads the reset vector and costs no
    /// cycles. Pulse it: assert, step once, release.
    pub fn set_reset(&mut self, asserted: bool) {
        self.reset_line = asserted;
    }

    /// Pulses the RESET line: assert, one reset step, release.
    ///
    /// Equivalent to `set_reset(true)`, `step()`, `set_reset(false)`.
    pub fn reset(&mut self) {
        self.load_reset_state();
        self.reset_line = false;
    }

    /// Latches a non-maskable interrupt, serviced on the next step.
    pub fn trigger_nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Drives the external IRQ line (level-triggered).
    ///
    /// The effective IRQ input is this level OR the bus's `irq_active()`.
    pub fn set_irq(&mut self, asserted: bool) {
        self.irq_line = asserted;
    }

    /// Returns true if either the external or the bus IRQ line is asserted.
    pub fn irq_asserted(&self) -> bool {
        self.irq_line || self.memory.irq_active()
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register as a packed byte.
    pub fn status(&self) -> u8 {
        self.p.bits()
    }

    /// Returns the status register.
    pub fn flags(&self) -> StatusFlags {
        self.p
    }

    /// Returns the total number of CPU cycles executed since construction.
    ///
    /// The counter only ever increases; reset steps do not clear it.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn flag_n(&self) -> bool {
        self.p.negative()
    }

    pub fn flag_v(&self) -> bool {
        self.p.overflow()
    }

    pub fn flag_b(&self) -> bool {
        self.p.break_flag()
    }

    pub fn flag_d(&self) -> bool {
        self.p.decimal()
    }

    pub fn flag_i(&self) -> bool {
        self.p.interrupt_disable()
    }

    pub fn flag_z(&self) -> bool {
        self.p.zero()
    }

    pub fn flag_c(&self) -> bool {
        self.p.carry()
    }

    // ========== Register Setters ==========

    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Overwrites the whole status register.
    pub fn set_status(&mut self, value: u8) {
        self.p = StatusFlags::from_bits(value);
    }

    pub fn set_flag_n(&mut self, value: bool) {
        self.p.set_negative(value);
    }

    pub fn set_flag_v(&mut self, value: bool) {
        self.p.set_overflow(value);
    }

    pub fn set_flag_d(&mut self, value: bool) {
        self.p.set_decimal(value);
    }

    pub fn set_flag_i(&mut self, value: bool) {
        self.p.set_interrupt_disable(value);
    }

    pub fn set_flag_z(&mut self, value: bool) {
        self.p.set_zero(value);
    }

    pub fn set_flag_c(&mut self, value: bool) {
        self.p.set_carry(value);
    }

    // ========== Memory Access ==========

    /// Returns a shared reference to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    // ========== Internal Helpers ==========

    fn execute(&mut self, opcode: u8) -> Result<(), ExecutionError> {
        match OPCODE_TABLE[opcode as usize].mnemonic {
            "ADC" => alu::execute_adc(self, opcode),
            "SBC" => alu::execute_sbc(self, opcode),
            "AND" => alu::execute_and(self, opcode),
            "ORA" => alu::execute_ora(self, opcode),
            "EOR" => alu::execute_eor(self, opcode),
            "CMP" => alu::execute_cmp(self, opcode),
            "CPX" => alu::execute_cpx(self, opcode),
            "CPY" => alu::execute_cpy(self, opcode),
            "BIT" => alu::execute_bit(self, opcode),
            "BCC" => branches::execute_bcc(self, opcode),
            "BCS" => branches::execute_bcs(self, opcode),
            "BEQ" => branches::execute_beq(self, opcode),
            "BNE" => branches::execute_bne(self, opcode),
            "BMI" => branches::execute_bmi(self, opcode),
            "BPL" => branches::execute_bpl(self, opcode),
            "BVC" => branches::execute_bvc(self, opcode),
            "BVS" => branches::execute_bvs(self, opcode),
            "BRK" => control::execute_brk(self, opcode),
            "JMP" => control::execute_jmp(self, opcode),
            "JSR" => control::execute_jsr(self, opcode),
            "RTS" => control::execute_rts(self, opcode),
            "RTI" => control::execute_rti(self, opcode),
            "NOP" => control::execute_nop(self, opcode),
            "CLC" => flags::execute_clc(self, opcode),
            "SEC" => flags::execute_sec(self, opcode),
            "CLI" => flags::execute_cli(self, opcode),
            "SEI" => flags::execute_sei(self, opcode),
            "CLD" => flags::execute_cld(self, opcode),
            "SED" => flags::execute_sed(self, opcode),
            "CLV" => flags::execute_clv(self, opcode),
            "INC" => inc_dec::execute_inc(self, opcode),
            "DEC" => inc_dec::execute_dec(self, opcode),
            "INX" => inc_dec::execute_inx(self, opcode),
            "INY" => inc_dec::execute_iny(self, opcode),
            "DEX" => inc_dec::execute_dex(self, opcode),
            "DEY" => inc_dec::execute_dey(self, opcode),
            "LDA" => load_store::execute_lda(self, opcode),
            "LDX" => load_store::execute_ldx(self, opcode),
            "LDY" => load_store::execute_ldy(self, opcode),
            "STA" => load_store::execute_sta(self, opcode),
            "STX" => load_store::execute_stx(self, opcode),
            "STY" => load_store::execute_sty(self, opcode),
            "ASL" => shifts::execute_asl(self, opcode),
            "LSR" => shifts::execute_lsr(self, opcode),
            "ROL" => shifts::execute_rol(self, opcode),
            "ROR" => shifts::execute_ror(self, opcode),
            "PHA" => stack::execute_pha(self, opcode),
            "PHP" => stack::execute_php(self, opcode),
            "PLA" => stack::execute_pla(self, opcode),
            "PLP" => stack::execute_plp(self, opcode),
            "TAX" => transfer::execute_tax(self, opcode),
            "TAY" => transfer::execute_tay(self, opcode),
            "TXA" => transfer::execute_txa(self, opcode),
            "TYA" => transfer::execute_tya(self, opcode),
            "TSX" => transfer::execute_tsx(self, opcode),
            "TXS" => transfer::execute_txs(self, opcode),
            _ => Err(ExecutionError::InvalidOpcode(opcode)),
        }
    }

    fn load_reset_state(&mut self) {
        self.pc = self.read_u16(RESET_VECTOR);
        self.p = StatusFlags::from_bits(StatusFlags::UNUSED);
        self.sp = 0xFF;
    }

    /// Pushes PC and P (bit 5 set, B clear) and jumps through `vector`.
    fn service_interrupt(&mut self, vector: u16) {
        self.push_u16(self.pc);
        let status = (self.p.bits() | StatusFlags::UNUSED) & !StatusFlags::BREAK;
        self.push(status);
        self.pc = self.read_u16(vector);
        self.cycles += INTERRUPT_CYCLES;
    }

    /// Reads a little-endian word.
    pub(crate) fn read_u16(&mut self, addr: u16) -> u16 {
        let lo = self.memory.read(addr) as u16;
        let hi = self.memory.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Reads a little-endian pointer from page zero, wrapping within the page.
    fn read_u16_zero_page(&mut self, zp: u8) -> u16 {
        let lo = self.memory.read(zp as u16) as u16;
        let hi = self.memory.read(zp.wrapping_add(1) as u16) as u16;
        (hi << 8) | lo
    }

    pub(crate) fn push(&mut self, value: u8) {
        self.memory.write(0x0100 | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    pub(crate) fn pull(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.memory.read(0x0100 | self.sp as u16)
    }

    /// Pushes a word high byte first, as JSR and interrupts do.
    pub(crate) fn push_u16(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push(value as u8);
    }

    pub(crate) fn pull_u16(&mut self) -> u16 {
        let lo = self.pull() as u16;
        let hi = self.pull() as u16;
        (hi << 8) | lo
    }

    /// Computes the effective address of the current instruction's operand.
    ///
    /// Returns the address and whether indexing carried into the next page.
    /// Immediate operands resolve to the operand byte itself; Implicit and
    /// Accumulator have no memory operand and resolve to PC.
    pub(crate) fn resolve_address(&mut self, mode: AddressingMode) -> (u16, bool) {
        let operand = self.pc.wrapping_add(1);

        match mode {
            AddressingMode::Implicit | AddressingMode::Accumulator => (self.pc, false),
            AddressingMode::Immediate | AddressingMode::Relative => (operand, false),
            AddressingMode::ZeroPage => (self.memory.read(operand) as u16, false),
            AddressingMode::ZeroPageX => {
                let base = self.memory.read(operand);
                (base.wrapping_add(self.x) as u16, false)
            }
            AddressingMode::ZeroPageY => {
                let base = self.memory.read(operand);
                (base.wrapping_add(self.y) as u16, false)
            }
            AddressingMode::Absolute => (self.read_u16(operand), false),
            AddressingMode::AbsoluteX => {
                let base = self.read_u16(operand);
                Self::indexed(base, self.x)
            }
            AddressingMode::AbsoluteY => {
                let base = self.read_u16(operand);
                Self::indexed(base, self.y)
            }
            AddressingMode::Indirect => {
                // Pointer high byte is fetched from the same page when the
                // pointer sits at $xxFF.
                let ptr = self.read_u16(operand);
                let lo = self.memory.read(ptr) as u16;
                let hi = self.memory.read((ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF)) as u16;
                ((hi << 8) | lo, false)
            }
            AddressingMode::IndirectX => {
                let zp = self.memory.read(operand).wrapping_add(self.x);
                (self.read_u16_zero_page(zp), false)
            }
            AddressingMode::IndirectY => {
                let zp = self.memory.read(operand);
                let base = self.read_u16_zero_page(zp);
                Self::indexed(base, self.y)
            }
        }
    }

    fn indexed(base: u16, index: u8) -> (u16, bool) {
        let addr = base.wrapping_add(index as u16);
        (addr, (base & 0xFF00) != (addr & 0xFF00))
    }

    /// Effective address for instructions that never pay a page-cross penalty.
    pub(crate) fn get_effective_address(&mut self, mode: AddressingMode) -> u16 {
        self.resolve_address(mode).0
    }

    /// Reads the operand value and reports whether a page was crossed.
    pub(crate) fn get_operand_value(&mut self, mode: AddressingMode) -> (u8, bool) {
        let (addr, page_crossed) = self.resolve_address(mode);
        (self.memory.read(addr), page_crossed)
    }

    /// Charges the instruction's cycles and moves PC past it.
    pub(crate) fn retire(&mut self, metadata: &OpcodeMetadata, page_crossed: bool) {
        self.cycles += metadata.base_cycles as u64 + page_crossed as u64;
        self.pc = self.pc.wrapping_add(metadata.size_bytes as u16);
    }
}
