//! # Memory Bus Abstraction
//!
//! The `MemoryBus` trait decouples the CPU from the machine it runs in. A
//! machine implements it once for its address decoder; the CPU only ever
//! calls `read`, `write` and the interrupt-line queries.
//!
//! ## Design Principles
//!
//! The trait follows 6502 hardware behavior:
//! - No bus errors - every address is mapped (open bus)
//! - Reads may have side effects (IO registers that clear on read), so
//!   `read` takes `&mut self`; `peek` is the side-effect-free variant used by
//!   debuggers and disassemblers
//! - Writes to ROM/unmapped regions may be ignored
//! - Interrupt lines are levels the CPU samples before each instruction

/// Memory bus trait for CPU to read/write bytes.
///
/// # Examples
///
/// ```
/// use cpu6502::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
/// assert_eq!(mem.peek(0x1234), 0x42);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use cpu6502::MemoryBus;
///
/// struct RomRamMemory {
///     ram: [u8; 0x8000],  // 32KB RAM (0x0000-0x7FFF)
///     rom: [u8; 0x8000],  // 32KB ROM (0x8000-0xFFFF)
/// }
///
/// impl MemoryBus for RomRamMemory {
///     fn read(&mut self, addr: u16) -> u8 {
///         self.peek(addr)
///     }
///
///     fn peek(&self, addr: u16) -> u8 {
///         if addr < 0x8000 {
///             self.ram[addr as usize]
///         } else {
///             self.rom[(addr - 0x8000) as usize]
///         }
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         if addr < 0x8000 {
///             self.ram[addr as usize] = value;
///         }
///         // Writes to ROM (0x8000+) are silently ignored
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Reads a byte as the CPU would, including any read side effects.
    ///
    /// Must never panic. Unmapped addresses return whatever the bus floats to.
    fn read(&mut self, addr: u16) -> u8;

    /// Writes a byte. Must never panic; read-only or unmapped targets may
    /// drop the write.
    fn write(&mut self, addr: u16, value: u8);

    /// Reads a byte without triggering any device side effect.
    ///
    /// Used for disassembly and tracing, where observing memory must not
    /// change the machine.
    fn peek(&self, addr: u16) -> u8;

    /// Checks if the IRQ (Interrupt Request) line is asserted.
    ///
    /// The IRQ line is **level-sensitive**: the CPU services it before every
    /// instruction for as long as it stays asserted and the I flag is clear.
    ///
    /// Returns `false` by default for plain memories with no devices.
    fn irq_active(&self) -> bool {
        false
    }

    /// Checks the NMI (Non-Maskable Interrupt) line.
    ///
    /// NMI is **edge-triggered**: the CPU services it once each time this
    /// line goes from low to high.
    fn nmi_active(&self) -> bool {
        false
    }
}

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses are writable RAM initialized to 0x00. Useful for
/// tests, conformance images and anything that does not need a memory map.
///
/// # Examples
///
/// ```
/// use cpu6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
///
/// let cpu = CPU::new(memory);
/// assert_eq!(cpu.pc(), 0x8000);
/// ```
pub struct FlatMemory {
    /// 64KB contiguous memory array
    data: Box<[u8; 65536]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 65536]),
        }
    }

    /// Copies `bytes` into memory starting at `start`, wrapping at 0xFFFF.
    pub fn load(&mut self, start: u16, bytes: &[u8]) {
        let mut addr = start;
        for &byte in bytes {
            self.data[addr as usize] = byte;
            addr = addr.wrapping_add(1);
        }
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&mut self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }

    fn peek(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }
}
