//! Memory bus trait tests
//!
//! Verifies FlatMemory and the side-effect contract between `read` and
//! `peek` that devices rely on.

use cpu6502::{FlatMemory, MemoryBus, CPU};

#[test]
fn test_flat_memory_starts_zeroed() {
    let memory = FlatMemory::new();

    for addr in [0x0000, 0x1234, 0x8000, 0xFFFF] {
        assert_eq!(memory.peek(addr), 0x00, "address {:04X}", addr);
    }
}

#[test]
fn test_flat_memory_read_write() {
    let mut memory = FlatMemory::default();

    for (addr, value) in [(0x0000, 0x01), (0x00FF, 0xFF), (0x0100, 0x7F), (0xFFFF, 0xCD)] {
        memory.write(addr, value);
        assert_eq!(memory.read(addr), value);
        assert_eq!(memory.peek(addr), value);
    }
}

#[test]
fn test_flat_memory_load_wraps_at_top() {
    let mut memory = FlatMemory::new();
    memory.load(0xFFFE, &[0x11, 0x22, 0x33]);

    assert_eq!(memory.peek(0xFFFE), 0x11);
    assert_eq!(memory.peek(0xFFFF), 0x22);
    assert_eq!(memory.peek(0x0000), 0x33);
}

#[test]
fn test_flat_memory_has_no_interrupts() {
    let memory = FlatMemory::new();
    assert!(!memory.irq_active());
    assert!(!memory.nmi_active());
}

/// A bus with one register that counts how often the CPU reads it.
struct CountingBus {
    ram: Box<[u8; 0x10000]>,
    reads_of_register: u32,
}

const REGISTER: u16 = 0xD000;

impl MemoryBus for CountingBus {
    fn read(&mut self, addr: u16) -> u8 {
        if addr == REGISTER {
            self.reads_of_register += 1;
        }
        self.ram[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.ram[addr as usize] = value;
    }

    fn peek(&self, addr: u16) -> u8 {
        self.ram[addr as usize]
    }
}

fn counting_cpu(program: &[u8]) -> CPU<CountingBus> {
    let mut ram = Box::new([0u8; 0x10000]);
    ram[0x8000..0x8000 + program.len()].copy_from_slice(program);
    ram[0xFFFC] = 0x00;
    ram[0xFFFD] = 0x80;
    CPU::new(CountingBus {
        ram,
        reads_of_register: 0,
    })
}

#[test]
fn test_load_reads_register_once() {
    let mut cpu = counting_cpu(&[0xAD, 0x00, 0xD0]); // LDA $D000

    cpu.step().unwrap();

    assert_eq!(cpu.memory().reads_of_register, 1);
}

#[test]
fn test_store_does_not_read_target() {
    let mut cpu = counting_cpu(&[0x8D, 0x00, 0xD0]); // STA $D000

    cpu.step().unwrap();

    assert_eq!(cpu.memory().reads_of_register, 0);
}

#[test]
fn test_peek_does_not_count() {
    let cpu = counting_cpu(&[]);

    assert_eq!(cpu.memory().peek(REGISTER), 0);
    assert_eq!(cpu.memory().reads_of_register, 0);
}
