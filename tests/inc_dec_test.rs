//! Tests for INC, DEC, INX, INY, DEX and DEY.

use cpu6502::{FlatMemory, MemoryBus, CPU};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.load(0x8000, program);
    CPU::new(memory)
}

// ========== Memory ==========

#[test]
fn test_inc_zero_page_wraps_to_zero() {
    let mut cpu = setup_cpu(&[0xE6, 0x10]);
    cpu.memory_mut().write(0x0010, 0xFF);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().peek(0x0010), 0x00);
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn test_dec_absolute_goes_negative() {
    let mut cpu = setup_cpu(&[0xCE, 0x00, 0x20]);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().peek(0x2000), 0xFF);
    assert!(cpu.flag_n());
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_inc_absolute_x_fixed_cycles() {
    let mut cpu = setup_cpu(&[0xFE, 0xF0, 0x20, 0xFE, 0x00, 0x20]);
    cpu.set_x(0x20);

    cpu.step().unwrap();
    assert_eq!(cpu.memory().peek(0x2110), 0x01);
    assert_eq!(cpu.cycles(), 7);

    cpu.step().unwrap();
    assert_eq!(cpu.memory().peek(0x2020), 0x01);
    assert_eq!(cpu.cycles(), 14);
}

#[test]
fn test_inc_dec_leave_carry_alone() {
    let mut cpu = setup_cpu(&[0xE6, 0x10, 0xC6, 0x11]);
    cpu.memory_mut().write(0x0010, 0xFF);
    cpu.set_flag_c(true);

    cpu.step().unwrap();
    assert!(cpu.flag_c());

    cpu.step().unwrap();
    assert!(cpu.flag_c());
    assert_eq!(cpu.memory().peek(0x0011), 0xFF);
}

// ========== Registers ==========

#[test]
fn test_inx_iny_wrap() {
    let mut cpu = setup_cpu(&[0xE8, 0xC8]);
    cpu.set_x(0xFF);
    cpu.set_y(0x7F);

    cpu.step().unwrap();
    assert_eq!(cpu.x(), 0x00);
    assert!(cpu.flag_z());

    cpu.step().unwrap();
    assert_eq!(cpu.y(), 0x80);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_dex_dey_wrap() {
    let mut cpu = setup_cpu(&[0xCA, 0x88]);
    cpu.set_y(0x01);

    cpu.step().unwrap();
    assert_eq!(cpu.x(), 0xFF);
    assert!(cpu.flag_n());

    cpu.step().unwrap();
    assert_eq!(cpu.y(), 0x00);
    assert!(cpu.flag_z());
}
