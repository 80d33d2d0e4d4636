//! Tests for ASL, LSR, ROL and ROR in accumulator and memory forms.

use cpu6502::{FlatMemory, MemoryBus, CPU};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.load(0x8000, program);
    CPU::new(memory)
}

// ========== Accumulator ==========

#[test]
fn test_asl_accumulator() {
    let mut cpu = setup_cpu(&[0x0A, 0x0A]);
    cpu.set_a(0xC1);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x82);
    assert!(cpu.flag_c());
    assert!(cpu.flag_n());

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x04);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_lsr_accumulator_clears_negative() {
    let mut cpu = setup_cpu(&[0x4A]);
    cpu.set_a(0x01);
    cpu.set_flag_n(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_rol_rotates_through_carry() {
    let mut cpu = setup_cpu(&[0x2A, 0x2A]);
    cpu.set_a(0x80);
    cpu.set_flag_c(false);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x01);
    assert!(!cpu.flag_c());
}

#[test]
fn test_ror_rotates_through_carry() {
    let mut cpu = setup_cpu(&[0x6A, 0x6A]);
    cpu.set_a(0x01);
    cpu.set_flag_c(false);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_c());
}

// ========== Memory ==========

#[test]
fn test_asl_zero_page_modifies_memory() {
    let mut cpu = setup_cpu(&[0x06, 0x20]);
    cpu.memory_mut().write(0x0020, 0x40);
    cpu.set_a(0x55);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().peek(0x0020), 0x80);
    assert_eq!(cpu.a(), 0x55);
    assert!(cpu.flag_n());
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn test_lsr_absolute() {
    let mut cpu = setup_cpu(&[0x4E, 0x00, 0x30]);
    cpu.memory_mut().write(0x3000, 0x03);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().peek(0x3000), 0x01);
    assert!(cpu.flag_c());
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_rol_absolute_x_never_pays_page_cross() {
    let mut cpu = setup_cpu(&[0x3E, 0xFF, 0x30]);
    cpu.set_x(0x01);
    cpu.set_flag_c(true);
    cpu.memory_mut().write(0x3100, 0x40);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().peek(0x3100), 0x81);
    assert!(!cpu.flag_c());
    assert_eq!(cpu.cycles(), 7);
}

#[test]
fn test_ror_zero_page_x_wraps() {
    let mut cpu = setup_cpu(&[0x76, 0xF0]);
    cpu.set_x(0x20);
    cpu.memory_mut().write(0x0010, 0x02);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().peek(0x0010), 0x01);
    assert!(!cpu.flag_c());
    assert_eq!(cpu.cycles(), 6);
}
