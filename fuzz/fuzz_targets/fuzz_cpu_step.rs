//! Fuzz target for CPU stepping.
//!
//! Runs a short burst of instructions from arbitrary registers and memory,
//! with interrupt lines toggled along the way. Stepping must never panic,
//! the cycle counter must never go backwards and the only failure allowed
//! is an undocumented opcode at PC.

#![no_main]

use arbitrary::Arbitrary;
use cpu6502::{ExecutionError, FlatMemory, CPU, OPCODE_TABLE};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    status: u8,
}

#[derive(Debug, Arbitrary)]
enum Event {
    Step,
    Irq(bool),
    Nmi,
    Reset,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    /// Code at $8000
    program: [u8; 32],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
    /// NMI, RESET and IRQ vectors
    vectors: [u8; 6],
    events: Vec<Event>,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    memory.load(0x0000, &input.zero_page);
    memory.load(0x0100, &input.stack_page);
    memory.load(0x8000, &input.program);
    memory.load(0xFFFA, &input.vectors);

    let mut cpu = CPU::new(memory);
    cpu.set_pc(0x8000);
    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);

    for event in input.events.iter().take(256) {
        let before = cpu.cycles();
        match event {
            Event::Step => {
                let pc = cpu.pc();
                if let Err(ExecutionError::InvalidOpcode(opcode)) = cpu.step() {
                    assert!(!OPCODE_TABLE[opcode as usize].is_legal());
                    assert_eq!(cpu.pc(), pc);
                    assert_eq!(cpu.cycles(), before);
                    return;
                }
            }
            Event::Irq(level) => cpu.set_irq(*level),
            Event::Nmi => cpu.trigger_nmi(),
            Event::Reset => {
                cpu.reset();
                assert_eq!(cpu.sp(), 0xFF);
                assert_eq!(cpu.status(), 0x20);
            }
        }
        assert!(cpu.cycles() >= before);
    }
});
