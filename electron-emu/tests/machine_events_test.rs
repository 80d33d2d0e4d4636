//! Programs running on the CPU drive the ULA's outputs and read its inputs.

use std::sync::{Arc, Mutex};

use cpu6502::ExecutionError;
use electron_emu::{Electron, ElectronKey, ElectronPorts, ROM_SIZE};

/// Builds an OS ROM with `program` at $C000, `nmi_handler` at $C080 and the
/// reset vector pointing at $C000.
fn os_rom(program: &[u8], nmi_handler: &[u8]) -> Vec<u8> {
    let mut os = vec![0u8; ROM_SIZE];
    os[..program.len()].copy_from_slice(program);
    os[0x80..0x80 + nmi_handler.len()].copy_from_slice(nmi_handler);
    os[0x3FFA..].copy_from_slice(&[0x80, 0xC0, 0x00, 0xC0, 0x00, 0xC0]);
    os
}

#[derive(Default)]
struct Events {
    caps_lock: Vec<bool>,
    motor: Vec<bool>,
    speaker: Vec<u32>,
    trace: Vec<String>,
}

fn recording_ports(events: &Arc<Mutex<Events>>) -> ElectronPorts {
    let caps = Arc::clone(events);
    let motor = Arc::clone(events);
    let speaker = Arc::clone(events);
    let trace = Arc::clone(events);
    ElectronPorts::new()
        .with_caps_lock(move |on| caps.lock().unwrap().caps_lock.push(on))
        .with_cassette_motor(move |on| motor.lock().unwrap().motor.push(on))
        .with_speaker(move |hz| speaker.lock().unwrap().speaker.push(hz))
        .with_trace(move |msg| trace.lock().unwrap().trace.push(msg.to_string()))
}

#[test]
fn test_program_drives_outputs_and_reads_keyboard() {
    let program = [
        0xA9, 0x80, // LDA #$80
        0x8D, 0x07, 0xFE, // STA $FE07   caps lock LED on
        0xA9, 0x63, // LDA #99
        0x8D, 0x06, 0xFE, // STA $FE06   counter, sound still off
        0xA9, 0xC2, // LDA #$C2
        0x8D, 0x07, 0xFE, // STA $FE07   motor on, tone on
        0xAD, 0x01, 0xFE, // LDA $FE01   unmapped
        0xA9, 0x08, // LDA #$08
        0x8D, 0x05, 0xFE, // STA $FE05   page in the keyboard
        0xAD, 0x00, 0x80, // LDA $8000   scan every column
        0x85, 0x70, // STA $70
        0x4C, 0x1C, 0xC0, // JMP $C01C
    ];
    let events = Arc::new(Mutex::new(Events::default()));
    let mut electron = Electron::new(&os_rom(&program, &[]), recording_ports(&events)).unwrap();

    electron.key_down(ElectronKey::Return);
    electron.key_down(ElectronKey::Z);
    for _ in 0..20 {
        electron.step().unwrap();
    }

    let events = events.lock().unwrap();
    assert_eq!(events.caps_lock, vec![true]);
    assert_eq!(events.motor, vec![true]);
    assert_eq!(events.speaker, vec![625]);
    assert_eq!(events.trace, vec!["IO Read FE01\n".to_string()]);
    assert_eq!(electron.read_memory(0x0070), 0x0C);
    assert!(electron.caps_lock());
    assert!(electron.cassette_motor());
}

#[test]
fn test_nmi_is_serviced_once_per_raise() {
    let program = [0x4C, 0x00, 0xC0]; // JMP $C000
    let handler = [
        0xE6, 0x71, // INC $71
        0xA9, 0x80, // LDA #$80
        0x8D, 0x05, 0xFE, // STA $FE05   acknowledge NMI
        0x40, // RTI
    ];
    let mut electron = Electron::new(&os_rom(&program, &handler), ElectronPorts::new()).unwrap();

    electron.nmi();
    electron.run_for_cycles(200).unwrap();
    assert_eq!(electron.read_memory(0x0071), 1);

    electron.nmi();
    electron.run_for_cycles(200).unwrap();
    assert_eq!(electron.read_memory(0x0071), 2);
}

#[test]
fn test_unacknowledged_nmi_does_not_retrigger() {
    let program = [0x4C, 0x00, 0xC0]; // JMP $C000
    let handler = [0xE6, 0x71, 0x40]; // INC $71, RTI
    let mut electron = Electron::new(&os_rom(&program, &handler), ElectronPorts::new()).unwrap();

    electron.nmi();
    electron.run_for_cycles(500).unwrap();
    assert_eq!(electron.read_memory(0x0071), 1);
    assert!(electron.ula().nmi_active());
}

#[test]
fn test_invalid_opcode_stops_the_machine() {
    let program = [0xEA, 0x02]; // NOP, then an undocumented opcode
    let mut electron = Electron::new(&os_rom(&program, &[]), ElectronPorts::new()).unwrap();

    electron.step().unwrap();
    assert_eq!(electron.step(), Err(ExecutionError::InvalidOpcode(0x02)));
    assert_eq!(electron.cpu().pc(), 0xC001);
    assert_eq!(electron.cycles(), 2);
}

#[test]
fn test_sideways_rom_is_visible_to_programs() {
    let program = [
        0xA9, 0x0A, // LDA #10
        0x8D, 0x05, 0xFE, // STA $FE05
        0xAD, 0x07, 0x80, // LDA $8007
        0x85, 0x72, // STA $72
        0x4C, 0x0A, 0xC0, // JMP $C00A
    ];
    let mut electron = Electron::new(&os_rom(&program, &[]), ElectronPorts::new()).unwrap();
    let mut basic = vec![0u8; 16];
    basic[7] = 0x42;
    electron.install_rom(10, basic).unwrap();

    electron.run_for_cycles(50).unwrap();
    assert_eq!(electron.read_memory(0x0072), 0x42);
    assert_eq!(electron.ula().rom_bank(), 10);
}
