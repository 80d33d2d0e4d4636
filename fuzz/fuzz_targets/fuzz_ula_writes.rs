//! Fuzz target for ULA register writes.
//!
//! Arbitrary sequences of register writes, status reads and timer updates
//! must keep the master IRQ bit equal to "some enabled source is pending".

#![no_main]

use arbitrary::Arbitrary;
use electron_emu::{ElectronPorts, Ula, RAM_SIZE};
use libfuzzer_sys::fuzz_target;

const ALL_INTERRUPTS: u8 = 0x7C;

#[derive(Debug, Arbitrary)]
enum Op {
    Write { register: u8, value: u8 },
    Read { register: u8 },
    Timers { now: u32 },
    Frame,
    Break { now: u32 },
}

fuzz_target!(|ops: Vec<Op>| {
    let ram = Box::new([0u8; RAM_SIZE]);
    let mut ula = Ula::new(ElectronPorts::new().with_frame_completed(|_| {}));

    for op in ops.iter().take(1024) {
        match *op {
            Op::Write { register, value } => ula.write(0xFE00 | register as u16, value),
            Op::Read { register } => {
                ula.read(0xFE00 | register as u16);
            }
            Op::Timers { now } => ula.update_timers(now as u64),
            Op::Frame => ula.generate_frame(&ram),
            Op::Break { now } => ula.reset(now as u64),
        }

        let pending = ula.irq_status() & ula.irq_enable() & ALL_INTERRUPTS != 0;
        assert_eq!(ula.irq_active(), pending);
    }
});
