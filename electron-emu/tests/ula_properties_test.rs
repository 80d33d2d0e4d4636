//! Property tests for ULA register behaviour.

use electron_emu::{ElectronPorts, Ula, FRAME_CYCLES, RAM_SIZE, ROM_SIZE};
use proptest::prelude::*;

const ALL_INTERRUPTS: u8 = 0x7C;
const MASTER_IRQ: u8 = 0x01;

#[derive(Debug, Clone)]
enum Op {
    Write(u8, u8),
    ReadStatus,
    Timers(u64),
    Frame,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..16, any::<u8>()).prop_map(|(reg, value)| Op::Write(reg, value)),
        1 => Just(Op::ReadStatus),
        1 => (0u64..4 * FRAME_CYCLES).prop_map(Op::Timers),
        1 => Just(Op::Frame),
    ]
}

fn apply(ula: &mut Ula, ram: &[u8; RAM_SIZE], op: &Op) {
    match *op {
        Op::Write(reg, value) => ula.write(0xFE00 | reg as u16, value),
        Op::ReadStatus => {
            ula.read(0xFE00);
        }
        Op::Timers(now) => ula.update_timers(now),
        Op::Frame => ula.generate_frame(ram),
    }
}

fn master_irq_consistent(ula: &Ula) -> bool {
    let pending = ula.irq_status() & ula.irq_enable() & ALL_INTERRUPTS != 0;
    let master = ula.irq_status() & MASTER_IRQ != 0;
    pending == master && master == ula.irq_active()
}

proptest! {
    #[test]
    fn prop_master_irq_tracks_enabled_sources(ops in prop::collection::vec(op(), 1..64)) {
        let ram = Box::new([0u8; RAM_SIZE]);
        let mut ula = Ula::new(ElectronPorts::new());

        for op in &ops {
            apply(&mut ula, &ram, op);
            prop_assert!(master_irq_consistent(&ula), "after {:?}", op);
        }
    }

    #[test]
    fn prop_break_is_idempotent(ops in prop::collection::vec(op(), 0..32), now in 0u64..1_000_000) {
        let ram = Box::new([0u8; RAM_SIZE]);
        let mut ula = Ula::new(ElectronPorts::new());
        for op in &ops {
            apply(&mut ula, &ram, op);
        }

        ula.reset(now);
        let first = (ula.next_frame_cycle(), ula.next_rtc_cycle(), ula.irq_status(), ula.irq_enable(), ula.rom_bank());
        ula.reset(now);
        let second = (ula.next_frame_cycle(), ula.next_rtc_cycle(), ula.irq_status(), ula.irq_enable(), ula.rom_bank());

        prop_assert_eq!(first, second);
        prop_assert_eq!(first.2, 0);
        prop_assert!(!ula.irq_active());
    }

    #[test]
    fn prop_aliased_banks_read_the_same_rom(offset in 0u16..0x4000, fill in any::<u8>()) {
        let mut ula = Ula::new(ElectronPorts::new());
        for (alias, slot) in [(1usize, 0u8), (3, 2), (9, 8), (11, 10)] {
            if slot == 8 {
                continue;
            }
            let rom: Vec<u8> = (0..ROM_SIZE).map(|i| (i as u8) ^ fill ^ slot).collect();
            ula.install_rom(alias, rom).unwrap();

            ula.write(0xFE05, alias as u8);
            let through_alias = ula.read_rom(0x8000 + offset);
            ula.write(0xFE05, slot);
            prop_assert_eq!(ula.read_rom(0x8000 + offset), through_alias);
        }
    }
}

#[test]
fn test_bank_9_aliases_keyboard() {
    let mut ula = Ula::new(ElectronPorts::new());
    ula.key_down(electron_emu::ElectronKey::Escape);

    ula.write(0xFE05, 0x09);
    assert_eq!(ula.rom_bank(), 8);
    assert_eq!(ula.read_rom(0x8000), 0x01);
}
