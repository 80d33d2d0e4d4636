//! Electron address decoder.
//!
//! Memory map:
//! - $0000-$7FFF: RAM (also the frame buffer)
//! - $8000-$BFFF: paged sideways ROM, or the keyboard in slot 8
//! - $C000-$FDFF: OS ROM
//! - $FE00-$FEFF: ULA registers
//! - $FF00-$FFFF: OS ROM (vectors)

use cpu6502::MemoryBus;
use log::warn;

use crate::devices::Ula;
use crate::ports::ElectronPorts;
use crate::{ElectronError, RAM_SIZE, ROM_SIZE};

const ROM_WINDOW_START: u16 = 0x8000;
const OS_ROM_START: u16 = 0xC000;
const IO_START: u16 = 0xFE00;
const IO_END: u16 = 0xFEFF;

/// The Electron bus: RAM, OS ROM and the ULA.
pub struct ElectronMemory {
    ram: Box<[u8; RAM_SIZE]>,
    os_rom: Box<[u8; ROM_SIZE]>,

    /// The ULA, owner of every other piece of hardware state.
    pub ula: Ula,
}

impl ElectronMemory {
    /// Builds the bus around an OS ROM, which must be exactly 16 KiB.
    pub fn new(os_rom: &[u8], ports: ElectronPorts) -> Result<Self, ElectronError> {
        let os_rom: Box<[u8; ROM_SIZE]> = os_rom
            .to_vec()
            .into_boxed_slice()
            .try_into()
            .map_err(|rom: Box<[u8]>| ElectronError::BadRomSize {
                expected: ROM_SIZE,
                actual: rom.len(),
            })?;

        Ok(Self {
            ram: Box::new([0; RAM_SIZE]),
            os_rom,
            ula: Ula::new(ports),
        })
    }

    /// Advances the ULA to CPU cycle `now`: raises the RTC interrupt and
    /// completes a frame when they are due.
    pub fn tick(&mut self, now: u64) {
        self.ula.update_timers(now);
        if self.ula.ready_for_next_frame(now) {
            self.ula.generate_frame(&self.ram);
        }
    }

    pub fn ram(&self) -> &[u8; RAM_SIZE] {
        &self.ram
    }

    fn os_rom_byte(&self, addr: u16) -> u8 {
        self.os_rom[(addr - OS_ROM_START) as usize]
    }
}

impl MemoryBus for ElectronMemory {
    fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7FFF => self.ram[addr as usize],
            ROM_WINDOW_START..=0xBFFF => self.ula.read_rom(addr),
            IO_START..=IO_END => self.ula.read(addr),
            _ => self.os_rom_byte(addr),
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x7FFF => self.ram[addr as usize] = value,
            IO_START..=IO_END => self.ula.write(addr, value),
            _ => warn!("write to ROM at {:04X} ({:02X}) ignored", addr, value),
        }
    }

    fn peek(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7FFF => self.ram[addr as usize],
            ROM_WINDOW_START..=0xBFFF => self.ula.read_rom(addr),
            IO_START..=IO_END => self.ula.peek(addr),
            _ => self.os_rom_byte(addr),
        }
    }

    fn irq_active(&self) -> bool {
        self.ula.irq_active()
    }

    fn nmi_active(&self) -> bool {
        self.ula.nmi_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os_rom() -> Vec<u8> {
        (0..ROM_SIZE).map(|i| (i >> 8) as u8).collect()
    }

    #[test]
    fn test_os_rom_must_be_16k() {
        let result = ElectronMemory::new(&[0; 100], ElectronPorts::new());
        assert!(matches!(
            result,
            Err(ElectronError::BadRomSize {
                expected: ROM_SIZE,
                actual: 100
            })
        ));
    }

    #[test]
    fn test_address_decoding() {
        let mut mem = ElectronMemory::new(&os_rom(), ElectronPorts::new()).unwrap();
        mem.ula.install_rom(0, vec![0x5A; ROM_SIZE]).unwrap();

        mem.write(0x1234, 0x42);
        assert_eq!(mem.read(0x1234), 0x42);
        assert_eq!(mem.read(0x9000), 0x5A);
        assert_eq!(mem.read(0xC000), 0x00);
        assert_eq!(mem.read(0xFDFF), 0x3D);
        assert_eq!(mem.read(0xFFFC), 0x3F);
    }

    #[test]
    fn test_rom_writes_are_dropped() {
        let mut mem = ElectronMemory::new(&os_rom(), ElectronPorts::new()).unwrap();
        mem.write(0x8000, 0x12);
        mem.write(0xC100, 0x12);
        assert_eq!(mem.read(0x8000), 0xFF);
        assert_eq!(mem.read(0xC100), 0x01);
    }

    #[test]
    fn test_io_window_overrides_os_rom() {
        let mut mem = ElectronMemory::new(&os_rom(), ElectronPorts::new()).unwrap();
        mem.write(0xFE08, 0x77);
        assert_eq!(mem.read(0xFE08), 0x77);
        assert_eq!(mem.peek(0xFE08), 0x77);

        assert_eq!(mem.peek(0xFE00) & 0x02, 0x02);
        mem.read(0xFE00);
        assert_eq!(mem.peek(0xFE00) & 0x02, 0x00);
    }

    #[test]
    fn test_tick_raises_display_end_irq() {
        let mut mem = ElectronMemory::new(&os_rom(), ElectronPorts::new()).unwrap();
        mem.write(0xFE00, 0x04);

        mem.tick(crate::FRAME_CYCLES);
        assert!(!mem.irq_active());
        mem.tick(crate::FRAME_CYCLES + 1);
        assert!(mem.irq_active());
        assert_eq!(mem.ula.next_frame_cycle(), 2 * crate::FRAME_CYCLES);
    }
}
