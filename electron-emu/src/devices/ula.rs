//! The Electron ULA.
//!
//! One chip handles everything in the Electron besides the CPU: the
//! interrupt controller, sideways ROM paging, the keyboard matrix, the
//! sound divider and video generation. Its registers live in the
//! 0xFE00-0xFEFF window, decoded on `addr & 0xFF0F`:
//!
//! | Addr  | Read                  | Write                            |
//! |-------|-----------------------|----------------------------------|
//! | FE00  | interrupt status      | interrupt enable                 |
//! | FE02  |                       | screen start low                 |
//! | FE03  |                       | screen start high                |
//! | FE04  | cassette data (0)     | cassette data (ignored)          |
//! | FE05  |                       | interrupt clear and ROM paging   |
//! | FE06  |                       | sound counter                    |
//! | FE07  | miscellaneous control | miscellaneous control            |
//! | FE08+ | palette 0-7           | palette 0-7                      |
//!
//! Time is measured in CPU cycles. The ULA never reads a clock of its own;
//! the bus hands it the CPU cycle count after every instruction.

use log::{debug, info, trace, warn};

use crate::devices::video::{render_frame, VideoMode};
use crate::ports::ElectronPorts;
use crate::system::ElectronKey;
use crate::{ElectronError, Image, RAM_SIZE, ROM_SIZE};

/// CPU cycles per field: 312 lines of 64 us at 2 MHz.
pub const FRAME_CYCLES: u64 = 312 * 64 * 2;

/// Delay of the real-time clock interrupt after vertical sync.
pub const RTC_OFFSET_CYCLES: u64 = 100 * 64 * 2;

const ROM_SLOTS: usize = 16;
const KEYBOARD_COLUMNS: usize = 14;

/// ROM slot that reads the keyboard instead of a ROM.
const KEYBOARD_SLOT: usize = 8;

// Interrupt status bits.
const HIGH_TONE: u8 = 0x40;
const RECEIVE_FULL: u8 = 0x20;
const TRANSMIT_EMPTY: u8 = 0x10;
const RTC: u8 = 0x08;
const DISPLAY_END: u8 = 0x04;
const POWER_ON_RESET: u8 = 0x02;
const MASTER_IRQ: u8 = 0x01;
const ALL_INTERRUPTS: u8 = HIGH_TONE | RECEIVE_FULL | TRANSMIT_EMPTY | RTC | DISPLAY_END;

/// (clear bit in the paging register, status bit it clears)
const INTERRUPT_CLEARS: [(u8, u8); 3] = [(0x40, HIGH_TONE), (0x20, RTC), (0x10, DISPLAY_END)];

// Miscellaneous control bits.
const CAPS_LOCK: u8 = 0x80;
const CASSETTE_MOTOR: u8 = 0x40;
const SOUND_MODE: u8 = 0x06;

/// Sound mode that drives the speaker from the counter.
const SOUND_TONE: u8 = 1;

/// Folds the sixteen page-select codes onto the twelve physical slots.
fn rom_slot(bank: usize) -> usize {
    match bank {
        1 => 0,
        3 => 2,
        9 => 8,
        11 => 10,
        other => other,
    }
}

/// Speaker frequency in Hz for a counter value.
fn tone_frequency(counter: u8) -> u32 {
    1_000_000 / (16 * (counter as u32 + 1))
}

/// ULA state and register file.
#[derive(Debug)]
pub struct Ula {
    roms: [Vec<u8>; ROM_SLOTS],
    keyboard: [u8; KEYBOARD_COLUMNS],
    irq_status: u8,
    irq_enable: u8,
    screen_low: u8,
    screen_high: u8,
    palette: [u8; 8],
    misc_control: u8,
    counter: u8,
    nmi: bool,
    rom_bank: usize,
    next_frame_cycle: u64,
    next_rtc_cycle: u64,
    video_cycles: u64,
    ports: ElectronPorts,
}

impl Ula {
    /// Creates a ULA in its power-on state at cycle 0.
    pub fn new(ports: ElectronPorts) -> Self {
        let mut ula = Self {
            roms: std::array::from_fn(|_| Vec::new()),
            keyboard: [0; KEYBOARD_COLUMNS],
            irq_status: 0,
            irq_enable: 0,
            screen_low: 0,
            screen_high: 0,
            palette: [0; 8],
            misc_control: 0,
            counter: 0,
            nmi: false,
            rom_bank: 0,
            next_frame_cycle: 0,
            next_rtc_cycle: 0,
            video_cycles: 0,
            ports,
        };
        ula.restart(0);
        ula
    }

    /// Installs a sideways ROM image. Images shorter than 16 KiB read 0xFF
    /// past their end.
    pub fn install_rom(&mut self, bank: usize, rom: Vec<u8>) -> Result<(), ElectronError> {
        if bank >= ROM_SLOTS {
            return Err(ElectronError::BadRomBank(bank));
        }
        if rom.len() > ROM_SIZE {
            return Err(ElectronError::BadRomSize {
                expected: ROM_SIZE,
                actual: rom.len(),
            });
        }

        info!("ROM installed in bank {} ({} bytes)", bank, rom.len());
        self.roms[rom_slot(bank)] = rom;
        Ok(())
    }

    /// Power-on reset: a BREAK that also raises the power-on status bit.
    pub fn restart(&mut self, now: u64) {
        self.reset(now);
        self.irq_status |= POWER_ON_RESET;
    }

    /// BREAK: re-bases both timers on `now`, pages in bank 0 and clears all
    /// interrupt state.
    pub fn reset(&mut self, now: u64) {
        self.video_cycles = 0;
        self.next_frame_cycle = now + FRAME_CYCLES;
        self.next_rtc_cycle = now + FRAME_CYCLES + RTC_OFFSET_CYCLES;
        self.rom_bank = 0;
        self.update_irq_status(0, 0);
    }

    /// Reads the paged ROM window (0x8000-0xBFFF).
    pub fn read_rom(&self, addr: u16) -> u8 {
        if self.rom_bank == KEYBOARD_SLOT {
            return self.read_keyboard(addr);
        }

        let rom = &self.roms[self.rom_bank];
        let offset = (addr as usize).wrapping_sub(0x8000);
        rom.get(offset).copied().unwrap_or(0xFF)
    }

    /// Scans the keyboard. Address line `i` low selects column `i`; the
    /// result ORs together the key lines of every selected column.
    fn read_keyboard(&self, addr: u16) -> u8 {
        self.keyboard
            .iter()
            .enumerate()
            .filter(|&(column, _)| addr & (0xC000 | (1 << column)) == 0x8000)
            .fold(0, |value, (_, &keys)| value | keys)
    }

    pub fn key_down(&mut self, key: ElectronKey) {
        let (column, bit) = key.matrix_position();
        self.keyboard[column] |= 1 << bit;
    }

    pub fn key_up(&mut self, key: ElectronKey) {
        let (column, bit) = key.matrix_position();
        self.keyboard[column] &= !(1 << bit);
    }

    pub fn release_all_keys(&mut self) {
        self.keyboard = [0; KEYBOARD_COLUMNS];
    }

    /// Raises the RTC interrupt if its time has passed.
    pub fn update_timers(&mut self, now: u64) {
        if now > self.next_rtc_cycle {
            self.update_irq_status(self.irq_enable, self.irq_status | RTC);
            self.next_rtc_cycle += FRAME_CYCLES;
        }
    }

    pub fn ready_for_next_frame(&self, now: u64) -> bool {
        now > self.next_frame_cycle
    }

    /// Ends a field: renders it to the frame sink (if one is installed),
    /// raises DISPLAY END and schedules the next field.
    pub fn generate_frame(&mut self, ram: &[u8; RAM_SIZE]) {
        if let Some(mode) = self.video_mode() {
            if self.ports.has_frame_sink() {
                let mut image = Image::default();
                render_frame(ram, self.screen_start(), mode, &self.palette, &mut image);
                self.ports.frame_completed(image);
            }
            self.video_cycles += mode.video_cycles();
            debug!("frame completed in mode {}", mode.number());
        }

        self.update_irq_status(self.irq_enable, self.irq_status | DISPLAY_END);
        self.next_frame_cycle += FRAME_CYCLES;
    }

    /// Stores enable and status, deriving the master IRQ bit.
    fn update_irq_status(&mut self, enable: u8, status: u8) {
        let was_active = self.irq_active();
        let status = if status & enable & ALL_INTERRUPTS != 0 {
            status | MASTER_IRQ
        } else {
            status & !MASTER_IRQ
        };

        self.irq_enable = enable;
        self.irq_status = status;
        if was_active != self.irq_active() {
            trace!("IRQ line {}", if self.irq_active() { "asserted" } else { "released" });
        }
    }

    /// Reads an IO register. Reading the status register acknowledges the
    /// power-on reset bit.
    pub fn read(&mut self, addr: u16) -> u8 {
        match addr & 0xFF0F {
            0xFE00 => {
                let status = self.irq_status;
                self.irq_status &= !POWER_ON_RESET;
                status
            }
            0xFE04 => 0,
            0xFE07 => self.misc_control,
            0xFE08..=0xFE0F => self.palette[(addr & 0x07) as usize],
            _ => {
                warn!("read from unmapped IO address {:04X}", addr);
                self.ports.trace(&format!("IO Read {:04X}\n", addr));
                0
            }
        }
    }

    /// Reads an IO register without acknowledging anything or tracing.
    pub fn peek(&self, addr: u16) -> u8 {
        match addr & 0xFF0F {
            0xFE00 => self.irq_status,
            0xFE07 => self.misc_control,
            0xFE08..=0xFE0F => self.palette[(addr & 0x07) as usize],
            _ => 0,
        }
    }

    /// Writes an IO register.
    pub fn write(&mut self, addr: u16, value: u8) {
        trace!("ULA write {:04X} <- {:02X}", addr, value);

        match addr & 0xFF0F {
            0xFE00 => self.update_irq_status(value, self.irq_status),
            0xFE02 => self.screen_low = value,
            0xFE03 => self.screen_high = value,
            0xFE04 => {}
            0xFE05 => self.interrupt_clear_and_paging(value),
            0xFE06 => self.write_counter(value),
            0xFE07 => self.write_misc_control(value),
            0xFE08..=0xFE0F => self.palette[(addr & 0x07) as usize] = value,
            _ => {
                warn!("write to unmapped IO address {:04X} ({:02X})", addr, value);
                self.ports.trace(&format!("IO Write {:04X}, {:02X}\n", addr, value));
            }
        }
    }

    fn interrupt_clear_and_paging(&mut self, value: u8) {
        let bank = rom_slot((value & 0x0F) as usize);
        if bank != self.rom_bank {
            debug!("ROM bank {} paged in", bank);
        }
        self.rom_bank = bank;

        if value & 0x80 != 0 {
            self.nmi = false;
        }

        let status = INTERRUPT_CLEARS
            .iter()
            .filter(|&&(clear, _)| value & clear != 0)
            .fold(self.irq_status, |status, &(_, source)| status & !source);
        self.update_irq_status(self.irq_enable, status);
    }

    fn sound_mode(&self) -> u8 {
        (self.misc_control & SOUND_MODE) >> 1
    }

    fn write_counter(&mut self, value: u8) {
        if self.sound_mode() == SOUND_TONE && value != self.counter {
            self.ports.speaker(tone_frequency(value));
        }
        self.counter = value;
    }

    fn write_misc_control(&mut self, value: u8) {
        let caps_lock = value & CAPS_LOCK != 0;
        if caps_lock != self.caps_lock() {
            self.ports.caps_lock(caps_lock);
        }

        let cassette_motor = value & CASSETTE_MOTOR != 0;
        if cassette_motor != self.cassette_motor() {
            self.ports.cassette_motor(cassette_motor);
        }

        let mode = (value & SOUND_MODE) >> 1;
        if mode != self.sound_mode() {
            let frequency = if mode == SOUND_TONE {
                tone_frequency(self.counter)
            } else {
                0
            };
            self.ports.speaker(frequency);
        }

        self.misc_control = value;
    }

    /// Latches an NMI request. It stays raised until a paging write with
    /// bit 7 set acknowledges it.
    pub fn raise_nmi(&mut self) {
        self.nmi = true;
    }

    pub fn irq_active(&self) -> bool {
        self.irq_status & MASTER_IRQ != 0
    }

    pub fn nmi_active(&self) -> bool {
        self.nmi
    }

    pub fn irq_status(&self) -> u8 {
        self.irq_status
    }

    pub fn irq_enable(&self) -> u8 {
        self.irq_enable
    }

    /// Frame buffer origin: a 64-byte aligned offset into RAM.
    pub fn screen_start(&self) -> usize {
        (((self.screen_high as usize) << 9) | ((self.screen_low as usize) << 1)) & 0x7FC0
    }

    /// Current display mode; `None` for the undefined mode number 7.
    pub fn video_mode(&self) -> Option<VideoMode> {
        VideoMode::from_misc_control(self.misc_control)
    }

    /// Physical ROM slot currently paged in.
    pub fn rom_bank(&self) -> usize {
        self.rom_bank
    }

    pub fn caps_lock(&self) -> bool {
        self.misc_control & CAPS_LOCK != 0
    }

    pub fn cassette_motor(&self) -> bool {
        self.misc_control & CASSETTE_MOTOR != 0
    }

    pub fn palette_registers(&self) -> &[u8; 8] {
        &self.palette
    }

    pub fn next_frame_cycle(&self) -> u64 {
        self.next_frame_cycle
    }

    pub fn next_rtc_cycle(&self) -> u64 {
        self.next_rtc_cycle
    }

    /// Video memory cycles charged since the last reset.
    pub fn video_cycles(&self) -> u64 {
        self.video_cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder<T: Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl FnMut(T) + Send + 'static) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        (events, move |event| sink.lock().unwrap().push(event))
    }

    #[test]
    fn test_power_on_bit_cleared_by_status_read() {
        let mut ula = Ula::new(ElectronPorts::new());
        assert_eq!(ula.peek(0xFE00), POWER_ON_RESET);
        assert_eq!(ula.peek(0xFE00), POWER_ON_RESET);

        assert_eq!(ula.read(0xFE00), POWER_ON_RESET);
        assert_eq!(ula.read(0xFE00), 0);
    }

    #[test]
    fn test_display_end_raises_and_clears_master_irq() {
        let ram = Box::new([0u8; RAM_SIZE]);
        let mut ula = Ula::new(ElectronPorts::new());

        ula.generate_frame(&ram);
        assert_eq!(ula.irq_status() & DISPLAY_END, DISPLAY_END);
        assert!(!ula.irq_active(), "source is not enabled");

        ula.write(0xFE00, DISPLAY_END);
        assert!(ula.irq_active());
        assert_eq!(ula.read(0xFE00) & MASTER_IRQ, MASTER_IRQ);

        ula.write(0xFE05, 0x10);
        assert!(!ula.irq_active());
        assert_eq!(ula.irq_status() & DISPLAY_END, 0);
    }

    #[test]
    fn test_rtc_fires_after_offset() {
        let mut ula = Ula::new(ElectronPorts::new());
        ula.write(0xFE00, RTC);

        let due = FRAME_CYCLES + RTC_OFFSET_CYCLES;
        ula.update_timers(due);
        assert!(!ula.irq_active());

        ula.update_timers(due + 1);
        assert!(ula.irq_active());
        assert_eq!(ula.next_rtc_cycle(), due + FRAME_CYCLES);
    }

    #[test]
    fn test_frame_threshold_is_strictly_greater() {
        let mut ula = Ula::new(ElectronPorts::new());
        assert!(!ula.ready_for_next_frame(FRAME_CYCLES));
        assert!(ula.ready_for_next_frame(FRAME_CYCLES + 1));
    }

    #[test]
    fn test_bank_aliases() {
        let mut ula = Ula::new(ElectronPorts::new());
        ula.install_rom(1, vec![0x11; ROM_SIZE]).unwrap();
        ula.install_rom(10, vec![0xAA; 16]).unwrap();

        ula.write(0xFE05, 0x00);
        assert_eq!(ula.read_rom(0x8000), 0x11);
        ula.write(0xFE05, 0x01);
        assert_eq!(ula.rom_bank(), 0);
        assert_eq!(ula.read_rom(0xBFFF), 0x11);

        ula.write(0xFE05, 0x0B);
        assert_eq!(ula.rom_bank(), 10);
        assert_eq!(ula.read_rom(0x800F), 0xAA);
        assert_eq!(ula.read_rom(0x8010), 0xFF, "past the end of a short ROM");

        ula.write(0xFE05, 0x0C);
        assert_eq!(ula.read_rom(0x8000), 0xFF, "empty slot");
    }

    #[test]
    fn test_install_rom_rejects_bad_input() {
        let mut ula = Ula::new(ElectronPorts::new());
        assert_eq!(
            ula.install_rom(16, vec![0; 16]),
            Err(ElectronError::BadRomBank(16))
        );
        assert_eq!(
            ula.install_rom(4, vec![0; ROM_SIZE + 1]),
            Err(ElectronError::BadRomSize {
                expected: ROM_SIZE,
                actual: ROM_SIZE + 1
            })
        );
    }

    #[test]
    fn test_keyboard_scan() {
        let mut ula = Ula::new(ElectronPorts::new());
        ula.key_down(ElectronKey::A); // column 12, bit 2
        ula.key_down(ElectronKey::Shift); // column 13, bit 3
        ula.write(0xFE05, 0x08);

        assert_eq!(ula.read_rom(0xBFFF), 0x00, "no column selected");
        assert_eq!(ula.read_rom(0xBFFF & !(1 << 12)), 0x04);
        assert_eq!(ula.read_rom(0xBFFF & !(1 << 13)), 0x08);
        assert_eq!(ula.read_rom(0x8000), 0x0C, "every column selected");

        ula.key_up(ElectronKey::A);
        assert_eq!(ula.read_rom(0x8000), 0x08);
        ula.release_all_keys();
        assert_eq!(ula.read_rom(0x8000), 0x00);
    }

    #[test]
    fn test_misc_control_callbacks_fire_on_change_only() {
        let (caps, caps_sink) = recorder();
        let (motor, motor_sink) = recorder();
        let ports = ElectronPorts::new()
            .with_caps_lock(caps_sink)
            .with_cassette_motor(motor_sink);
        let mut ula = Ula::new(ports);

        ula.write(0xFE07, CAPS_LOCK);
        ula.write(0xFE07, CAPS_LOCK);
        ula.write(0xFE07, CAPS_LOCK | CASSETTE_MOTOR);
        ula.write(0xFE07, 0);

        assert_eq!(*caps.lock().unwrap(), vec![true, false]);
        assert_eq!(*motor.lock().unwrap(), vec![true, false]);
        assert!(!ula.caps_lock());
    }

    #[test]
    fn test_speaker_frequency() {
        let (tones, sink) = recorder();
        let mut ula = Ula::new(ElectronPorts::new().with_speaker(sink));

        ula.write(0xFE06, 99); // silent, not reported
        ula.write(0xFE07, 0x02); // tone on: 1 MHz / (16 * 100)
        ula.write(0xFE06, 99); // unchanged
        ula.write(0xFE06, 124); // 1 MHz / (16 * 125)
        ula.write(0xFE07, 0x04); // another sound mode: silence

        assert_eq!(*tones.lock().unwrap(), vec![625, 500, 0]);
    }

    #[test]
    fn test_unmapped_io_is_traced() {
        let (messages, mut sink) = recorder::<String>();
        let ports = ElectronPorts::new().with_trace(move |msg: &str| sink(msg.to_string()));
        let mut ula = Ula::new(ports);

        assert_eq!(ula.read(0xFE01), 0);
        ula.write(0xFE01, 0x5A);
        ula.write(0xFE05, 0x00);

        assert_eq!(
            *messages.lock().unwrap(),
            vec!["IO Read FE01\n".to_string(), "IO Write FE01, 5A\n".to_string()]
        );
    }

    #[test]
    fn test_screen_start_alignment() {
        let mut ula = Ula::new(ElectronPorts::new());
        ula.write(0xFE02, 0xFF);
        ula.write(0xFE03, 0xFF);
        assert_eq!(ula.screen_start(), 0x7FC0);

        ula.write(0xFE02, 0x00);
        ula.write(0xFE03, 0x2C);
        assert_eq!(ula.screen_start(), 0x5800);
    }

    #[test]
    fn test_reset_is_rebased_on_now() {
        let mut ula = Ula::new(ElectronPorts::new());
        ula.write(0xFE00, 0xFF);
        ula.write(0xFE05, 0x0A);

        ula.reset(1000);
        assert_eq!(ula.next_frame_cycle(), 1000 + FRAME_CYCLES);
        assert_eq!(ula.next_rtc_cycle(), 1000 + FRAME_CYCLES + RTC_OFFSET_CYCLES);
        assert_eq!(ula.rom_bank(), 0);
        assert_eq!(ula.irq_enable(), 0);
        assert_eq!(ula.irq_status(), 0);
    }
}
