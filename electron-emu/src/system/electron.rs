//! The Electron machine front end.
//!
//! `Electron` owns the CPU, which owns the bus. After every CPU step the
//! bus is handed the new cycle count so the ULA can raise its timer
//! interrupts and complete frames.

use std::time::Duration;

use cpu6502::{ExecutionError, MemoryBus, CPU};
use log::info;

use super::{ElectronKey, ElectronMemory};
use crate::devices::Ula;
use crate::ports::ElectronPorts;
use crate::ElectronError;

/// CPU clock rate; the cycle counter ticks at this rate.
pub const CLOCK_HZ: u64 = 2_000_000;

/// Acorn Electron emulator.
///
/// # Examples
///
/// ```
/// use electron_emu::{Electron, ElectronPorts, ROM_SIZE};
///
/// // An OS ROM that spins at $C000.
/// let mut os = vec![0u8; ROM_SIZE];
/// os[..3].copy_from_slice(&[0x4C, 0x00, 0xC0]);
/// os[0x3FFC..].copy_from_slice(&[0x00, 0xC0, 0x00, 0xC0]);
///
/// let mut electron = Electron::new(&os, ElectronPorts::new()).unwrap();
/// electron.step().unwrap();
///
/// assert_eq!(electron.cpu().pc(), 0xC000);
/// assert_eq!(electron.cycles(), 3);
/// ```
pub struct Electron {
    cpu: CPU<ElectronMemory>,
}

impl Electron {
    /// Builds a machine around a 16 KiB OS ROM and performs a power-on reset.
    pub fn new(os_rom: &[u8], ports: ElectronPorts) -> Result<Self, ElectronError> {
        let memory = ElectronMemory::new(os_rom, ports)?;
        let mut electron = Self {
            cpu: CPU::new(memory),
        };
        electron.restart();
        Ok(electron)
    }

    /// Installs a sideways ROM (BASIC normally lives in bank 10 or 11).
    pub fn install_rom(&mut self, bank: usize, rom: Vec<u8>) -> Result<(), ElectronError> {
        self.ula_mut().install_rom(bank, rom)
    }

    /// Power-on reset. The OS sees the power-on bit and performs a cold start.
    pub fn restart(&mut self) {
        let now = self.cpu.cycles();
        self.ula_mut().restart(now);
        self.cpu.reset();
        info!("power-on reset at cycle {}", now);
    }

    /// The BREAK key: a warm reset. ROMs, RAM and the keyboard are kept.
    pub fn press_break(&mut self) {
        let now = self.cpu.cycles();
        self.ula_mut().reset(now);
        self.cpu.reset();
        info!("BREAK at cycle {}", now);
    }

    /// Raises the NMI latch, as an expansion device would.
    pub fn nmi(&mut self) {
        self.ula_mut().raise_nmi();
    }

    pub fn key_down(&mut self, key: ElectronKey) {
        self.ula_mut().key_down(key);
    }

    pub fn key_up(&mut self, key: ElectronKey) {
        self.ula_mut().key_up(key);
    }

    pub fn release_all_keys(&mut self) {
        self.ula_mut().release_all_keys();
    }

    /// State of the caps-lock LED.
    pub fn caps_lock(&self) -> bool {
        self.ula().caps_lock()
    }

    /// State of the cassette motor relay.
    pub fn cassette_motor(&self) -> bool {
        self.ula().cassette_motor()
    }

    /// Executes one instruction (or interrupt entry) and lets the ULA catch
    /// up with the new cycle count.
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        self.cpu.step()?;
        let now = self.cpu.cycles();
        self.cpu.memory_mut().tick(now);
        Ok(())
    }

    /// Steps until at least `cycle_budget` cycles have elapsed.
    ///
    /// Returns the cycles actually run, which may overshoot by one instruction.
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let start = self.cpu.cycles();
        let target = start + cycle_budget;
        while self.cpu.cycles() < target {
            self.step()?;
        }
        Ok(self.cpu.cycles() - start)
    }

    pub fn cycles(&self) -> u64 {
        self.cpu.cycles()
    }

    /// Machine time represented by the cycle counter.
    pub fn emulated_time(&self) -> Duration {
        let cycles = self.cpu.cycles();
        Duration::new(
            cycles / CLOCK_HZ,
            ((cycles % CLOCK_HZ) * (1_000_000_000 / CLOCK_HZ)) as u32,
        )
    }

    /// Reads memory without side effects.
    pub fn read_memory(&self, addr: u16) -> u8 {
        self.cpu.memory().peek(addr)
    }

    /// Writes memory through the bus, as the CPU would.
    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.cpu.memory_mut().write(addr, value);
    }

    pub fn cpu(&self) -> &CPU<ElectronMemory> {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut CPU<ElectronMemory> {
        &mut self.cpu
    }

    pub fn ula(&self) -> &Ula {
        &self.cpu.memory().ula
    }

    fn ula_mut(&mut self) -> &mut Ula {
        &mut self.cpu.memory_mut().ula
    }
}
