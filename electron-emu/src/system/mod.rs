//! Electron system integration: the address decoder, the keyboard and the
//! machine front end that steps the CPU and drives the ULA's timing.

mod electron;
mod electron_memory;
mod keyboard;

pub use electron::{Electron, CLOCK_HZ};
pub use electron_memory::ElectronMemory;
pub use keyboard::{map_browser_key, ElectronKey};
