//! # Acorn Electron Emulator
//!
//! An Acorn Electron emulator built on the cpu6502 CPU core.
//!
//! ## Architecture
//!
//! The machine is a strict ownership tree: `Electron` owns the CPU, the CPU
//! owns the bus (`ElectronMemory`), and the bus owns RAM, the OS ROM and the
//! ULA. The ULA is the Electron's single custom chip:
//!
//! - **Interrupts**: status/enable registers with a derived master-IRQ bit
//!   the CPU samples before each instruction
//! - **Paging**: 16 sideways ROM slots behind the 0x8000-0xBFFF window
//! - **Keyboard**: a 14-column matrix scanned through ROM slot 8
//! - **Sound**: a square-wave divider reported as a frequency
//! - **Video**: seven bitmap modes rendered from RAM once per field
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use electron_emu::{Electron, ElectronPorts};
//!
//! let ports = ElectronPorts::new()
//!     .with_frame_completed(|image| present(image))
//!     .with_speaker(|hz| beep(hz));
//!
//! let mut electron = Electron::new(&os_rom, ports)?;
//! electron.install_rom(10, basic_rom)?;
//! electron.restart();
//!
//! loop {
//!     electron.step()?;
//! }
//! ```
//!
//! ## Module Organization
//!
//! - `devices`: the ULA, palette decoding and the video-mode renderers
//! - `system`: the address decoder, keyboard mapping and machine front end
//! - `image`: the RGB frame buffer handed to the frame sink
//! - `ports`: the optional event sinks a host installs

pub mod devices;
pub mod error;
pub mod image;
pub mod ports;
pub mod system;

// WASM bindings (optional, enabled with "wasm" feature)
#[cfg(feature = "wasm")]
pub mod wasm;

/// Size of the Electron's RAM (0x0000-0x7FFF).
pub const RAM_SIZE: usize = 0x8000;

/// Size of one ROM image, the OS ROM or a sideways ROM slot.
pub const ROM_SIZE: usize = 0x4000;

// Re-export commonly used types
pub use devices::{palette16, palette2, palette4, render_frame, Ula, VideoMode};
pub use devices::{FRAME_CYCLES, RTC_OFFSET_CYCLES};
pub use error::ElectronError;
pub use image::Image;
pub use ports::ElectronPorts;
pub use system::{map_browser_key, Electron, ElectronKey, ElectronMemory, CLOCK_HZ};
