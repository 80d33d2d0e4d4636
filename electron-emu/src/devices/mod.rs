//! Electron hardware: the ULA and the video logic it drives.
//!
//! - [`Ula`]: interrupts, ROM paging, keyboard matrix, sound, frame timing
//! - [`palette`]: decoding of the eight palette registers into RGB tables
//! - [`video`]: mode geometry and the per-mode bitmap renderers

pub mod palette;
mod ula;
pub mod video;

pub use palette::{palette16, palette2, palette4};
pub use ula::{Ula, FRAME_CYCLES, RTC_OFFSET_CYCLES};
pub use video::{render_frame, VideoMode};
