//! Video modes and frame rendering.
//!
//! Every mode reads screen memory as a stream of bytes starting at the
//! programmed screen start. Each byte covers one scanline of one character
//! cell: eight consecutive bytes make up a cell, cells run left to right,
//! then character rows top to bottom. When the stream reaches the end of RAM
//! it wraps to the bottom of the mode's screen area, which is what makes
//! hardware scrolling work.
//!
//! Frames are always 256 native scanlines high. Text modes (3 and 6) have
//! 25 character rows of ten scanlines, eight drawn and two blank, with four
//! blank lines above and two below.

use crate::devices::palette::{palette16, palette2, palette4};
use crate::{Image, RAM_SIZE};

/// Scanlines in every rendered frame.
pub const FRAME_HEIGHT: usize = 256;

/// Width every mode is scaled to for a square-pixel 640 x 512 display.
const DISPLAY_WIDTH: usize = 640;

/// The seven Electron display modes, selected by bits 5-3 of the
/// miscellaneous control register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoMode {
    /// 640 x 256, 2 colours
    Mode0,
    /// 320 x 256, 4 colours
    Mode1,
    /// 160 x 256, 16 colours
    Mode2,
    /// 640 x 250 text, 2 colours
    Mode3,
    /// 320 x 256, 2 colours
    Mode4,
    /// 160 x 256, 4 colours
    Mode5,
    /// 320 x 250 text, 2 colours
    Mode6,
}

impl VideoMode {
    pub const ALL: [VideoMode; 7] = [
        VideoMode::Mode0,
        VideoMode::Mode1,
        VideoMode::Mode2,
        VideoMode::Mode3,
        VideoMode::Mode4,
        VideoMode::Mode5,
        VideoMode::Mode6,
    ];

    /// Mode for a 3-bit mode number. 7 is not a display mode.
    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.get(number as usize).copied()
    }

    /// Mode selected by a miscellaneous control register value.
    pub fn from_misc_control(value: u8) -> Option<Self> {
        Self::from_number((value & 0x38) >> 3)
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    /// Horizontal resolution in pixels.
    pub fn width(self) -> usize {
        match self {
            VideoMode::Mode0 | VideoMode::Mode3 => 640,
            VideoMode::Mode1 | VideoMode::Mode4 | VideoMode::Mode6 => 320,
            VideoMode::Mode2 | VideoMode::Mode5 => 160,
        }
    }

    /// Character cells per row, one byte per cell scanline.
    pub fn columns(self) -> usize {
        match self {
            VideoMode::Mode0 | VideoMode::Mode1 | VideoMode::Mode2 | VideoMode::Mode3 => 80,
            VideoMode::Mode4 | VideoMode::Mode5 | VideoMode::Mode6 => 40,
        }
    }

    pub fn character_rows(self) -> usize {
        if self.is_text() {
            25
        } else {
            32
        }
    }

    /// Lowest address of the screen area; the byte stream wraps here.
    pub fn screen_min(self) -> usize {
        match self {
            VideoMode::Mode0 | VideoMode::Mode1 | VideoMode::Mode2 => 0x3000,
            VideoMode::Mode3 => 0x4000,
            VideoMode::Mode4 | VideoMode::Mode5 => 0x5800,
            VideoMode::Mode6 => 0x6000,
        }
    }

    /// Text modes leave blank scanlines between character rows.
    pub fn is_text(self) -> bool {
        matches!(self, VideoMode::Mode3 | VideoMode::Mode6)
    }

    pub fn colours(self) -> usize {
        match self {
            VideoMode::Mode2 => 16,
            VideoMode::Mode1 | VideoMode::Mode5 => 4,
            _ => 2,
        }
    }

    /// Pixels packed into each screen byte.
    pub fn pixels_per_byte(self) -> usize {
        self.width() / self.columns()
    }

    /// Horizontal and vertical factors that bring a frame to a
    /// square-pixel 640 x 512 display, for use with [`Image::upscale`].
    pub fn pixel_scale(self) -> (usize, usize) {
        (DISPLAY_WIDTH / self.width(), 2)
    }

    /// Cycles of video memory access charged for one frame in this mode.
    pub fn video_cycles(self) -> u64 {
        match self {
            VideoMode::Mode0 => 80 * 8 * 32 * 2,
            VideoMode::Mode1 => 40 * 2 * 8 * 32 * 2,
            VideoMode::Mode2 => 20 * 4 * 8 * 32 * 2,
            VideoMode::Mode3 => 80 * 8 * 25 * 2,
            VideoMode::Mode4 => 40 * 8 * 32 * 2,
            VideoMode::Mode5 => 20 * 2 * 8 * 32 * 2,
            VideoMode::Mode6 => 40 * 8 * 25 * 2,
        }
    }

    fn palette(self, registers: &[u8; 8]) -> Vec<u32> {
        match self.colours() {
            16 => palette16(registers).to_vec(),
            4 => palette4(registers).to_vec(),
            _ => palette2(registers).to_vec(),
        }
    }
}

/// Screen memory as an endless byte stream.
struct ScreenBytes<'a> {
    ram: &'a [u8; RAM_SIZE],
    screen_min: usize,
    address: usize,
}

impl Iterator for ScreenBytes<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let byte = self.ram[self.address];
        self.address += 1;
        if self.address == RAM_SIZE {
            self.address = self.screen_min;
        }
        Some(byte)
    }
}

/// Logical colour of pixel `pixel` (0 = leftmost) in a screen byte.
///
/// A pixel's colour bits are spread through the byte at a stride of
/// `pixels_per_byte`, most significant first: in a 4-colour byte pixel 0
/// is bits 7 and 3, in a 16-colour byte bits 7, 5, 3 and 1.
fn colour_index(byte: u8, pixel: usize, pixels_per_byte: usize) -> usize {
    let bits_per_pixel = 8 / pixels_per_byte;

    (0..bits_per_pixel).fold(0, |index, k| {
        let bit = 7 - pixel - k * pixels_per_byte;
        (index << 1) | ((byte >> bit) & 1) as usize
    })
}

/// Renders one frame of `mode` from RAM into `image`.
///
/// The image is resized to the mode's dimensions (`width` x 256) and every
/// pixel is written.
///
/// # Examples
///
/// ```
/// use electron_emu::{render_frame, Image, VideoMode};
///
/// let mut ram = Box::new([0u8; 0x8000]);
/// ram[0x5800] = 0x80; // top-left pixel of mode 4
///
/// // Colour 0 black, colour 1 white.
/// let palette = [0x10, 0x11, 0, 0, 0, 0, 0, 0];
///
/// let mut image = Image::default();
/// render_frame(&ram, 0x5800, VideoMode::Mode4, &palette, &mut image);
///
/// assert_eq!((image.width(), image.height()), (320, 256));
/// assert_eq!(image.get(0, 0), 0xFFFFFF);
/// assert_eq!(image.get(1, 0), 0x000000);
/// ```
pub fn render_frame(
    ram: &[u8; RAM_SIZE],
    screen_start: usize,
    mode: VideoMode,
    palette_registers: &[u8; 8],
    image: &mut Image,
) {
    image.resize(mode.width(), FRAME_HEIGHT);
    if mode.is_text() {
        image.pixels_mut().fill(0);
    }

    let palette = mode.palette(palette_registers);
    let pixels_per_byte = mode.pixels_per_byte();
    let (top, row_pitch) = if mode.is_text() { (4, 10) } else { (0, 8) };

    let mut bytes = ScreenBytes {
        ram,
        screen_min: mode.screen_min(),
        address: screen_start % RAM_SIZE,
    };

    for row in 0..mode.character_rows() {
        for column in 0..mode.columns() {
            for (line, byte) in (0..8).zip(&mut bytes) {
                let y = top + row * row_pitch + line;
                for pixel in 0..pixels_per_byte {
                    let rgb = palette[colour_index(byte, pixel, pixels_per_byte)];
                    image.set(column * pixels_per_byte + pixel, y, rgb);
                }
            }
        }
    }
}
