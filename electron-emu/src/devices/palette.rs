//! Palette register decoding.
//!
//! The ULA has eight write-only palette registers (0xFE08-0xFE0F). Each
//! physical colour component of each logical colour is one bit somewhere in
//! those registers, stored inverted: a clear bit turns the component on.
//! The 2- and 4-colour tables are subsets of the 16-colour table.
//!
//! Entries 11 and 15 of the 16-colour table take their red bit from the same
//! register as their green bit. Programs rely on the colours this produces,
//! so the wiring is reproduced as is.

/// One bit of one palette register.
#[derive(Clone, Copy)]
struct Tap {
    register: usize,
    bit: u8,
}

const fn tap(register: usize, bit: u8) -> Tap {
    Tap { register, bit }
}

/// (blue, green, red) taps for each of the 16 logical colours.
const TAPS: [(Tap, Tap, Tap); 16] = [
    (tap(0, 4), tap(1, 4), tap(1, 0)), // 0
    (tap(6, 4), tap(7, 4), tap(7, 0)), // 1
    (tap(0, 5), tap(1, 5), tap(1, 1)), // 2
    (tap(6, 5), tap(7, 5), tap(7, 1)), // 3
    (tap(2, 4), tap(3, 4), tap(3, 0)), // 4
    (tap(4, 4), tap(5, 4), tap(5, 0)), // 5
    (tap(2, 5), tap(3, 5), tap(3, 1)), // 6
    (tap(4, 5), tap(5, 5), tap(5, 1)), // 7
    (tap(0, 6), tap(0, 2), tap(1, 2)), // 8
    (tap(6, 6), tap(6, 2), tap(7, 2)), // 9
    (tap(0, 7), tap(0, 3), tap(1, 3)), // 10
    (tap(6, 7), tap(6, 3), tap(6, 3)), // 11
    (tap(2, 6), tap(2, 2), tap(3, 2)), // 12
    (tap(4, 6), tap(4, 2), tap(5, 2)), // 13
    (tap(2, 7), tap(2, 3), tap(3, 3)), // 14
    (tap(4, 7), tap(4, 3), tap(4, 3)), // 15
];

/// Component value when the tapped bit is clear.
fn component(registers: &[u8; 8], tap: Tap, on: u32) -> u32 {
    if registers[tap.register] & (1 << tap.bit) != 0 {
        0
    } else {
        on
    }
}

fn colour(registers: &[u8; 8], index: usize) -> u32 {
    let (blue, green, red) = TAPS[index];
    component(registers, blue, 0x0000FF)
        | component(registers, green, 0x00FF00)
        | component(registers, red, 0xFF0000)
}

/// Two-colour table used by modes 0, 3, 4 and 6.
pub fn palette2(registers: &[u8; 8]) -> [u32; 2] {
    [colour(registers, 0), colour(registers, 8)]
}

/// Four-colour table used by modes 1 and 5.
pub fn palette4(registers: &[u8; 8]) -> [u32; 4] {
    [
        colour(registers, 0),
        colour(registers, 2),
        colour(registers, 8),
        colour(registers, 10),
    ]
}

/// Sixteen-colour table used by mode 2.
///
/// # Examples
///
/// ```
/// use electron_emu::palette16;
///
/// // All bits clear: every colour is white.
/// assert!(palette16(&[0x00; 8]).iter().all(|&rgb| rgb == 0xFFFFFF));
/// // All bits set: every colour is black.
/// assert!(palette16(&[0xFF; 8]).iter().all(|&rgb| rgb == 0x000000));
/// ```
pub fn palette16(registers: &[u8; 8]) -> [u32; 16] {
    std::array::from_fn(|index| colour(registers, index))
}
