//! Electron keyboard matrix.
//!
//! The 56 key positions are wired as 14 columns of 4 lines. The ULA reads a
//! column when the matching address line is low during a read of ROM slot
//! 8 (see `Ula::read_rom`):
//!
//! ```text
//! Col | bit 0   bit 1   bit 2   bit 3
//! ----|------------------------------------
//!   0 | →       COPY            SPACE
//!   1 | ←       ↓       RETURN  DELETE
//!   2 | -       ↑       :
//!   3 | 0       P       ;       /
//!   4 | 9       O       L       .
//!   5 | 8       I       K       ,
//!   6 | 7       U       J       M
//!   7 | 6       Y       H       N
//!   8 | 5       T       G       B
//!   9 | 4       R       F       V
//!  10 | 3       E       D       C
//!  11 | 2       W       S       X
//!  12 | 1       Q       A       Z
//!  13 | ESCAPE  CAPS LK CTRL    SHIFT
//! ```
//!
//! BREAK is not part of the matrix: it drives the reset line directly
//! (`Electron::press_break`).

use std::fmt;

/// A key on the Electron keyboard, independent of any host keyboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElectronKey {
    Right,
    Copy,
    Space,
    Left,
    Down,
    Return,
    Delete,
    Minus,
    Up,
    Colon,
    Semicolon,
    Divides,
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Dot,
    Comma,
    Escape,
    CapsLk,
    Ctrl,
    Shift,
}

impl ElectronKey {
    /// Every key, in declaration order.
    pub const ALL: [ElectronKey; 54] = {
        use ElectronKey::*;
        [
            Right, Copy, Space, Left, Down, Return, Delete, Minus, Up, Colon, Semicolon, Divides,
            Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9, A, B, C, D, E, F, G, H, I,
            J, K, L, M, N, O, P, Q, R, S, T, U, V, W, X, Y, Z, Dot, Comma, Escape, CapsLk, Ctrl,
            Shift,
        ]
    };

    /// Column (0-13) and line bit (0-3) this key closes.
    pub const fn matrix_position(self) -> (usize, u8) {
        use ElectronKey::*;
        match self {
            Right => (0, 0),
            Copy => (0, 1),
            Space => (0, 3),
            Left => (1, 0),
            Down => (1, 1),
            Return => (1, 2),
            Delete => (1, 3),
            Minus => (2, 0),
            Up => (2, 1),
            Colon => (2, 2),
            Num0 => (3, 0),
            P => (3, 1),
            Semicolon => (3, 2),
            Divides => (3, 3),
            Num9 => (4, 0),
            O => (4, 1),
            L => (4, 2),
            Dot => (4, 3),
            Num8 => (5, 0),
            I => (5, 1),
            K => (5, 2),
            Comma => (5, 3),
            Num7 => (6, 0),
            U => (6, 1),
            J => (6, 2),
            M => (6, 3),
            Num6 => (7, 0),
            Y => (7, 1),
            H => (7, 2),
            N => (7, 3),
            Num5 => (8, 0),
            T => (8, 1),
            G => (8, 2),
            B => (8, 3),
            Num4 => (9, 0),
            R => (9, 1),
            F => (9, 2),
            V => (9, 3),
            Num3 => (10, 0),
            E => (10, 1),
            D => (10, 2),
            C => (10, 3),
            Num2 => (11, 0),
            W => (11, 1),
            S => (11, 2),
            X => (11, 3),
            Num1 => (12, 0),
            Q => (12, 1),
            A => (12, 2),
            Z => (12, 3),
            Escape => (13, 0),
            CapsLk => (13, 1),
            Ctrl => (13, 2),
            Shift => (13, 3),
        }
    }

    /// The legend printed on the key cap.
    pub const fn name(self) -> &'static str {
        use ElectronKey::*;
        match self {
            Right => "Right",
            Copy => "Copy",
            Space => "Space",
            Left => "Left",
            Down => "Down",
            Return => "Return",
            Delete => "Delete",
            Minus => "-",
            Up => "Up",
            Colon => ":",
            Semicolon => ";",
            Divides => "/",
            Num0 => "0",
            Num1 => "1",
            Num2 => "2",
            Num3 => "3",
            Num4 => "4",
            Num5 => "5",
            Num6 => "6",
            Num7 => "7",
            Num8 => "8",
            Num9 => "9",
            A => "A",
            B => "B",
            C => "C",
            D => "D",
            E => "E",
            F => "F",
            G => "G",
            H => "H",
            I => "I",
            J => "J",
            K => "K",
            L => "L",
            M => "M",
            N => "N",
            O => "O",
            P => "P",
            Q => "Q",
            R => "R",
            S => "S",
            T => "T",
            U => "U",
            V => "V",
            W => "W",
            X => "X",
            Y => "Y",
            Z => "Z",
            Dot => ".",
            Comma => ",",
            Escape => "Escape",
            CapsLk => "Caps Lk",
            Ctrl => "Ctrl",
            Shift => "Shift",
        }
    }
}

impl fmt::Display for ElectronKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps a browser `KeyboardEvent.code` to an Electron key.
///
/// Positional codes are used so the mapping does not depend on the host
/// keyboard layout. Keys with no Electron counterpart return `None`.
///
/// ```
/// use electron_emu::{map_browser_key, ElectronKey};
///
/// assert_eq!(map_browser_key("KeyA"), Some(ElectronKey::A));
/// assert_eq!(map_browser_key("Digit7"), Some(ElectronKey::Num7));
/// assert_eq!(map_browser_key("End"), Some(ElectronKey::Copy));
/// assert_eq!(map_browser_key("F1"), None);
/// ```
pub fn map_browser_key(code: &str) -> Option<ElectronKey> {
    use ElectronKey::*;

    let key = match code {
        "ArrowRight" => Right,
        "ArrowLeft" => Left,
        "ArrowUp" => Up,
        "ArrowDown" => Down,
        "End" => Copy,
        "Space" => Space,
        "Enter" | "NumpadEnter" => Return,
        "Backspace" | "Delete" => Delete,
        "Minus" | "NumpadSubtract" => Minus,
        "Quote" => Colon,
        "Semicolon" => Semicolon,
        "Slash" | "NumpadDivide" => Divides,
        "Period" | "NumpadDecimal" => Dot,
        "Comma" => Comma,
        "Escape" => Escape,
        "CapsLock" => CapsLk,
        "ControlLeft" | "ControlRight" => Ctrl,
        "ShiftLeft" | "ShiftRight" => Shift,
        _ => {
            let digit = code
                .strip_prefix("Digit")
                .or_else(|| code.strip_prefix("Numpad"));
            return code
                .strip_prefix("Key")
                .and_then(letter_key)
                .or_else(|| digit.and_then(digit_key));
        }
    };
    Some(key)
}

fn letter_key(letter: &str) -> Option<ElectronKey> {
    single_legend(letter, |byte| byte.is_ascii_uppercase())
}

fn digit_key(digit: &str) -> Option<ElectronKey> {
    single_legend(digit, |byte| byte.is_ascii_digit())
}

/// Finds the key whose legend is exactly `text`, a single accepted character.
fn single_legend(text: &str, accept: fn(&u8) -> bool) -> Option<ElectronKey> {
    match text.as_bytes() {
        [byte] if accept(byte) => ElectronKey::ALL.into_iter().find(|key| key.name() == text),
        _ => None,
    }
}
