//! # Processor Status Register
//!
//! The 6502 keeps its seven condition flags plus two reserved bits in a single
//! byte. `StatusFlags` wraps that byte and exposes named accessors so the
//! instruction implementations never have to spell out bit masks.

use std::fmt;

/// Packed NV-BDIZC status register.
///
/// Bit layout:
/// - Bit 7: N (Negative)
/// - Bit 6: V (Overflow)
/// - Bit 5: unused (reads back as 1 when pushed)
/// - Bit 4: B (Break, only meaningful in pushed copies)
/// - Bit 3: D (Decimal, stored but never acted upon)
/// - Bit 2: I (Interrupt disable)
/// - Bit 1: Z (Zero)
/// - Bit 0: C (Carry)
///
/// # Examples
///
/// ```
/// use cpu6502::StatusFlags;
///
/// let mut p = StatusFlags::from_bits(StatusFlags::UNUSED);
/// p.set_carry(true);
/// p.set_nz(0x80);
///
/// assert!(p.carry());
/// assert!(p.negative());
/// assert!(!p.zero());
/// assert_eq!(p.bits(), 0xA1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusFlags(u8);

impl StatusFlags {
    pub const CARRY: u8 = 0x01;
    pub const ZERO: u8 = 0x02;
    pub const INTERRUPT: u8 = 0x04;
    pub const DECIMAL: u8 = 0x08;
    pub const BREAK: u8 = 0x10;
    pub const UNUSED: u8 = 0x20;
    pub const OVERFLOW: u8 = 0x40;
    pub const NEGATIVE: u8 = 0x80;

    /// Wraps a raw status byte without modification.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Returns the raw status byte.
    pub const fn bits(self) -> u8 {
        self.0
    }

    fn get(self, mask: u8) -> bool {
        self.0 & mask != 0
    }

    fn set(&mut self, mask: u8, value: bool) {
        if value {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }

    pub fn carry(self) -> bool {
        self.get(Self::CARRY)
    }

    pub fn set_carry(&mut self, value: bool) {
        self.set(Self::CARRY, value);
    }

    pub fn zero(self) -> bool {
        self.get(Self::ZERO)
    }

    pub fn set_zero(&mut self, value: bool) {
        self.set(Self::ZERO, value);
    }

    pub fn interrupt_disable(self) -> bool {
        self.get(Self::INTERRUPT)
    }

    pub fn set_interrupt_disable(&mut self, value: bool) {
        self.set(Self::INTERRUPT, value);
    }

    pub fn decimal(self) -> bool {
        self.get(Self::DECIMAL)
    }

    pub fn set_decimal(&mut self, value: bool) {
        self.set(Self::DECIMAL, value);
    }

    pub fn break_flag(self) -> bool {
        self.get(Self::BREAK)
    }

    pub fn set_break_flag(&mut self, value: bool) {
        self.set(Self::BREAK, value);
    }

    pub fn overflow(self) -> bool {
        self.get(Self::OVERFLOW)
    }

    pub fn set_overflow(&mut self, value: bool) {
        self.set(Self::OVERFLOW, value);
    }

    pub fn negative(self) -> bool {
        self.get(Self::NEGATIVE)
    }

    pub fn set_negative(&mut self, value: bool) {
        self.set(Self::NEGATIVE, value);
    }

    /// Sets Z and N from an 8-bit result, the common case for loads and ALU ops.
    pub fn set_nz(&mut self, result: u8) {
        self.set_zero(result == 0);
        self.set_negative(result & 0x80 != 0);
    }
}

impl fmt::Display for StatusFlags {
    /// Formats the register as `NV-BDIZC`, with `-` for clear flags.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters = [
            (Self::NEGATIVE, 'N'),
            (Self::OVERFLOW, 'V'),
            (Self::UNUSED, '-'),
            (Self::BREAK, 'B'),
            (Self::DECIMAL, 'D'),
            (Self::INTERRUPT, 'I'),
            (Self::ZERO, 'Z'),
            (Self::CARRY, 'C'),
        ];
        for (mask, letter) in letters {
            let shown = if mask == Self::UNUSED || self.get(mask) {
                letter
            } else {
                '-'
            };
            write!(f, "{}", shown)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_accessors_touch_single_bits() {
        let mut p = StatusFlags::default();
        p.set_overflow(true);
        assert_eq!(p.bits(), StatusFlags::OVERFLOW);
        p.set_decimal(true);
        p.set_overflow(false);
        assert_eq!(p.bits(), StatusFlags::DECIMAL);
    }

    #[test]
    fn test_set_nz() {
        let mut p = StatusFlags::default();
        p.set_nz(0);
        assert!(p.zero());
        assert!(!p.negative());
        p.set_nz(0xFF);
        assert!(!p.zero());
        assert!(p.negative());
    }

    #[test]
    fn test_display() {
        assert_eq!(StatusFlags::from_bits(0x20).to_string(), "--------");
        assert_eq!(StatusFlags::from_bits(0xFF).to_string(), "NV-BDIZC");
        assert_eq!(StatusFlags::from_bits(0x83).to_string(), "N-----ZC");
    }
}
