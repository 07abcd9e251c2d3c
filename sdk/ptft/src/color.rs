//! # Colors
//!
//! Pixels are 16-bit RGB565, `0bRRRRR_GGGGGG_BBBBB`, sent high byte first.
//!
//! ```ignore
//! const SKY: Color = Color::from_rgb(0x5c, 0x94, 0xfc);
//! display.clear(SKY);
//! ```

use bit_field::BitField;

/// A 16-bit RGB565 color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Color = Color(0x0000);
    pub const WHITE: Color = Color(0xFFFF);
    pub const RED: Color = Color(0xF800);
    pub const GREEN: Color = Color(0x07E0);
    pub const BLUE: Color = Color(0x001F);
    pub const YELLOW: Color = Color(0xFFE0);
    pub const CYAN: Color = Color(0x07FF);
    pub const MAGENTA: Color = Color(0xF81F);

    #[inline(always)]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Pack 8-bit channels, dropping the low bits of each.
    #[inline(always)]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3))
    }

    /// Expand back to 8-bit channels, replicating the high bits into the
    /// low ones so that white stays white.
    pub fn to_rgb888(self) -> [u8; 3] {
        let r = self.0.get_bits(11..16) as u8;
        let g = self.0.get_bits(5..11) as u8;
        let b = self.0.get_bits(0..5) as u8;
        [(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2)]
    }

    #[inline(always)]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Byte sent on the first strobe.
    #[inline(always)]
    pub const fn high(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Byte sent on the second strobe.
    #[inline(always)]
    pub const fn low(self) -> u8 {
        self.0 as u8
    }
}

impl From<u16> for Color {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<Color> for u16 {
    fn from(color: Color) -> Self {
        color.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_packing_matches_named_colors() {
        assert_eq!(Color::from_rgb(0xFF, 0, 0), Color::RED);
        assert_eq!(Color::from_rgb(0, 0xFF, 0), Color::GREEN);
        assert_eq!(Color::from_rgb(0, 0, 0xFF), Color::BLUE);
        assert_eq!(Color::from_rgb(0xFF, 0xFF, 0xFF), Color::WHITE);
    }

    #[test]
    fn expansion_keeps_extremes() {
        assert_eq!(Color::WHITE.to_rgb888(), [0xFF, 0xFF, 0xFF]);
        assert_eq!(Color::BLACK.to_rgb888(), [0, 0, 0]);
        assert_eq!(Color::RED.to_rgb888(), [0xFF, 0, 0]);
    }

    #[test]
    fn bytes_split_high_first() {
        let c = Color::new(0xA55A);
        assert_eq!((c.high(), c.low()), (0xA5, 0x5A));
    }
}
