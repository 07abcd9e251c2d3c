//! # Tiles and Palettes
//!
//! A [`Tile`] is an 8×8 sprite packed at 3 bits per pixel: 24 bytes, three
//! per row. Within a row the three bytes form a little-endian 24-bit word
//! and pixel `p` (0 = left) sits in bits `3p..3p+3`:
//!
//! ```text
//!  byte 0            byte 1            byte 2
//!  7 6|5 4 3|2 1 0   7|6 5 4|3 2 1|0   7 6 5|4 3 2|1 0
//!  p2 |  p1 |  p0    p5|  p4 |  p3 |p2   p7  |  p6 | p5
//! ```
//!
//! Pixels 2 and 5 straddle a byte boundary.
//!
//! Each 3-bit value indexes a [`Palette`]. Index 7 is transparent: nothing
//! is written there and whatever is already on the panel shows through.
//!
//! Nothing in here touches the bus; the blitter in [`crate::blit`] streams
//! the [`Span`]s produced by [`TileRow::spans`].

use core::iter::FusedIterator;

use bit_field::BitField;

use crate::{color::Color, error::Error};

/// Packed bytes per tile.
pub const TILE_BYTES: usize = 24;
/// Tile edge in pixels.
pub const TILE_SIZE: u16 = 8;
/// The palette slot that is never drawn.
pub const TRANSPARENT: u8 = 7;

bitflags::bitflags! {
    /// Mirroring applied while blitting a tile.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct Flip: u8 {
        /// Mirror left/right.
        const HORIZONTAL = 0b01;
        /// Mirror top/bottom.
        const VERTICAL   = 0b10;
    }
}

/// Extract the palette index of pixel `position` (0..8) from one packed row.
///
/// With `flip_horizontal` the row reads right to left, so position 0 returns
/// what position 7 holds unflipped.
#[inline(always)]
pub fn decode_index(row: &[u8; 3], position: usize, flip_horizontal: bool) -> u8 {
    debug_assert!(position < 8, "pixel position {position} is outside the row");
    let position = if flip_horizontal { 7 - position } else { position };
    let word = u32::from_le_bytes([row[0], row[1], row[2], 0]);
    word.get_bits(3 * position..3 * position + 3) as u8
}

/// An 8×8, 3 bits-per-pixel sprite.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(transparent)]
pub struct Tile(pub [u8; TILE_BYTES]);

impl Tile {
    pub const fn new(bytes: [u8; TILE_BYTES]) -> Self {
        Self(bytes)
    }

    /// A tile with every pixel set to `index`.
    pub const fn solid(index: u8) -> Self {
        Self::from_indices([[index; 8]; 8])
    }

    /// Pack a grid of palette indices (`rows[y][x]`, each `< 8`).
    pub const fn from_indices(rows: [[u8; 8]; 8]) -> Self {
        let mut bytes = [0u8; TILE_BYTES];
        let mut y = 0;
        while y < 8 {
            let mut word: u32 = 0;
            let mut x = 0;
            while x < 8 {
                word |= ((rows[y][x] & 0b111) as u32) << (3 * x);
                x += 1;
            }
            bytes[3 * y] = word as u8;
            bytes[3 * y + 1] = (word >> 8) as u8;
            bytes[3 * y + 2] = (word >> 16) as u8;
            y += 1;
        }
        Self(bytes)
    }

    /// Borrow a tile out of a larger asset blob.
    pub fn from_slice(bytes: &[u8]) -> Option<&Tile> {
        let bytes: &[u8; TILE_BYTES] = bytes.get(..TILE_BYTES)?.try_into().ok()?;
        // SAFETY: Tile is repr(transparent) over [u8; TILE_BYTES]
        Some(unsafe { &*(bytes as *const [u8; TILE_BYTES] as *const Tile) })
    }

    pub fn as_bytes(&self) -> &[u8; TILE_BYTES] {
        &self.0
    }

    /// Packed row `y` (0 = top).
    pub fn row(&self, y: usize) -> TileRow {
        debug_assert!(y < 8, "tile row {y} is outside the tile");
        TileRow([self.0[3 * y], self.0[3 * y + 1], self.0[3 * y + 2]])
    }

    pub fn rows(&self) -> impl Iterator<Item = TileRow> + '_ {
        (0..8).map(|y| self.row(y))
    }

    /// Palette index at `(x, y)`, unflipped.
    pub fn index(&self, x: usize, y: usize) -> u8 {
        decode_index(&self.row(y).0, x, false)
    }

    pub fn transparent_count(&self) -> usize {
        self.rows()
            .flat_map(|row| row.indices(false))
            .filter(|&i| i == TRANSPARENT)
            .count()
    }
}

/// Three packed bytes holding one row of eight indices.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TileRow(pub [u8; 3]);

impl TileRow {
    /// The eight indices in drawing order.
    pub fn indices(self, flip_horizontal: bool) -> impl Iterator<Item = u8> {
        (0..8).map(move |p| decode_index(&self.0, p, flip_horizontal))
    }

    /// The row as drawing spans, each source pixel widened to `scale`
    /// output pixels. Adjacent transparent pixels merge into one skip.
    pub fn spans(self, palette: &Palette, scale: u16, flip_horizontal: bool) -> Spans<'_> {
        Spans { row: self, palette, scale, flip_horizontal, position: 0 }
    }
}

/// A run of output pixels within one row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Span {
    Paint { color: Color, len: u16 },
    Skip { len: u16 },
}

impl Span {
    pub fn len(&self) -> u16 {
        match *self {
            Span::Paint { len, .. } | Span::Skip { len } => len,
        }
    }
}

pub struct Spans<'p> {
    row: TileRow,
    palette: &'p Palette,
    scale: u16,
    flip_horizontal: bool,
    position: usize,
}

impl Iterator for Spans<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        if self.position >= 8 {
            return None;
        }
        let index = decode_index(&self.row.0, self.position, self.flip_horizontal);
        self.position += 1;

        match self.palette.color(index) {
            Some(color) => Some(Span::Paint { color, len: self.scale }),
            None => {
                let mut run = 1;
                while self.position < 8
                    && decode_index(&self.row.0, self.position, self.flip_horizontal) == TRANSPARENT
                {
                    self.position += 1;
                    run += 1;
                }
                Some(Span::Skip { len: run * self.scale })
            }
        }
    }
}

impl FusedIterator for Spans<'_> {}

/// Eight colors; slot 7 is the transparent slot and its color is ignored.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Palette(pub [Color; 8]);

impl Palette {
    /// Build from the seven drawable colors.
    pub const fn new(colors: [Color; 7]) -> Self {
        Self([
            colors[0], colors[1], colors[2], colors[3], colors[4], colors[5], colors[6], Color::BLACK,
        ])
    }

    /// The color for `index`, or `None` for the transparent slot.
    #[inline(always)]
    pub fn color(&self, index: u8) -> Option<Color> {
        if index == TRANSPARENT {
            None
        } else {
            self.0.get(usize::from(index)).copied()
        }
    }
}

/// Selects one palette out of a [`PaletteTable`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PaletteId(pub u8);

/// Read-only set of palettes, chosen per draw call.
#[derive(Copy, Clone, Debug)]
pub struct PaletteTable<'a>(pub &'a [Palette]);

impl<'a> PaletteTable<'a> {
    pub const fn new(palettes: &'a [Palette]) -> Self {
        Self(palettes)
    }

    pub fn get(&self, id: PaletteId) -> Result<&'a Palette, Error> {
        self.0.get(usize::from(id.0)).ok_or(Error::UnknownPalette(id.0))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
