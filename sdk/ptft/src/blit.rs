//! # Tile Blitter
//!
//! Draws [`Tile`]s through a [`PixelStream`](crate::stream::PixelStream).
//!
//! A tile at scale `s` covers an `8s × 8s` window. The blit is two
//! sequences composed:
//!
//! - output rows: `8s` panel rows, top-down, or bottom-up with
//!   [`Flip::VERTICAL`]; output row `k` shows source row `k / s`
//! - spans: each source row as paint/skip runs, every pixel `s` wide
//!
//! Every output row starts with a cursor reset to its left edge. Paint spans
//! stream colors; a skip span accounts for its pixels and, when something
//! still follows it on the row, moves the cursor past the gap. Transparent
//! pixels never produce a data write.
//!
//! ```ignore
//! display.draw_tile(16, 16, 2, &COIN, &GOLD, Flip::empty())?;
//! display.draw_composite(64, 32, 1, CompositeTile::new(&TL, &TR, &BL, &BR), &HERO)?;
//! ```

use log::debug;

use crate::{
    bus::ParallelBus,
    display::Display,
    error::Error,
    tile::{Flip, Palette, PaletteId, PaletteTable, Span, TILE_SIZE, Tile},
    window::Window,
};

/// Four tiles making up one 16×16 sprite.
///
/// The bottom tiles are authored with their rows stored bottom-up, so they
/// are always drawn with [`Flip::VERTICAL`] to land the right way round.
#[derive(Copy, Clone, Debug)]
pub struct CompositeTile<'a> {
    pub top_left: &'a Tile,
    pub top_right: &'a Tile,
    pub bottom_left: &'a Tile,
    pub bottom_right: &'a Tile,
}

impl<'a> CompositeTile<'a> {
    pub const fn new(top_left: &'a Tile, top_right: &'a Tile, bottom_left: &'a Tile, bottom_right: &'a Tile) -> Self {
        Self { top_left, top_right, bottom_left, bottom_right }
    }

    /// `(tile, column offset, row offset, flip)` in drawing order, offsets in
    /// tile units.
    pub fn quadrants(&self) -> [(&'a Tile, u16, u16, Flip); 4] {
        [
            (self.top_left, 0, 0, Flip::empty()),
            (self.top_right, 1, 0, Flip::empty()),
            (self.bottom_left, 0, 1, Flip::VERTICAL),
            (self.bottom_right, 1, 1, Flip::VERTICAL),
        ]
    }
}

/// Panel rows of a blit, paired with the source row each one shows.
fn output_rows(window: Window, scale: u16, flip: Flip) -> impl Iterator<Item = (u16, usize)> {
    let size = window.height();
    let top = window.y0();
    (0..size).map(move |k| {
        let y = if flip.contains(Flip::VERTICAL) { top + size - 1 - k } else { top + k };
        (y, usize::from(k / scale))
    })
}

impl<B: ParallelBus> Display<B> {
    /// Draw one tile with its top-left corner at `(x, y)`.
    pub fn draw_tile(&mut self, x: u16, y: u16, scale: u8, tile: &Tile, palette: &Palette, flip: Flip) -> Result<(), Error> {
        if scale == 0 {
            return Err(Error::ZeroScale);
        }
        let scale = u16::from(scale);
        let size = TILE_SIZE * scale;
        let window = Window::from_extent(x, y, size, size)?;
        debug!("tile at ({}, {}) scale {} flip {:?}", x, y, scale, flip);

        let first_y = if flip.contains(Flip::VERTICAL) { window.y1() } else { window.y0() };
        let mut stream = self.stream_from(window, x, first_y);
        for (i, (row_y, source)) in output_rows(window, scale, flip).enumerate() {
            if i > 0 {
                stream.seek(x, row_y)?;
            }

            let mut column = x;
            let mut spans = tile.row(source).spans(palette, scale, flip.contains(Flip::HORIZONTAL)).peekable();
            while let Some(span) = spans.next() {
                match span {
                    Span::Paint { color, len } => stream.fill(color, u32::from(len))?,
                    Span::Skip { len } => {
                        stream.skip(u32::from(len))?;
                        if spans.peek().is_some() {
                            stream.seek(column + len, row_y)?;
                        }
                    }
                }
                column += span.len();
            }
        }
        Ok(())
    }

    /// [`draw_tile`](Self::draw_tile) with the palette picked out of a table.
    pub fn draw_tile_from(
        &mut self,
        x: u16,
        y: u16,
        scale: u8,
        tile: &Tile,
        palettes: &PaletteTable<'_>,
        id: PaletteId,
        flip: Flip,
    ) -> Result<(), Error> {
        let palette = palettes.get(id)?;
        self.draw_tile(x, y, scale, tile, palette, flip)
    }

    /// Draw a 16×16 sprite as four tiles. Nothing is drawn unless the whole
    /// sprite fits on the panel.
    pub fn draw_composite(&mut self, x: u16, y: u16, scale: u8, sprite: CompositeTile<'_>, palette: &Palette) -> Result<(), Error> {
        if scale == 0 {
            return Err(Error::ZeroScale);
        }
        let step = TILE_SIZE * u16::from(scale);
        Window::from_extent(x, y, 2 * step, 2 * step)?;

        for (tile, column, row, flip) in sprite.quadrants() {
            self.draw_tile(x + column * step, y + row * step, scale, tile, palette, flip)?;
        }
        Ok(())
    }
}
