use std::path::Path;

use anyhow::{Context, bail};
use ptft::{Display, Flip, HEIGHT, Palette, ParallelBus, Tile, WIDTH, tile::{TILE_BYTES, TILE_SIZE}};
use tracing::{info, warn};

/// Read a raw tile sheet: back-to-back 24-byte tiles, nothing else.
pub fn load(path: &Path) -> anyhow::Result<Vec<Tile>> {
    let bytes = std::fs::read(path).with_context(|| format!("reading tile sheet {}", path.display()))?;
    if bytes.len() < TILE_BYTES {
        bail!("{} holds {} bytes, less than one tile", path.display(), bytes.len());
    }

    let chunks = bytes.chunks_exact(TILE_BYTES);
    if !chunks.remainder().is_empty() {
        warn!("ignoring {} trailing bytes in {}", chunks.remainder().len(), path.display());
    }
    let tiles: Vec<Tile> = chunks.filter_map(Tile::from_slice).copied().collect();
    info!("loaded {} tiles from {}", tiles.len(), path.display());
    Ok(tiles)
}

/// Top-left corners of a grid of `scale`d tiles, filling the panel row by row.
pub fn layout(scale: u8) -> Vec<(u16, u16)> {
    let step = TILE_SIZE * u16::from(scale.max(1));
    let columns = WIDTH / step;
    let rows = HEIGHT / step;
    (0..rows)
        .flat_map(|row| (0..columns).map(move |column| (column * step, row * step)))
        .collect()
}

pub fn draw<B: ParallelBus>(
    display: &mut Display<B>,
    tiles: &[Tile],
    scale: u8,
    palette: &Palette,
) -> anyhow::Result<()> {
    let slots = layout(scale);
    if tiles.len() > slots.len() {
        warn!("only {} of {} tiles fit at scale {}", slots.len(), tiles.len(), scale);
    }
    for (tile, (x, y)) in tiles.iter().zip(slots) {
        display.draw_tile(x, y, scale, tile, palette, Flip::empty())?;
    }
    Ok(())
}
