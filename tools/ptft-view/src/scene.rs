//! A fixed scene that touches every drawing path once.

use ptft::{Color, CompositeTile, Display, Error, Flip, Palette, ParallelBus, Tile};

pub const PALETTE: Palette = Palette::new([
    Color::from_rgb(0x20, 0x20, 0x20),
    Color::from_rgb(0xF0, 0xD0, 0xA0),
    Color::from_rgb(0xC0, 0x30, 0x30),
    Color::from_rgb(0x30, 0x60, 0xC0),
    Color::from_rgb(0x80, 0x50, 0x20),
    Color::from_rgb(0x40, 0xA0, 0x40),
    Color::WHITE,
]);

const BRICK: Tile = Tile::from_indices([
    [4, 4, 4, 0, 4, 4, 4, 4],
    [4, 4, 4, 0, 4, 4, 4, 4],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [4, 4, 4, 4, 4, 4, 4, 0],
    [4, 4, 4, 4, 4, 4, 4, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [4, 4, 4, 0, 4, 4, 4, 4],
    [0, 0, 0, 0, 0, 0, 0, 0],
]);

const HEAD_LEFT: Tile = Tile::from_indices([
    [7, 7, 7, 2, 2, 2, 2, 2],
    [7, 7, 2, 2, 2, 2, 2, 2],
    [7, 7, 4, 4, 4, 1, 1, 0],
    [7, 4, 1, 4, 1, 1, 1, 0],
    [7, 4, 1, 4, 4, 1, 1, 1],
    [7, 4, 4, 1, 1, 1, 1, 4],
    [7, 7, 7, 1, 1, 1, 1, 1],
    [7, 7, 2, 2, 3, 2, 2, 2],
]);

const HEAD_RIGHT: Tile = Tile::from_indices([
    [2, 7, 7, 7, 7, 7, 7, 7],
    [2, 2, 2, 2, 7, 7, 7, 7],
    [1, 0, 1, 7, 7, 7, 7, 7],
    [1, 0, 1, 1, 1, 7, 7, 7],
    [0, 1, 1, 1, 1, 1, 7, 7],
    [4, 4, 4, 4, 7, 7, 7, 7],
    [1, 1, 1, 7, 7, 7, 7, 7],
    [2, 7, 7, 7, 7, 7, 7, 7],
]);

// stored upside down: the composite flips the bottom pair back
const LEGS_LEFT: Tile = Tile::from_indices([
    [7, 7, 4, 4, 4, 7, 7, 7],
    [7, 7, 7, 3, 3, 3, 7, 7],
    [7, 7, 7, 3, 3, 3, 3, 7],
    [7, 7, 3, 3, 3, 3, 3, 3],
    [1, 1, 2, 3, 1, 3, 3, 3],
    [1, 1, 1, 3, 3, 3, 3, 3],
    [7, 2, 2, 2, 2, 3, 2, 2],
    [7, 7, 2, 2, 2, 3, 2, 2],
]);

const LEGS_RIGHT: Tile = Tile::from_indices([
    [7, 7, 7, 4, 4, 4, 7, 7],
    [7, 7, 3, 3, 3, 7, 7, 7],
    [7, 3, 3, 3, 3, 7, 7, 7],
    [3, 3, 3, 3, 3, 3, 7, 7],
    [3, 3, 1, 3, 2, 1, 1, 7],
    [3, 3, 3, 3, 1, 1, 1, 7],
    [2, 2, 3, 2, 2, 2, 2, 7],
    [2, 2, 3, 2, 2, 7, 7, 7],
]);

const SKY: Color = Color::from_rgb(0x60, 0xA0, 0xF0);
const GRASS: Color = Color::from_rgb(0x30, 0x90, 0x30);

pub fn draw<B: ParallelBus>(display: &mut Display<B>) -> Result<(), Error> {
    display.clear(SKY);

    // horizon and ground
    display.draw_rect(0, 136, 220, 40, GRASS)?;
    for y in (140..176).step_by(6) {
        display.draw_hline(0, y, 219, Color::from_rgb(0x28, 0x80, 0x28))?;
    }

    // a wall of bricks along the ground
    for column in 0..10 {
        display.draw_tile(100 + column * 8, 120, 1, &BRICK, &PALETTE, Flip::empty())?;
        display.draw_tile(100 + column * 8, 128, 1, &BRICK, &PALETTE, Flip::HORIZONTAL)?;
    }

    // the same sprite at three scales, last one mirrored
    let hero = CompositeTile::new(&HEAD_LEFT, &HEAD_RIGHT, &LEGS_LEFT, &LEGS_RIGHT);
    display.draw_composite(8, 120, 1, hero, &PALETTE)?;
    display.draw_composite(30, 104, 2, hero, &PALETTE)?;
    display.draw_composite(66, 88, 3, hero, &PALETTE)?;

    // sun
    for (dy, width) in [(0u16, 6u16), (1, 10), (2, 12), (3, 12), (4, 12), (5, 12), (6, 10), (7, 6)] {
        let x = 190 - width / 2;
        display.draw_hline(x, 10 + dy * 2, width, Color::YELLOW)?;
        display.draw_hline(x, 11 + dy * 2, width, Color::YELLOW)?;
    }
    display.draw_pixel(190, 6, Color::WHITE)?;
    Ok(())
}
