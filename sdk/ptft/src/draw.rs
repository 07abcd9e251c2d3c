//! # Primitives
//!
//! Solid-color drawing. Each call programs a fresh window, so nothing is
//! carried over between calls.
//!
//! | Call                    | Window                            | Writes          |
//! |-------------------------|-----------------------------------|-----------------|
//! | `draw_pixel(x, y)`      | `x..=x` × `y..=y`                 | 1               |
//! | `draw_hline(x, y, w)`   | `x..=x+w` × `y..=y`               | `w + 1`         |
//! | `draw_rect(x, y, w, h)` | `x..=x+w-1` × `y..=y+h-1`         | `w × h`         |
//! | `clear(color)`          | whole panel                       | 220 × 176       |
//!
//! `draw_hline` includes its end column, so a width of 0 still lights one
//! pixel.

use log::debug;

use crate::{
    bus::ParallelBus,
    color::Color,
    display::{Display, HEIGHT, WIDTH},
    error::Error,
    window::Window,
};

impl<B: ParallelBus> Display<B> {
    pub fn draw_pixel(&mut self, x: u16, y: u16, color: Color) -> Result<(), Error> {
        let window = Window::new(x, y, x, y)?;
        self.stream(window).push(color)
    }

    /// Horizontal line from `x` to `x + width`, both ends included.
    pub fn draw_hline(&mut self, x: u16, y: u16, width: u16, color: Color) -> Result<(), Error> {
        let x1 = x.checked_add(width).ok_or(Error::OutOfBounds { x, y })?;
        let window = Window::new(x, y, x1, y)?;
        self.fill_window(&window, color)
    }

    pub fn draw_rect(&mut self, x: u16, y: u16, width: u16, height: u16, color: Color) -> Result<(), Error> {
        let window = Window::from_extent(x, y, width, height)?;
        self.fill_window(&window, color)
    }

    /// Fill a window, one row at a time in the controller's increment order.
    pub fn fill_window(&mut self, window: &Window, color: Color) -> Result<(), Error> {
        let (width, height) = (u32::from(window.width()), window.height());
        let mut stream = self.stream(*window);
        for _ in 0..height {
            stream.fill(color, width)?;
        }
        Ok(())
    }

    /// Paint the whole panel.
    pub fn clear(&mut self, color: Color) {
        debug!("clear to {:#06x}", color.raw());
        let mut stream = self.stream(Window::FULL);
        for _ in 0..HEIGHT {
            // HEIGHT rows of WIDTH exactly fill the full window
            let filled = stream.fill(color, u32::from(WIDTH));
            debug_assert!(filled.is_ok());
        }
    }

    pub fn clear_screen(&mut self) {
        self.clear(Color::BLACK);
    }
}
