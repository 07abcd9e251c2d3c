//! # Addressing Window
//!
//! Before any pixel stream the controller needs a window (the rectangle its
//! address counter wraps inside) and a cursor (where the counter starts).
//!
//! Bounds are inclusive. A window is validated once, when it is built, so
//! programming it never fails.

use log::trace;

use crate::{
    bus::{ParallelBus, write_register},
    display::{Display, HEIGHT, WIDTH},
    error::Error,
    regs,
};

/// Inclusive rectangle in panel coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Window {
    x0: u16,
    y0: u16,
    x1: u16,
    y1: u16,
}

impl Window {
    /// The whole panel.
    pub const FULL: Window = Window { x0: 0, y0: 0, x1: WIDTH - 1, y1: HEIGHT - 1 };

    /// Build a window from inclusive corners.
    pub fn new(x0: u16, y0: u16, x1: u16, y1: u16) -> Result<Self, Error> {
        check_point(x0, y0)?;
        check_point(x1, y1)?;
        if x0 > x1 || y0 > y1 {
            return Err(Error::InvertedWindow);
        }
        Ok(Self { x0, y0, x1, y1 })
    }

    /// Build a window from an origin and a size.
    pub fn from_extent(x: u16, y: u16, width: u16, height: u16) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyArea);
        }
        let x1 = x.checked_add(width - 1).ok_or(Error::OutOfBounds { x, y })?;
        let y1 = y.checked_add(height - 1).ok_or(Error::OutOfBounds { x, y })?;
        Self::new(x, y, x1, y1)
    }

    pub fn x0(&self) -> u16 {
        self.x0
    }

    pub fn y0(&self) -> u16 {
        self.y0
    }

    pub fn x1(&self) -> u16 {
        self.x1
    }

    pub fn y1(&self) -> u16 {
        self.y1
    }

    pub fn width(&self) -> u16 {
        self.x1 - self.x0 + 1
    }

    pub fn height(&self) -> u16 {
        self.y1 - self.y0 + 1
    }

    /// Number of writes that exactly fill this window.
    pub fn area(&self) -> u32 {
        u32::from(self.width()) * u32::from(self.height())
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        (self.x0..=self.x1).contains(&x) && (self.y0..=self.y1).contains(&y)
    }
}

fn check_point(x: u16, y: u16) -> Result<(), Error> {
    if x >= WIDTH || y >= HEIGHT {
        return Err(Error::OutOfBounds { x, y });
    }
    Ok(())
}

impl<B: ParallelBus> Display<B> {
    /// Program the controller's window registers.
    pub fn set_window(&mut self, window: &Window) {
        trace!("window ({}, {})..=({}, {})", window.x0, window.y0, window.x1, window.y1);
        let bus = self.bus_mut();
        write_register(bus, regs::WINDOW_H_START, window.y0);
        write_register(bus, regs::WINDOW_H_END, window.y1);
        write_register(bus, regs::WINDOW_V_START, window.x0);
        write_register(bus, regs::WINDOW_V_END, window.x1);
    }

    /// Move the controller's read/write pointer.
    pub fn set_cursor(&mut self, x: u16, y: u16) -> Result<(), Error> {
        check_point(x, y)?;
        self.move_cursor(x, y);
        Ok(())
    }

    /// Cursor write for coordinates that are already known to be on the panel.
    #[inline(always)]
    pub(crate) fn move_cursor(&mut self, x: u16, y: u16) {
        let bus = self.bus_mut();
        write_register(bus, regs::RAM_ADDR_H, y);
        write_register(bus, regs::RAM_ADDR_V, x);
    }
}
