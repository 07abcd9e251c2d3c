//! # Pixel Streams
//!
//! A [`PixelStream`] is exclusive access to GRAM for exactly one window's
//! worth of pixels. Opening it programs the window and cursor and selects
//! the GRAM data register; after that every [`push`](PixelStream::push)
//! lands on the next address.
//!
//! The controller's address counter only stays in step with the driver when
//! the number of writes matches the window area. The stream counts every
//! pixel it is told about, written or skipped:
//!
//! - going past the window is refused with [`Error::StreamOverrun`]
//! - closing early is logged when the stream is dropped
//!
//! ```ignore
//! let window = Window::from_extent(0, 0, 4, 2)?;
//! let mut stream = display.stream(window);
//! stream.fill(Color::RED, 4)?;
//! stream.fill(Color::BLUE, 4)?;
//! ```

use log::warn;

use crate::{
    bus::{ParallelBus, select_register, write_color},
    color::Color,
    display::Display,
    error::Error,
    regs,
    window::Window,
};

pub struct PixelStream<'a, B: ParallelBus> {
    display: &'a mut Display<B>,
    window: Window,
    visited: u32,
}

impl<B: ParallelBus> Display<B> {
    /// Open a stream over `window`, starting at its top-left corner.
    pub fn stream(&mut self, window: Window) -> PixelStream<'_, B> {
        self.stream_from(window, window.x0(), window.y0())
    }

    /// Open a stream over `window` with the cursor at `(x, y)`, which must be
    /// inside it.
    pub(crate) fn stream_from(&mut self, window: Window, x: u16, y: u16) -> PixelStream<'_, B> {
        debug_assert!(window.contains(x, y));
        self.set_window(&window);
        self.move_cursor(x, y);
        select_register(self.bus_mut(), regs::GRAM_DATA);
        PixelStream { display: self, window, visited: 0 }
    }
}

impl<'a, B: ParallelBus> PixelStream<'a, B> {
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Pixels still owed to the window.
    pub fn remaining(&self) -> u32 {
        self.window.area() - self.visited
    }

    fn claim(&mut self, count: u32) -> Result<(), Error> {
        if count > self.remaining() {
            return Err(Error::StreamOverrun { expected: self.window.area() });
        }
        self.visited += count;
        Ok(())
    }

    /// Write one pixel.
    pub fn push(&mut self, color: Color) -> Result<(), Error> {
        self.claim(1)?;
        write_color(self.display.bus_mut(), color);
        Ok(())
    }

    /// Write the same pixel `count` times.
    pub fn fill(&mut self, color: Color, count: u32) -> Result<(), Error> {
        self.claim(count)?;
        let bus = self.display.bus_mut();
        for _ in 0..count {
            write_color(bus, color);
        }
        Ok(())
    }

    /// Write pixels from an iterator until it runs dry.
    pub fn extend<I: IntoIterator<Item = Color>>(&mut self, colors: I) -> Result<(), Error> {
        for color in colors {
            self.push(color)?;
        }
        Ok(())
    }

    /// Account for `count` pixels that are left untouched. No bus traffic;
    /// follow with [`seek`](Self::seek) if more pixels are coming.
    pub fn skip(&mut self, count: u32) -> Result<(), Error> {
        self.claim(count)
    }

    /// Move the cursor inside the window and reselect GRAM.
    pub fn seek(&mut self, x: u16, y: u16) -> Result<(), Error> {
        if !self.window.contains(x, y) {
            return Err(Error::OutsideWindow { x, y });
        }
        self.display.move_cursor(x, y);
        select_register(self.display.bus_mut(), regs::GRAM_DATA);
        Ok(())
    }
}

impl<'a, B: ParallelBus> Drop for PixelStream<'a, B> {
    fn drop(&mut self) {
        let remaining = self.remaining();
        if remaining != 0 {
            warn!(
                "pixel stream closed with {} of {} pixels unaccounted for; GRAM pointer is now out of step",
                remaining,
                self.window.area()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::bus::mock::{Txn, warnings};
    use crate::display::tests::display;

    #[test]
    fn opening_programs_window_cursor_then_gram() {
        let mut d = display();
        let w = Window::from_extent(4, 5, 2, 2).unwrap();
        drop(d.stream(w));

        let bus = d.bus();
        assert_eq!(
            bus.register_writes(),
            vec![
                (regs::WINDOW_H_START, 5),
                (regs::WINDOW_H_END, 6),
                (regs::WINDOW_V_START, 4),
                (regs::WINDOW_V_END, 5),
                (regs::RAM_ADDR_H, 5),
                (regs::RAM_ADDR_V, 4),
            ]
        );
        assert_eq!(bus.txns.last(), Some(&Txn::Index(regs::GRAM_DATA)));
    }

    #[test]
    fn overrun_is_refused_before_writing() {
        let mut d = display();
        let w = Window::from_extent(0, 0, 2, 1).unwrap();
        {
            let mut s = d.stream(w);
            s.push(Color::RED).unwrap();
            assert_eq!(s.fill(Color::RED, 2), Err(Error::StreamOverrun { expected: 2 }));
            s.push(Color::BLUE).unwrap();
            assert_eq!(s.remaining(), 0);
            assert_eq!(s.push(Color::BLUE), Err(Error::StreamOverrun { expected: 2 }));
        }
        assert_eq!(d.bus().pixels(), vec![Color::RED.raw(), Color::BLUE.raw()]);
    }

    #[test]
    fn skip_counts_without_writing() {
        let mut d = display();
        let w = Window::from_extent(0, 0, 3, 1).unwrap();
        let mut s = d.stream(w);
        s.push(Color::GREEN).unwrap();
        s.skip(1).unwrap();
        s.seek(2, 0).unwrap();
        s.push(Color::GREEN).unwrap();
        assert_eq!(s.remaining(), 0);
        drop(s);
        assert_eq!(d.bus().pixels().len(), 2);
    }

    #[test]
    fn underrun_warns_on_drop() {
        let mut d = display();
        let w = Window::from_extent(0, 0, 2, 2).unwrap();
        let ((), logged) = warnings(|| {
            let mut s = d.stream(w);
            s.push(Color::RED).unwrap();
        });
        assert_eq!(logged.len(), 1);
        assert!(logged[0].contains("3 of 4"), "{logged:?}");
    }

    #[test]
    fn exact_stream_closes_quietly() {
        let mut d = display();
        let w = Window::from_extent(0, 0, 2, 2).unwrap();
        let ((), logged) = warnings(|| {
            let mut s = d.stream(w);
            s.fill(Color::RED, 3).unwrap();
            s.skip(1).unwrap();
        });
        assert!(logged.is_empty(), "{logged:?}");
    }

    #[test]
    fn seek_stays_inside_window() {
        let mut d = display();
        let w = Window::from_extent(10, 10, 2, 2).unwrap();
        let mut s = d.stream(w);
        assert_eq!(s.seek(12, 10), Err(Error::OutsideWindow { x: 12, y: 10 }));
        s.fill(Color::WHITE, 4).unwrap();
    }
}
