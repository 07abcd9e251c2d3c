//! # Hardware Scroll
//!
//! The controller rotates the visible image along `x` by an offset held in
//! register `0x33`. The offset lives in `0..=218`; every change is written
//! straight through, there is no batching.

use log::trace;

use crate::{
    bus::{ParallelBus, write_register},
    display::Display,
    error::Error,
    regs,
};

/// Largest scroll offset.
pub const SCROLL_MAX: u8 = 218;

impl<B: ParallelBus> Display<B> {
    pub fn scroll_offset(&self) -> u8 {
        self.scroll
    }

    /// Advance one line, wrapping from 218 back to 0.
    pub fn scroll_forward(&mut self) {
        self.scroll = if self.scroll >= SCROLL_MAX { 0 } else { self.scroll + 1 };
        self.write_scroll();
    }

    /// Go back one line, wrapping from 0 to 218.
    pub fn scroll_backward(&mut self) {
        self.scroll = if self.scroll == 0 { SCROLL_MAX } else { self.scroll - 1 };
        self.write_scroll();
    }

    /// Jump to an absolute offset.
    pub fn set_scroll(&mut self, offset: u8) -> Result<(), Error> {
        if offset > SCROLL_MAX {
            return Err(Error::ScrollOutOfRange(offset));
        }
        self.scroll = offset;
        self.write_scroll();
        Ok(())
    }

    fn write_scroll(&mut self) {
        trace!("scroll offset {}", self.scroll);
        let offset = u16::from(self.scroll);
        write_register(self.bus_mut(), regs::SCROLL_STEP, offset);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::display::tests::display;

    #[test]
    fn forward_wraps_to_zero() {
        let mut d = display();
        d.set_scroll(218).unwrap();
        d.scroll_forward();
        assert_eq!(d.scroll_offset(), 0);
        assert_eq!(d.bus().writes_to(regs::SCROLL_STEP), vec![218, 0]);
    }

    #[test]
    fn backward_wraps_to_last_line() {
        let mut d = display();
        d.scroll_backward();
        assert_eq!(d.scroll_offset(), 218);
        d.scroll_backward();
        assert_eq!(d.scroll_offset(), 217);
        assert_eq!(d.bus().writes_to(regs::SCROLL_STEP), vec![218, 217]);
    }

    #[test]
    fn full_cycle_returns_home() {
        let mut d = display();
        for _ in 0..=SCROLL_MAX {
            d.scroll_forward();
        }
        assert_eq!(d.scroll_offset(), 0);
        assert_eq!(d.bus().writes_to(regs::SCROLL_STEP).len(), 219);
    }

    #[test]
    fn absolute_offset_is_range_checked() {
        let mut d = display();
        assert_eq!(d.set_scroll(219), Err(Error::ScrollOutOfRange(219)));
        assert!(d.bus().events.is_empty());
    }
}
