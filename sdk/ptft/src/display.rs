//! # Device Handle
//!
//! [`Display`] owns the bus for the lifetime of the program. Building one
//! runs the power-on sequence; [`Display::release`] hands the bus back.
//!
//! All drawing goes through `&mut self`, so two draws can never interleave
//! mid-stream. See [`SharedDisplay`](crate::shared::SharedDisplay) for use
//! from more than one context.

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::{
    bus::{ParallelBus, write_register},
    init::{self, Config},
    regs::{self, DisplayControl},
};

/// Panel width, along the controller's fast axis.
pub const WIDTH: u16 = 220;
/// Panel height.
pub const HEIGHT: u16 = 176;

pub struct Display<B> {
    bus: B,
    pub(crate) scroll: u8,
    config: Config,
}

impl<B: ParallelBus> Display<B> {
    /// Take the bus, reset the controller and bring the panel up blank.
    pub fn new<D: DelayNs>(bus: B, delay: &mut D, config: Config) -> Self {
        let mut display = Self { bus, scroll: 0, config };
        init::power_on(&mut display, delay);
        display
    }

    /// Give the bus back. The panel keeps showing whatever is in GRAM.
    pub fn release(self) -> B {
        self.bus
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub(crate) fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Switch the backlight, honouring the configured polarity.
    pub fn set_backlight(&mut self, on: bool) {
        let level = on != self.config.backlight_active_low;
        self.bus.set_backlight(level);
    }

    /// Enable the gate outputs. GRAM is untouched.
    pub fn display_on(&mut self) {
        debug!("display on");
        write_register(&mut self.bus, regs::DISPLAY_CONTROL, DisplayControl::ON.bits());
    }

    /// Blank the panel without losing GRAM.
    pub fn display_off(&mut self) {
        debug!("display off");
        write_register(&mut self.bus, regs::DISPLAY_CONTROL, DisplayControl::OFF.bits());
    }
}
