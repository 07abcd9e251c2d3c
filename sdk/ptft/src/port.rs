//! # Bus Implementations
//!
//! Two ways to put [`ParallelBus`] on real pins:
//!
//! - [`PortBus`] drives memory-mapped 8-bit I/O ports directly. Every line
//!   change is one volatile store, which is what you want for GRAM streaming.
//! - [`GpioBus`] drives eleven `embedded-hal` output pins. Portable, but a
//!   data byte costs eight pin writes.
//!
//! ## Default wiring (ATmega328P)
//!
//! | Port | Bits    | Use                                  |
//! |------|---------|--------------------------------------|
//! | D    | 0-7     | data lines                           |
//! | C    | 0-3     | CS, RS, WR, RD (4-7 left untouched)  |
//! | B    | 1       | reset                                |
//! | B    | 0       | backlight                            |

use bit_field::BitField;
use embedded_hal::digital::{OutputPin, PinState};
use volatile_register::RW;

use crate::bus::{ControlLines, ParallelBus};

const CONTROL_MASK: u8 = 0b0000_1111;

/// One AVR-style I/O port: input, direction and output registers, in that
/// order in memory.
#[repr(C)]
pub struct Port {
    pub pin: RW<u8>,
    pub ddr: RW<u8>,
    pub port: RW<u8>,
}

impl Port {
    /// # Safety
    ///
    /// `base` must be the address of a live port register block that nothing
    /// else writes to for `'static`.
    pub unsafe fn at(base: usize) -> &'static mut Port {
        unsafe { &mut *(base as *mut Port) }
    }

    fn update(&mut self, f: impl FnOnce(u8) -> u8) {
        let value = self.port.read();
        unsafe { self.port.write(f(value)) };
    }

    fn set_bit(&mut self, bit: usize, level: bool) {
        self.update(|mut v| *v.set_bit(bit, level));
    }
}

pub struct PortBus {
    data: &'static mut Port,
    control: &'static mut Port,
    aux: &'static mut Port,
    reset_bit: usize,
    backlight_bit: usize,
}

impl PortBus {
    /// Claims the ports and makes the control, reset and backlight lines
    /// outputs. The data port stays an input until
    /// [`set_data_output`](ParallelBus::set_data_output).
    pub fn new(
        data: &'static mut Port,
        control: &'static mut Port,
        aux: &'static mut Port,
        reset_bit: usize,
        backlight_bit: usize,
    ) -> Self {
        unsafe {
            control.ddr.modify(|d| d | CONTROL_MASK);
            aux.ddr.modify(|mut d| *d.set_bit(reset_bit, true).set_bit(backlight_bit, true));
        }
        Self { data, control, aux, reset_bit, backlight_bit }
    }

    /// The usual Uno wiring: data on port D, control on port C, reset on
    /// B1 and backlight on B0.
    ///
    /// # Safety
    ///
    /// Only sound on an ATmega328P, and only once.
    pub unsafe fn atmega328p() -> Self {
        unsafe { Self::new(Port::at(0x29), Port::at(0x26), Port::at(0x23), 1, 0) }
    }
}

impl ParallelBus for PortBus {
    #[inline(always)]
    fn set_data(&mut self, value: u8) {
        unsafe { self.data.port.write(value) };
    }

    #[inline(always)]
    fn set_control(&mut self, lines: ControlLines) {
        self.control.update(|v| (v & !CONTROL_MASK) | lines.bits());
    }

    fn control(&self) -> ControlLines {
        ControlLines::from_bits_truncate(self.control.port.read())
    }

    fn set_reset(&mut self, level: bool) {
        self.aux.set_bit(self.reset_bit, level);
    }

    fn set_backlight(&mut self, level: bool) {
        self.aux.set_bit(self.backlight_bit, level);
    }

    fn set_data_output(&mut self, output: bool) {
        let direction = if output { 0xFF } else { 0x00 };
        unsafe { self.data.ddr.write(direction) };
    }
}

/// Bus over individual `embedded-hal` pins.
///
/// Output-only pins cannot be turned around, so
/// [`set_data_output`](ParallelBus::set_data_output) is a no-op here. Pin
/// errors are dropped: the bus has no way to report them and no readback
/// to notice them.
pub struct GpioBus<P> {
    data: [P; 8],
    cs: P,
    rs: P,
    wr: P,
    rd: P,
    reset: P,
    backlight: P,
    lines: ControlLines,
}

impl<P: OutputPin> GpioBus<P> {
    pub fn new(data: [P; 8], cs: P, rs: P, wr: P, rd: P, reset: P, backlight: P) -> Self {
        let mut bus = Self { data, cs, rs, wr, rd, reset, backlight, lines: ControlLines::empty() };
        bus.set_control(ControlLines::IDLE);
        bus
    }

    pub fn release(self) -> ([P; 8], [P; 6]) {
        (self.data, [self.cs, self.rs, self.wr, self.rd, self.reset, self.backlight])
    }
}

fn drive<P: OutputPin>(pin: &mut P, level: bool) {
    let _ = pin.set_state(PinState::from(level));
}

impl<P: OutputPin> ParallelBus for GpioBus<P> {
    fn set_data(&mut self, value: u8) {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            drive(pin, value.get_bit(bit));
        }
    }

    fn set_control(&mut self, lines: ControlLines) {
        let changed = self.lines ^ lines;
        // WR last, so a strobe edge never lands before CS and RS settle
        for (flag, pin) in [
            (ControlLines::CS, &mut self.cs),
            (ControlLines::RS, &mut self.rs),
            (ControlLines::RD, &mut self.rd),
            (ControlLines::WR, &mut self.wr),
        ] {
            if changed.contains(flag) {
                drive(pin, lines.contains(flag));
            }
        }
        self.lines = lines;
    }

    fn control(&self) -> ControlLines {
        self.lines
    }

    fn set_reset(&mut self, level: bool) {
        drive(&mut self.reset, level);
    }

    fn set_backlight(&mut self, level: bool) {
        drive(&mut self.backlight, level);
    }

    fn set_data_output(&mut self, _output: bool) {}
}
