//! # Bus Protocol
//!
//! The controller is written one register at a time over an 8-bit data bus.
//! Every transaction is a fixed sequence of line toggles:
//!
//! | Step            | Data lines | RD | WR | RS | CS |
//! |-----------------|------------|----|----|----|----|
//! | index select    | `index`    | 1  | 1  | 0  | 0  |
//! | strobe          |            | 1  | 0  | 0  | 0  |
//! | latch           |            | 1  | 1  | 0  | 0  |
//! | data mode       |            | 1  | 1  | 1  | 0  |
//! | high byte       | `high`     | 1  | 0→1| 1  | 0  |
//! | low byte        | `low`      | 1  | 0→1| 1  | 0  |
//! | deselect        |            | 1  | 1  | 1  | 1  |
//!
//! The controller latches on the rising edge of WR. Consecutive
//! [`write_data`] calls without a new [`select_register`] stream into the
//! auto-incrementing GRAM pointer.
//!
//! There is no readback: a disconnected panel looks exactly like a working one.

use bitflags::bitflags;

use crate::color::Color;

bitflags! {
    /// Control lines, as they sit in the low nibble of the control port.
    ///
    /// A set flag means the line is driven high. CS, WR and RD are active low.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct ControlLines: u8 {
        /// Chip select.
        const CS = 0b0000_0001;
        /// Register select: low for an index write, high for data.
        const RS = 0b0000_0010;
        /// Write strobe.
        const WR = 0b0000_0100;
        /// Read strobe, parked high.
        const RD = 0b0000_1000;
    }
}

impl ControlLines {
    /// Nothing selected, no strobe in flight.
    pub const IDLE: Self = Self::all();
    /// Chip selected, index register addressed.
    pub const INDEX: Self = Self::RD.union(Self::WR);
    /// Chip selected, data register addressed.
    pub const DATA: Self = Self::RD.union(Self::WR).union(Self::RS);
}

/// Line-level access to the controller.
///
/// Implementations only move pins; sequencing lives in [`select_register`]
/// and [`write_data`]. All levels are raw electrical levels.
pub trait ParallelBus {
    /// Drive the eight data lines.
    fn set_data(&mut self, value: u8);

    /// Drive the four control lines.
    fn set_control(&mut self, lines: ControlLines);

    /// Current level of the control lines.
    fn control(&self) -> ControlLines;

    /// Drive the reset line (active low).
    fn set_reset(&mut self, level: bool);

    /// Drive the backlight line.
    fn set_backlight(&mut self, level: bool);

    /// Switch the data lines between output and input.
    fn set_data_output(&mut self, output: bool);
}

impl<B: ParallelBus + ?Sized> ParallelBus for &mut B {
    fn set_data(&mut self, value: u8) {
        (**self).set_data(value);
    }

    fn set_control(&mut self, lines: ControlLines) {
        (**self).set_control(lines);
    }

    fn control(&self) -> ControlLines {
        (**self).control()
    }

    fn set_reset(&mut self, level: bool) {
        (**self).set_reset(level);
    }

    fn set_backlight(&mut self, level: bool) {
        (**self).set_backlight(level);
    }

    fn set_data_output(&mut self, output: bool) {
        (**self).set_data_output(output);
    }
}

/// Pull WR low then release it, leaving every other line as it was.
#[inline(always)]
fn strobe<B: ParallelBus + ?Sized>(bus: &mut B) {
    let lines = bus.control();
    bus.set_control(lines.difference(ControlLines::WR));
    bus.set_control(lines.union(ControlLines::WR));
}

/// Point the controller's index register at `index`.
#[inline(always)]
pub fn select_register<B: ParallelBus + ?Sized>(bus: &mut B, index: u8) {
    bus.set_data(index);
    bus.set_control(ControlLines::INDEX);
    strobe(bus);
}

/// Write one 16-bit word, high byte first, then release CS.
#[inline(always)]
pub fn write_data<B: ParallelBus + ?Sized>(bus: &mut B, high: u8, low: u8) {
    bus.set_control(ControlLines::DATA);
    bus.set_data(high);
    strobe(bus);
    bus.set_data(low);
    strobe(bus);
    bus.set_control(ControlLines::DATA.union(ControlLines::CS));
}

/// Select `index` and write `value` to it.
#[inline(always)]
pub fn write_register<B: ParallelBus + ?Sized>(bus: &mut B, index: u8, value: u16) {
    select_register(bus, index);
    let [high, low] = value.to_be_bytes();
    write_data(bus, high, low);
}

/// Stream one pixel into the currently selected register.
#[inline(always)]
pub fn write_color<B: ParallelBus + ?Sized>(bus: &mut B, color: Color) {
    write_data(bus, color.high(), color.low());
}

#[cfg(test)]
pub(crate) mod mock {
    //! Recording bus that decodes line toggles the way the controller would.

    use super::{ControlLines, ParallelBus};
    use crate::regs;

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub enum Event {
        Data(u8),
        Control(ControlLines),
        Reset(bool),
        Backlight(bool),
        Output(bool),
    }

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub enum Txn {
        Index(u8),
        Word(u16),
    }

    pub struct MockBus {
        pub events: Vec<Event>,
        pub txns: Vec<Txn>,
        lines: ControlLines,
        data: u8,
        high: Option<u8>,
    }

    impl MockBus {
        pub fn new() -> Self {
            Self {
                events: Vec::new(),
                txns: Vec::new(),
                lines: ControlLines::IDLE,
                data: 0,
                high: None,
            }
        }

        pub fn clear(&mut self) {
            self.events.clear();
            self.txns.clear();
        }

        /// `(register, value)` pairs, with GRAM data left out.
        pub fn register_writes(&self) -> Vec<(u8, u16)> {
            let mut current = None;
            let mut out = Vec::new();
            for txn in &self.txns {
                match *txn {
                    Txn::Index(index) => current = Some(index),
                    Txn::Word(value) => {
                        if let Some(index) = current {
                            if index != regs::GRAM_DATA {
                                out.push((index, value));
                            }
                        }
                    }
                }
            }
            out
        }

        /// Every word that landed in GRAM, in order.
        pub fn pixels(&self) -> Vec<u16> {
            let mut current = None;
            let mut out = Vec::new();
            for txn in &self.txns {
                match *txn {
                    Txn::Index(index) => current = Some(index),
                    Txn::Word(value) if current == Some(regs::GRAM_DATA) => out.push(value),
                    Txn::Word(_) => {}
                }
            }
            out
        }

        /// Values written to one register, in order.
        pub fn writes_to(&self, register: u8) -> Vec<u16> {
            self.register_writes()
                .into_iter()
                .filter(|(index, _)| *index == register)
                .map(|(_, value)| value)
                .collect()
        }
    }

    impl ParallelBus for MockBus {
        fn set_data(&mut self, value: u8) {
            self.data = value;
            self.events.push(Event::Data(value));
        }

        fn set_control(&mut self, lines: ControlLines) {
            let rising = !self.lines.contains(ControlLines::WR) && lines.contains(ControlLines::WR);
            if lines.contains(ControlLines::CS) {
                self.high = None;
            } else if rising {
                if lines.contains(ControlLines::RS) {
                    match self.high.take() {
                        Some(high) => self.txns.push(Txn::Word(u16::from_be_bytes([high, self.data]))),
                        None => self.high = Some(self.data),
                    }
                } else {
                    self.high = None;
                    self.txns.push(Txn::Index(self.data));
                }
            }
            self.lines = lines;
            self.events.push(Event::Control(lines));
        }

        fn control(&self) -> ControlLines {
            self.lines
        }

        fn set_reset(&mut self, level: bool) {
            self.events.push(Event::Reset(level));
        }

        fn set_backlight(&mut self, level: bool) {
            self.events.push(Event::Backlight(level));
        }

        fn set_data_output(&mut self, output: bool) {
            self.events.push(Event::Output(output));
        }
    }

    pub struct NoDelay;

    impl embedded_hal::delay::DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    std::thread_local! {
        static WARNINGS: core::cell::RefCell<Option<Vec<String>>> = const { core::cell::RefCell::new(None) };
    }

    /// Collects `warn!` records for whichever test thread is capturing.
    struct Capture;

    impl log::Log for Capture {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::Level::Warn
        }

        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                WARNINGS.with(|w| {
                    if let Some(w) = w.borrow_mut().as_mut() {
                        w.push(record.args().to_string());
                    }
                });
            }
        }

        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture;
    static INSTALL: std::sync::Once = std::sync::Once::new();

    /// Run `f` and return the warnings it logged on this thread.
    pub fn warnings<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
        INSTALL.call_once(|| {
            let _ = log::set_logger(&CAPTURE);
            log::set_max_level(log::LevelFilter::Warn);
        });
        WARNINGS.with(|w| *w.borrow_mut() = Some(Vec::new()));
        let result = f();
        let logged = WARNINGS.with(|w| w.borrow_mut().take()).unwrap_or_default();
        (result, logged)
    }
}
