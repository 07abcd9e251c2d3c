//! # Power-On Sequence
//!
//! One-time controller setup. The register values are board configuration,
//! kept as data so they can be read (and diffed) at a glance.
//!
//! Order:
//!
//! 1. control lines idle, reset pulse, backlight on, data port to output
//! 2. [`POWER_ON`] register table (oscillator needs 10 ms to settle)
//! 3. [`GAMMA`] table, only with [`Config::gamma`]
//! 4. cursor home, display on, blank GRAM, scroll offset 0

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::{
    bus::{ControlLines, ParallelBus, write_register},
    color::Color,
    display::Display,
    regs::{self, DisplayControl, EntryMode},
};

/// One entry of a power-on table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Write(u8, u16),
    DelayMs(u32),
}

/// Board options applied during bring-up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Load the gamma curve. Off on the reference board.
    pub gamma: bool,
    /// Turn the backlight on at the end of reset.
    pub backlight: bool,
    /// The backlight transistor conducts when its line is low.
    pub backlight_active_low: bool,
    /// Length of the reset pulse and of the wait after it.
    pub reset_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gamma: false,
            backlight: true,
            backlight_active_low: true,
            reset_ms: 10,
        }
    }
}

pub const POWER_ON: &[Step] = &[
    // 220 gate lines
    Step::Write(regs::DRIVER_OUTPUT, 0x001C),
    // column inversion
    Step::Write(regs::LCD_AC_DRIVE, 0x0000),
    Step::Write(regs::ENTRY_MODE, EntryMode::LANDSCAPE.bits()),
    // 8-line front and back porch
    Step::Write(regs::BLANK_PERIOD, 0x0808),
    Step::Write(regs::FRAME_CYCLE, 0x0000),
    // 16-bit system interface
    Step::Write(regs::INTERFACE, 0x0000),
    Step::Write(regs::OSCILLATOR, 0x0001),
    Step::DelayMs(10),
    // no sleep, no standby
    Step::Write(regs::POWER_1, 0x0000),
    // booster on
    Step::Write(regs::POWER_2, 0x1000),
    Step::Write(regs::POWER_CONTROL_1, 0x1411),
    Step::Write(regs::POWER_CONTROL_2, 0x0202),
    Step::Write(regs::POWER_CONTROL_3, 0x0313),
    Step::Write(regs::GATE_SCAN, 0x0000),
    // scroll area spans lines 0..=219
    Step::Write(regs::SCROLL_END, 0x00DB),
    Step::Write(regs::SCROLL_START, 0x0000),
    Step::Write(regs::SCROLL_STEP, 0x0000),
    Step::Write(regs::PARTIAL_END, 0x00DB),
    Step::Write(regs::PARTIAL_START, 0x0000),
    // full-panel window
    Step::Write(regs::WINDOW_H_END, 0x00AF),
    Step::Write(regs::WINDOW_H_START, 0x0000),
    Step::Write(regs::WINDOW_V_END, 0x00DB),
    Step::Write(regs::WINDOW_V_START, 0x0000),
];

pub const GAMMA: &[Step] = &[
    Step::Write(regs::PAGE_SELECT, 0x0003),
    Step::Write(regs::GAMMA_1, 0x0000),
    Step::Write(regs::GAMMA_2, 0x0300),
    Step::Write(regs::GAMMA_3, 0x0103),
    Step::Write(regs::GAMMA_4, 0x2011),
    Step::Write(regs::GAMMA_5, 0x0703),
    Step::Write(regs::GAMMA_6, 0x0000),
    Step::Write(regs::GAMMA_7, 0x0400),
    Step::Write(regs::GAMMA_8, 0x0107),
    Step::Write(regs::GAMMA_9, 0x2011),
    Step::Write(regs::GAMMA_10, 0x0703),
];

/// Feed a table to the controller.
pub fn run<B: ParallelBus + ?Sized, D: DelayNs>(bus: &mut B, delay: &mut D, steps: &[Step]) {
    for step in steps {
        match *step {
            Step::Write(index, value) => write_register(bus, index, value),
            Step::DelayMs(ms) => delay.delay_ms(ms),
        }
    }
}

pub(crate) fn power_on<B: ParallelBus, D: DelayNs>(display: &mut Display<B>, delay: &mut D) {
    let config = *display.config();
    debug!("power on: {:?}", config);

    let bus = display.bus_mut();
    bus.set_control(ControlLines::IDLE);

    bus.set_reset(true);
    bus.set_reset(false);
    delay.delay_ms(config.reset_ms);
    bus.set_reset(true);
    delay.delay_ms(config.reset_ms);

    display.set_backlight(config.backlight);

    let bus = display.bus_mut();
    bus.set_data_output(true);
    delay.delay_ms(1);

    run(bus, delay, POWER_ON);
    if config.gamma {
        debug!("loading gamma table");
        run(bus, delay, GAMMA);
    }

    display.move_cursor(0, 0);
    display.display_on();
    delay.delay_ms(10);

    display.clear(Color::BLACK);
    display.scroll = 0;
    debug!("power on complete");
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::bus::mock::{Event, MockBus};
    use crate::display::{HEIGHT, WIDTH};

    struct Recorder(Vec<u32>);

    impl DelayNs for Recorder {
        fn delay_ns(&mut self, ns: u32) {
            self.0.push(ns);
        }

        fn delay_ms(&mut self, ms: u32) {
            self.0.push(ms * 1_000_000);
        }
    }

    fn bring_up(config: Config) -> (Display<MockBus>, Vec<u32>) {
        let mut delay = Recorder(Vec::new());
        let d = Display::new(MockBus::new(), &mut delay, config);
        (d, delay.0)
    }

    #[test]
    fn reset_pulse_precedes_register_traffic() {
        let (d, _) = bring_up(Config::default());
        let events = &d.bus().events;

        assert_eq!(
            &events[..5],
            &[
                Event::Control(ControlLines::IDLE),
                Event::Reset(true),
                Event::Reset(false),
                Event::Reset(true),
                Event::Backlight(false),
            ]
        );
        assert_eq!(events[5], Event::Output(true));
    }

    #[test]
    fn register_table_is_written_in_order() {
        let (d, _) = bring_up(Config::default());
        let writes = d.bus().register_writes();

        let table: Vec<(u8, u16)> = POWER_ON
            .iter()
            .filter_map(|s| match *s {
                Step::Write(i, v) => Some((i, v)),
                Step::DelayMs(_) => None,
            })
            .collect();
        assert_eq!(&writes[..table.len()], &table[..]);
        assert!(!writes.iter().any(|(i, _)| *i == regs::PAGE_SELECT));
    }

    #[test]
    fn gamma_is_opt_in() {
        let (d, _) = bring_up(Config { gamma: true, ..Config::default() });
        let writes = d.bus().register_writes();
        assert!(writes.contains(&(regs::PAGE_SELECT, 0x0003)));
        assert!(writes.contains(&(regs::GAMMA_10, 0x0703)));
    }

    #[test]
    fn oscillator_and_reset_delays_are_honoured() {
        let (_, delays) = bring_up(Config { reset_ms: 20, ..Config::default() });
        let ms: Vec<u32> = delays.iter().map(|ns| ns / 1_000_000).collect();
        assert_eq!(ms, vec![20, 20, 1, 10, 10]);
    }

    #[test]
    fn bring_up_ends_blank_with_display_on() {
        let (d, _) = bring_up(Config::default());
        let bus = d.bus();

        let pixels = bus.pixels();
        assert_eq!(pixels.len(), usize::from(WIDTH) * usize::from(HEIGHT));
        assert!(pixels.iter().all(|p| *p == 0));
        assert_eq!(bus.writes_to(regs::DISPLAY_CONTROL), vec![0x0017]);
        assert_eq!(d.scroll_offset(), 0);
    }
}
