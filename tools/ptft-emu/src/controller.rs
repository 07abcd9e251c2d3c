use alloc::{vec, vec::Vec};

use bit_field::BitField;
use bitflags::bitflags;
use log::{debug, trace, warn};
use ptft::{
    Color, ControlLines, HEIGHT, ParallelBus, WIDTH, Window,
    regs::{self, DisplayControl},
};

/// What GRAM holds before anything is written to it. Real panels come up
/// with noise; a fixed odd value makes unpainted pixels easy to spot.
pub const UNDEFINED: u16 = 0xA5A5;

bitflags! {
    /// Protocol misuse seen on the pins. Sticky until [`Controller::take_faults`].
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct Faults: u8 {
        /// Data strobed before any index was selected.
        const DATA_WITHOUT_INDEX = 0b0000_0001;
        /// Strobed while the data lines were inputs.
        const FLOATING_BUS       = 0b0000_0010;
        /// Strobed while reset was held.
        const WRITE_IN_RESET     = 0b0000_0100;
        /// Chip deselected between the two bytes of a word.
        const SPLIT_WORD         = 0b0000_1000;
        /// GRAM write with the address counter off the panel.
        const OFF_PANEL          = 0b0001_0000;
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub strobes: u64,
    pub index_writes: u64,
    pub register_writes: u64,
    pub pixel_writes: u64,
    pub resets: u32,
}

pub struct Controller {
    data: u8,
    lines: ControlLines,
    in_reset: bool,
    backlight: bool,
    data_output: bool,

    index: Option<u8>,
    high: Option<u8>,
    registers: [u16; 256],

    gram: Vec<u16>,
    cursor_x: u16,
    cursor_y: u16,

    faults: Faults,
    stats: Stats,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        let mut controller = Self {
            data: 0,
            lines: ControlLines::IDLE,
            in_reset: false,
            backlight: false,
            data_output: false,
            index: None,
            high: None,
            registers: [0; 256],
            gram: vec![UNDEFINED; usize::from(WIDTH) * usize::from(HEIGHT)],
            cursor_x: 0,
            cursor_y: 0,
            faults: Faults::empty(),
            stats: Stats::default(),
        };
        controller.reset_registers();
        controller
    }

    fn reset_registers(&mut self) {
        self.registers = [0; 256];
        self.registers[usize::from(regs::WINDOW_V_END)] = WIDTH - 1;
        self.registers[usize::from(regs::WINDOW_H_END)] = HEIGHT - 1;
        self.cursor_x = 0;
        self.cursor_y = 0;
        self.index = None;
        self.high = None;
    }

    pub fn register(&self, index: u8) -> u16 {
        self.registers[usize::from(index)]
    }

    /// The active address window, or `None` if the registers hold an
    /// inverted or off-panel one.
    pub fn window(&self) -> Option<Window> {
        Window::new(
            self.register(regs::WINDOW_V_START),
            self.register(regs::WINDOW_H_START),
            self.register(regs::WINDOW_V_END),
            self.register(regs::WINDOW_H_END),
        )
        .ok()
    }

    pub fn cursor(&self) -> (u16, u16) {
        (self.cursor_x, self.cursor_y)
    }

    pub fn scroll(&self) -> u16 {
        self.register(regs::SCROLL_STEP)
    }

    pub fn is_on(&self) -> bool {
        DisplayControl::from_bits_truncate(self.register(regs::DISPLAY_CONTROL))
            .contains(DisplayControl::GON | DisplayControl::D1 | DisplayControl::D0)
    }

    /// Raw level of the backlight line.
    pub fn backlight(&self) -> bool {
        self.backlight
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn faults(&self) -> Faults {
        self.faults
    }

    pub fn take_faults(&mut self) -> Faults {
        core::mem::take(&mut self.faults)
    }

    /// GRAM contents at a driver coordinate, ignoring scroll.
    pub fn gram(&self, x: u16, y: u16) -> Color {
        Color(self.gram[usize::from(y) * usize::from(WIDTH) + usize::from(x)])
    }

    /// What the panel shows at `(x, y)`: scroll rotates the image along `x`.
    pub fn pixel(&self, x: u16, y: u16) -> Color {
        let offset = self.scroll() % WIDTH;
        self.gram((x + offset) % WIDTH, y)
    }

    /// The visible frame, row-major.
    pub fn frame(&self) -> Vec<Color> {
        (0..HEIGHT)
            .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
            .map(|(x, y)| self.pixel(x, y))
            .collect()
    }

    /// The visible frame as packed 8-bit RGB.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.frame().into_iter().flat_map(Color::to_rgb888).collect()
    }

    fn latch(&mut self, register_select: bool) {
        self.stats.strobes += 1;
        trace!("strobe rs={} data={:#04x}", register_select, self.data);

        if !register_select {
            self.index = Some(self.data);
            self.high = None;
            self.stats.index_writes += 1;
            return;
        }

        match self.high.take() {
            None => self.high = Some(self.data),
            Some(high) => self.write_word(u16::from_be_bytes([high, self.data])),
        }
    }

    fn write_word(&mut self, value: u16) {
        match self.index {
            None => {
                warn!("data word {value:#06x} with no index selected");
                self.faults |= Faults::DATA_WITHOUT_INDEX;
            }
            Some(regs::GRAM_DATA) => self.write_pixel(value),
            Some(index) => self.write_register(index, value),
        }
    }

    fn write_register(&mut self, index: u8, value: u16) {
        debug!("reg {index:#04x} <- {value:#06x}");
        self.stats.register_writes += 1;
        self.registers[usize::from(index)] = value;

        match index {
            regs::RAM_ADDR_H => self.cursor_y = value,
            regs::RAM_ADDR_V => self.cursor_x = value,
            regs::ENTRY_MODE => {
                // AM=1, I/D=11 is the only increment order modelled
                if !value.get_bit(3) || value.get_bits(4..6) != 0b11 {
                    warn!("entry mode {value:#06x} is not modelled, GRAM writes will land as if it were landscape");
                }
            }
            _ => {}
        }
    }

    fn write_pixel(&mut self, value: u16) {
        self.stats.pixel_writes += 1;
        let (x, y) = (self.cursor_x, self.cursor_y);

        if x < WIDTH && y < HEIGHT {
            self.gram[usize::from(y) * usize::from(WIDTH) + usize::from(x)] = value;
        } else {
            warn!("GRAM write at ({x}, {y}) is off the panel");
            self.faults |= Faults::OFF_PANEL;
        }

        let x0 = self.register(regs::WINDOW_V_START);
        let x1 = self.register(regs::WINDOW_V_END);
        let y0 = self.register(regs::WINDOW_H_START);
        let y1 = self.register(regs::WINDOW_H_END);

        if x >= x1 {
            self.cursor_x = x0;
            self.cursor_y = if y >= y1 { y0 } else { y + 1 };
        } else {
            self.cursor_x = x + 1;
        }
    }
}

impl ParallelBus for Controller {
    fn set_data(&mut self, value: u8) {
        self.data = value;
    }

    fn set_control(&mut self, lines: ControlLines) {
        let was = self.lines;
        self.lines = lines;

        let selected = !was.contains(ControlLines::CS) && !lines.contains(ControlLines::CS);
        let rising_wr = !was.contains(ControlLines::WR) && lines.contains(ControlLines::WR);

        if selected && rising_wr {
            if self.in_reset {
                self.faults |= Faults::WRITE_IN_RESET;
            } else if !self.data_output {
                self.faults |= Faults::FLOATING_BUS;
            } else {
                self.latch(lines.contains(ControlLines::RS));
            }
        }

        if lines.contains(ControlLines::CS) && !was.contains(ControlLines::CS) && self.high.take().is_some() {
            warn!("chip deselected halfway through a word");
            self.faults |= Faults::SPLIT_WORD;
        }
    }

    fn control(&self) -> ControlLines {
        self.lines
    }

    fn set_reset(&mut self, level: bool) {
        match (self.in_reset, level) {
            (false, false) => self.in_reset = true,
            (true, true) => {
                self.in_reset = false;
                self.stats.resets += 1;
                self.reset_registers();
                debug!("controller out of reset");
            }
            _ => {}
        }
    }

    fn set_backlight(&mut self, level: bool) {
        self.backlight = level;
    }

    fn set_data_output(&mut self, output: bool) {
        self.data_output = output;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ptft::bus::{select_register, write_data, write_register};

    use super::*;

    fn powered() -> Controller {
        let mut c = Controller::new();
        c.set_data_output(true);
        c
    }

    #[test]
    fn register_write_lands() {
        let mut c = powered();
        write_register(&mut c, regs::ENTRY_MODE, 0x1038);
        assert_eq!(c.register(regs::ENTRY_MODE), 0x1038);
        assert_eq!(c.stats().index_writes, 1);
        assert_eq!(c.stats().register_writes, 1);
        assert!(c.faults().is_empty());
    }

    #[test]
    fn cursor_registers_are_swapped_axes() {
        let mut c = powered();
        write_register(&mut c, regs::RAM_ADDR_H, 12);
        write_register(&mut c, regs::RAM_ADDR_V, 34);
        assert_eq!(c.cursor(), (34, 12));
    }

    #[test]
    fn gram_writes_wrap_inside_window() {
        let mut c = powered();
        write_register(&mut c, regs::WINDOW_H_END, 6);
        write_register(&mut c, regs::WINDOW_H_START, 5);
        write_register(&mut c, regs::WINDOW_V_END, 11);
        write_register(&mut c, regs::WINDOW_V_START, 10);
        write_register(&mut c, regs::RAM_ADDR_H, 5);
        write_register(&mut c, regs::RAM_ADDR_V, 10);
        select_register(&mut c, regs::GRAM_DATA);
        for value in 1..=5 {
            write_data(&mut c, 0, value);
        }
        assert_eq!(c.gram(10, 5), Color(5));
        assert_eq!(c.gram(11, 5), Color(2));
        assert_eq!(c.gram(10, 6), Color(3));
        assert_eq!(c.gram(11, 6), Color(4));
        assert_eq!(c.gram(12, 5), Color(UNDEFINED));
        assert_eq!(c.cursor(), (11, 5));
    }

    #[test]
    fn scroll_rotates_the_view() {
        let mut c = powered();
        write_register(&mut c, regs::RAM_ADDR_V, 3);
        select_register(&mut c, regs::GRAM_DATA);
        write_data(&mut c, 0x12, 0x34);
        write_register(&mut c, regs::SCROLL_STEP, 3);
        assert_eq!(c.pixel(0, 0), Color(0x1234));
        write_register(&mut c, regs::SCROLL_STEP, 5);
        assert_eq!(c.pixel(218, 0), Color(0x1234));
    }

    #[test]
    fn data_before_index_is_a_fault() {
        let mut c = powered();
        write_data(&mut c, 0xFF, 0xFF);
        assert_eq!(c.faults(), Faults::DATA_WITHOUT_INDEX);
        assert_eq!(c.take_faults(), Faults::DATA_WITHOUT_INDEX);
        assert!(c.faults().is_empty());
    }

    #[test]
    fn floating_bus_writes_are_dropped() {
        let mut c = Controller::new();
        write_register(&mut c, regs::ENTRY_MODE, 0x1038);
        assert_eq!(c.register(regs::ENTRY_MODE), 0);
        assert_eq!(c.faults(), Faults::FLOATING_BUS);
    }

    #[test]
    fn deselect_mid_word_drops_the_byte() {
        let mut c = powered();
        select_register(&mut c, regs::ENTRY_MODE);
        c.set_control(ControlLines::DATA);
        c.set_data(0x10);
        c.set_control(ControlLines::DATA - ControlLines::WR);
        c.set_control(ControlLines::DATA);
        c.set_control(ControlLines::IDLE);
        assert_eq!(c.faults(), Faults::SPLIT_WORD);
        assert_eq!(c.register(regs::ENTRY_MODE), 0);
    }

    #[test]
    fn reset_restores_full_window() {
        let mut c = powered();
        write_register(&mut c, regs::WINDOW_V_END, 3);
        c.set_reset(false);
        write_register(&mut c, regs::WINDOW_V_END, 9);
        assert_eq!(c.faults(), Faults::WRITE_IN_RESET);
        c.set_reset(true);
        assert_eq!(c.window(), Some(Window::FULL));
        assert_eq!(c.stats().resets, 1);
    }
}
