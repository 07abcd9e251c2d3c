//! # Controller Registers
//!
//! Register indices and field flags the driver writes. The controller's
//! "horizontal" GRAM axis is the panel's short side, which the driver calls
//! `y`; its "vertical" axis is the long side, the driver's `x`.
//!
//! | Index  | Name              | Driver meaning                          |
//! |--------|-------------------|-----------------------------------------|
//! | `0x03` | Entry mode        | Auto-increment direction (see [`EntryMode`]) |
//! | `0x07` | Display control   | Gate/display enable (see [`DisplayControl`]) |
//! | `0x20` | RAM address H     | Cursor `y`                              |
//! | `0x21` | RAM address V     | Cursor `x`                              |
//! | `0x22` | GRAM data         | Pixel stream                            |
//! | `0x33` | Scroll step       | Hardware scroll offset                  |
//! | `0x36` | Window H end      | `y1`                                    |
//! | `0x37` | Window H start    | `y0`                                    |
//! | `0x38` | Window V end      | `x1`                                    |
//! | `0x39` | Window V start    | `x0`                                    |

pub const DRIVER_OUTPUT: u8 = 0x01;
pub const LCD_AC_DRIVE: u8 = 0x02;
pub const ENTRY_MODE: u8 = 0x03;
pub const DISPLAY_CONTROL: u8 = 0x07;
pub const BLANK_PERIOD: u8 = 0x08;
pub const FRAME_CYCLE: u8 = 0x0B;
pub const INTERFACE: u8 = 0x0C;
pub const OSCILLATOR: u8 = 0x0F;
pub const POWER_1: u8 = 0x10;
pub const POWER_2: u8 = 0x11;

pub const RAM_ADDR_H: u8 = 0x20;
pub const RAM_ADDR_V: u8 = 0x21;
pub const GRAM_DATA: u8 = 0x22;

pub const GATE_SCAN: u8 = 0x30;
pub const SCROLL_END: u8 = 0x31;
pub const SCROLL_START: u8 = 0x32;
pub const SCROLL_STEP: u8 = 0x33;
pub const PARTIAL_END: u8 = 0x34;
pub const PARTIAL_START: u8 = 0x35;

pub const WINDOW_H_END: u8 = 0x36;
pub const WINDOW_H_START: u8 = 0x37;
pub const WINDOW_V_END: u8 = 0x38;
pub const WINDOW_V_START: u8 = 0x39;

pub const GAMMA_1: u8 = 0x50;
pub const GAMMA_2: u8 = 0x51;
pub const GAMMA_3: u8 = 0x52;
pub const GAMMA_4: u8 = 0x53;
pub const GAMMA_5: u8 = 0x54;
pub const GAMMA_6: u8 = 0x55;
pub const GAMMA_7: u8 = 0x56;
pub const GAMMA_8: u8 = 0x57;
pub const GAMMA_9: u8 = 0x58;
pub const GAMMA_10: u8 = 0x59;

pub const POWER_CONTROL_1: u8 = 0xB0;
pub const POWER_CONTROL_2: u8 = 0xB1;
pub const POWER_CONTROL_3: u8 = 0xB2;

pub const PAGE_SELECT: u8 = 0xFF;

bitflags::bitflags! {
    /// Entry mode register (`0x03`).
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct EntryMode: u16 {
        /// Address counter moves along the vertical axis first.
        const AM  = 0b0000_0000_0000_1000;
        /// Increment horizontally (clear to decrement).
        const ID0 = 0b0000_0000_0001_0000;
        /// Increment vertically (clear to decrement).
        const ID1 = 0b0000_0000_0010_0000;
        /// Swap red and blue on the way into GRAM.
        const BGR = 0b0001_0000_0000_0000;
    }

    /// Display control register (`0x07`).
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct DisplayControl: u16 {
        const D0  = 0b0000_0000_0000_0001;
        const D1  = 0b0000_0000_0000_0010;
        /// Grayscale inversion off.
        const REV = 0b0000_0000_0000_0100;
        /// 8-color mode.
        const CL  = 0b0000_0000_0000_1000;
        /// Gate outputs on.
        const GON = 0b0000_0000_0001_0000;
    }
}

impl EntryMode {
    /// Landscape, `x` fastest, both axes incrementing.
    pub const LANDSCAPE: Self = Self::BGR.union(Self::ID1).union(Self::ID0).union(Self::AM);
}

impl DisplayControl {
    pub const ON: Self = Self::GON.union(Self::REV).union(Self::D1).union(Self::D0);
    pub const OFF: Self = Self::empty();
}
