//! # ptft
//!
//! Driver for 176×220 TFT controllers hanging off an 8-bit parallel bus
//! (CS, RS, WR and RD control lines, plus reset and backlight).
//!
//! The panel is driven in landscape: `x` runs `0..220`, `y` runs `0..176`,
//! and the controller auto-increments along `x` first.
//!
//! ```text
//! Application
//!     │
//!     ▼
//! ┌────────────────────────────┐
//! │ Display (draw / blit /     │
//! │ scroll / init)             │
//! └──────────────┬─────────────┘
//!                ▼
//!       ┌─────────────────┐
//!       │ Window + stream │
//!       └────────┬────────┘
//!                ▼
//!       ┌─────────────────┐
//!       │  ParallelBus    │  PortBus / GpioBus / emulator
//!       └─────────────────┘
//! ```
//!
//! ## Drawing
//!
//! ```ignore
//! let mut display = Display::new(bus, &mut delay, Config::default());
//!
//! display.draw_rect(10, 10, 32, 16, Color::RED)?;
//! display.draw_tile(40, 40, 2, &HERO, &PALETTE, Flip::HORIZONTAL)?;
//! display.scroll_forward();
//! ```
//!
//! Every drawing call validates its coordinates before touching the bus.
//! The bus itself has no readback, so nothing past validation is ever
//! confirmed by the hardware.

#![cfg_attr(not(test), no_std)]

pub mod blit;
pub mod bus;
pub mod color;
pub mod display;
pub mod draw;
pub mod error;
pub mod init;
pub mod port;
pub mod regs;
pub mod scroll;
pub mod shared;
pub mod stream;
pub mod tile;
pub mod window;

pub use blit::CompositeTile;
pub use bus::{ControlLines, ParallelBus};
pub use color::Color;
pub use display::{Display, HEIGHT, WIDTH};
pub use error::Error;
pub use init::Config;
pub use port::{GpioBus, Port, PortBus};
pub use shared::SharedDisplay;
pub use stream::PixelStream;
pub use tile::{Flip, Palette, PaletteId, PaletteTable, Span, Tile, TileRow};
pub use window::Window;
