//! Host-side model of the TFT controller, seen from the pins.
//!
//! [`Controller`] implements [`ptft::ParallelBus`], so a real
//! [`ptft::Display`] can be driven against it. It decodes WR edges into
//! register and GRAM writes the way the silicon does and keeps the result
//! inspectable: GRAM contents, the visible (scrolled) frame, register values
//! and any protocol faults it noticed.
//!
//! Only the landscape entry mode the driver programs is modelled.

#![cfg_attr(not(test), no_std)]
extern crate alloc;

pub mod clock;
pub mod controller;

pub use clock::Clock;
pub use controller::{Controller, Faults, Stats};
