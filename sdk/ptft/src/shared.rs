//! # Shared Access
//!
//! The window and cursor are shared mutable controller state, so a draw has
//! to run start to finish without another draw sneaking in. When a display
//! is reached from more than one context (main loop and an interrupt, or
//! several tasks), park it in a [`SharedDisplay`] and draw inside
//! [`with`](SharedDisplay::with): the lock is held for the whole pipeline.
//!
//! ```ignore
//! static DISPLAY: SharedDisplay<PortBus> = SharedDisplay::empty();
//!
//! DISPLAY.install(Display::new(bus, &mut delay, Config::default()));
//! DISPLAY.with(|d| d.draw_rect(0, 0, 8, 8, Color::RED));
//! ```

use spin::Mutex;

use crate::{bus::ParallelBus, display::Display};

pub struct SharedDisplay<B> {
    inner: Mutex<Option<Display<B>>>,
}

impl<B: ParallelBus> SharedDisplay<B> {
    /// A slot with no display yet, usable in a `static`.
    pub const fn empty() -> Self {
        Self { inner: Mutex::new(None) }
    }

    pub const fn new(display: Display<B>) -> Self {
        Self { inner: Mutex::new(Some(display)) }
    }

    /// Put a display in the slot, returning whatever was there.
    pub fn install(&self, display: Display<B>) -> Option<Display<B>> {
        self.inner.lock().replace(display)
    }

    /// Take the display back out.
    pub fn take(&self) -> Option<Display<B>> {
        self.inner.lock().take()
    }

    /// Run `f` with the lock held. `None` if no display is installed.
    pub fn with<R>(&self, f: impl FnOnce(&mut Display<B>) -> R) -> Option<R> {
        self.inner.lock().as_mut().map(f)
    }

    /// Like [`with`](Self::with), but gives up instead of spinning when
    /// another context is mid-draw.
    pub fn try_with<R>(&self, f: impl FnOnce(&mut Display<B>) -> R) -> Option<R> {
        self.inner.try_lock()?.as_mut().map(f)
    }
}
