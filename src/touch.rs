//! Touch-event callback registry and interrupt entry point.
//!
//! Subscribers hand the registry a caller-owned [`TouchCallback`] record;
//! the registry links the records into an intrusive singly-linked list and
//! never takes ownership. There is no removal operation, so a record must
//! outlive the registry it was added to.

use core::cell::Cell;

use crate::log::error;

/// Function invoked with the (x, y) movement delta of a touch event.
pub type TouchCallbackFn = fn(x: i8, y: i8);

/// Caller-owned subscriber record.
///
/// The next link is managed by the registry; callers only supply the
/// function to invoke.
pub struct TouchCallback<'a> {
    func: TouchCallbackFn,
    next: Cell<Option<&'a TouchCallback<'a>>>,
}

impl<'a> TouchCallback<'a> {
    /// Creates a record invoking `func` on every dispatched event.
    pub const fn new(func: TouchCallbackFn) -> Self {
        Self {
            func,
            next: Cell::new(None),
        }
    }
}

/// Source of decoded touch events, supplied by the platform integration.
///
/// The concrete sensor protocol is out of scope for this crate; whatever
/// implements this trait owns the register layout of the touch sensor and
/// the one-time setup of its interrupt line. Implementations intended to be
/// driven from interrupt context must keep [`TouchSource::read_event`] free
/// of long-blocking bus operations.
pub trait TouchSource {
    /// Error type produced by the concrete sensor implementation.
    type Error;

    /// Performs one-time setup of the sensor and its interrupt line.
    fn init(&mut self) -> core::result::Result<(), Self::Error>;

    /// Returns the pending movement delta, if the sensor has one.
    fn read_event(&mut self) -> core::result::Result<Option<(i8, i8)>, Self::Error>;
}

/// Registry of touch-event subscribers.
///
/// Dispatch order is most-recently-added first: [`TouchRegistry::add_callback`]
/// pushes at the head of the list and dispatch walks from the head.
pub struct TouchRegistry<'a> {
    head: Option<&'a TouchCallback<'a>>,
}

impl<'a> TouchRegistry<'a> {
    /// Creates an empty registry.
    pub const fn new() -> Self {
        Self { head: None }
    }

    /// Performs one-time setup of the underlying sensor.
    pub fn init<S>(&mut self, source: &mut S) -> core::result::Result<(), S::Error>
    where
        S: TouchSource,
    {
        source.init()
    }

    /// Registers `callback` for future notification.
    ///
    /// The registry keeps only a reference; the caller retains ownership of
    /// the record's storage.
    pub fn add_callback(&mut self, callback: &'a TouchCallback<'a>) {
        callback.next.set(self.head);
        self.head = Some(callback);
    }

    /// Interrupt-layer entry point for activity on the sensor's line.
    ///
    /// `pin` and `events` use the platform's encoding and are recorded for
    /// diagnostics only; the event itself comes from `source`. At most one
    /// event is read per invocation and fanned out to every registered
    /// callback.
    pub fn handle_interrupt<S>(
        &mut self,
        pin: u8,
        events: u32,
        source: &mut S,
    ) -> core::result::Result<(), S::Error>
    where
        S: TouchSource,
    {
        let _ = (pin, events);

        let event = source.read_event().inspect_err(|_| {
            error!("touch read failed on pin {=u8}, events {=u32:#x}", pin, events);
        })?;

        if let Some((x, y)) = event {
            self.dispatch(x, y);
        }

        Ok(())
    }

    /// Invokes every registered callback with the given delta.
    pub fn dispatch(&self, x: i8, y: i8) {
        let mut current = self.head;
        while let Some(callback) = current {
            (callback.func)(x, y);
            current = callback.next.get();
        }
    }
}

impl<'a> Default for TouchRegistry<'a> {
    fn default() -> Self {
        Self::new()
    }
}
