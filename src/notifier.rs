//! Debounced change events.
//!
//! A burst of changes collapses into one [`ColorEvent`] carrying the final
//! color. [`Debouncer`] is a single-slot register: scheduling replaces the
//! pending value and pushes the deadline out (cancel and reschedule), so the
//! last value of a burst is always delivered exactly once.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use web_time::Instant;

use crate::color::ColorState;

/// Payload delivered to change listeners.
///
/// `l` and `v` both carry the luma channel regardless of the active color
/// space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorEvent {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub v: f64,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub x: f64,
    pub y: f64,
    pub is_touch: bool,
}

impl ColorEvent {
    pub fn new(color: &ColorState, x: f64, y: f64, is_touch: bool) -> Self {
        let rgb = color.to_rgb();
        Self {
            h: color.hue(),
            s: color.saturation(),
            l: color.luma(),
            v: color.luma(),
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
            x,
            y,
            is_touch,
        }
    }
}

/// Trailing-edge debouncer holding at most one pending value.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn set_window(&mut self, window: Duration) {
        self.window = window;
    }

    /// Replace any pending value and restart the quiescence period.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.window));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the pending value is due, `None` when idle.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }

    /// Take the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = matches!(&self.pending, Some((_, deadline)) if *deadline <= now);
        if due {
            self.flush()
        } else {
            None
        }
    }

    /// Take the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(v, _)| v)
    }

    /// Drop the pending value without delivering it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

type Listener = Box<dyn FnMut(&ColorEvent)>;

/// Debouncer plus the listeners settled events are delivered to.
pub struct ChangeNotifier {
    debouncer: Debouncer<ColorEvent>,
    listeners: Vec<Listener>,
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("debouncer", &self.debouncer)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ChangeNotifier {
    pub fn new(window: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(window),
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ColorEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn debouncer(&self) -> &Debouncer<ColorEvent> {
        &self.debouncer
    }

    pub fn set_window(&mut self, window: Duration) {
        self.debouncer.set_window(window);
    }

    pub fn schedule(&mut self, event: ColorEvent, now: Instant) {
        self.debouncer.schedule(event, now);
    }

    fn dispatch(&mut self, event: ColorEvent) {
        log::debug!(
            "color change: h={:.1} s={:.3} l={:.3} rgb=({}, {}, {})",
            event.h,
            event.s,
            event.l,
            event.r,
            event.g,
            event.b
        );
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    /// Deliver the pending event if it has settled. Returns it when sent.
    pub fn poll(&mut self, now: Instant) -> Option<ColorEvent> {
        let event = self.debouncer.poll(now)?;
        self.dispatch(event);
        Some(event)
    }

    /// Deliver the pending event right away.
    pub fn flush(&mut self) -> Option<ColorEvent> {
        let event = self.debouncer.flush()?;
        self.dispatch(event);
        Some(event)
    }
}
