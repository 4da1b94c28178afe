//! Sizing, color, and timing defaults for the ring picker.

use crate::color::Rgb;

/// Overall widget size
pub const DIAMETER: f64 = 200.0;

/// Hue ring band width
pub const HUE_THICKNESS: f64 = 20.0;

/// Luma ring band width
pub const LUMA_THICKNESS: f64 = 10.0;

/// Gap between the hue ring, the luma ring and the color spot
pub const RING_GAP: f64 = 2.0;

/// Knob radius as a fraction of half the hue ring thickness
pub const KNOB_SIZE: f64 = 0.8;

/// Color spot radius as a fraction of the free inner radius
pub const COLOR_SPOT_RADIUS_FACTOR: f64 = 0.6;

pub const COLOR_SPOT_BORDER_WIDTH: f64 = 1.0;

/// Outer shadow width
pub const SHADOW_SIZE: f64 = 2.0;

pub const SHADOW_ALPHA: f64 = 0.35;

pub const KNOB_NORMAL: Rgb = Rgb::new(255, 255, 255);

pub const KNOB_SELECTED: Rgb = Rgb::new(255, 204, 0);

/// Arc segments used to approximate each ring gradient
pub const RING_SEGMENTS: usize = 120;

/// Quiescence window before a change event fires
pub const DEBOUNCE_MS: u64 = 5;

/// Step multiplier while shift is held
pub const SHIFT_FACTOR: f64 = 10.0;

pub const HUE_STEP: f64 = 1.0;

pub const SATURATION_STEP: f64 = 0.01;

pub const LIGHTNESS_STEP: f64 = 0.01;
