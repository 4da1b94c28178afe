//! # floem-ring
//!
//! A hue ring color picker widget for [Floem](https://github.com/lapce/floem).
//!
//! Hue is picked on an outer ring, saturation by how far the hue knob is
//! dragged toward the center, and lightness (or value) on an optional inner
//! ring. The interaction logic lives in [`RingPicker`], which has no
//! dependency on a window and can be driven directly; [`ring_picker`] wraps
//! it in a Floem view.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem::prelude::*;
//! use floem_ring::{ring_picker, PickerConfig, Rgb};
//!
//! let color = RwSignal::new(Rgb::new(59, 130, 246));
//! let picker = ring_picker(color, PickerConfig::default())
//!     .on_color_change(|e| println!("h={:.0} s={:.2} l={:.2}", e.h, e.s, e.l));
//! // Use `picker` in your Floem view tree.
//! ```

mod clipboard;
mod color;
pub mod config;
pub mod constants;
pub mod geometry;
pub mod interaction;
mod math;
pub mod notifier;
mod picker;
pub mod render;
mod ring_view;

pub use color::{ColorSpace, ColorState, Hsl, Hsv, ParseHexError, Rgb};
pub use config::{ConfigError, PickerConfig};
pub use math::{
    clamp_unit, hsl_to_hsv, hsl_to_rgb, hsv_to_hsl, hsv_to_rgb, rgb_to_hsl, rgb_to_hsv, wrap_hue,
};
pub use notifier::ColorEvent;
pub use picker::RingPicker;
pub use ring_view::{ring_picker, RingPickerView};
