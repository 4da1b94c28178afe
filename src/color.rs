//! Color value types for floem-ring.
//!
//! [`Rgb`] is the display/event representation (0–255 channels). [`Hsl`] and
//! [`Hsv`] carry hue in degrees and the other channels in 0.0–1.0.
//! [`ColorState`] is the widget's single source of truth: hue, saturation and
//! a "luma" channel that is lightness or value depending on [`ColorSpace`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math;

/// 8-bit sRGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Error returned when a string is not a `#RGB` or `#RRGGBB` hex color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid hex color: {0:?}")]
pub struct ParseHexError(pub String);

impl Default for Rgb {
    fn default() -> Self {
        Self::new(128, 128, 128)
    }
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from arbitrary integers, clamping each channel into 0–255.
    pub fn clamped(r: i32, g: i32, b: i32) -> Self {
        let c = |v: i32| v.clamp(0, 255) as u8;
        Self::new(c(r), c(g), c(b))
    }

    /// Channels as 0.0–1.0 floats.
    pub(crate) fn to_unit(self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }

    /// Parse a hex string (with or without `#`, 3 or 6 chars).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let stripped = hex.trim().trim_start_matches('#');
        if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match stripped.len() {
            3 => {
                let r = u8::from_str_radix(&stripped[0..1], 16).ok()?;
                let g = u8::from_str_radix(&stripped[1..2], 16).ok()?;
                let b = u8::from_str_radix(&stripped[2..3], 16).ok()?;
                Some(Self::new(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = u8::from_str_radix(&stripped[0..2], 16).ok()?;
                let g = u8::from_str_radix(&stripped[2..4], 16).ok()?;
                let b = u8::from_str_radix(&stripped[4..6], 16).ok()?;
                Some(Self::new(r, g, b))
            }
            _ => None,
        }
    }

    /// Format as uppercase `RRGGBB` (no `#` prefix).
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseHexError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&value).ok_or(ParseHexError(value))
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_string()
    }
}

/// Hue in degrees, saturation and lightness in 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

/// Hue in degrees, saturation and value in 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }
}

/// Which model the luma ring edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    #[default]
    Hsl,
    Hsv,
}

/// The picker's color, always kept within range.
///
/// `luma` is lightness in [`ColorSpace::Hsl`] and value in [`ColorSpace::Hsv`].
/// Every mutator ends with [`ColorState::validate`], so hue stays in
/// `[0, 360)` and the other channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorState {
    hue: f64,
    saturation: f64,
    luma: f64,
    space: ColorSpace,
}

impl ColorState {
    pub fn new(hue: f64, saturation: f64, luma: f64, space: ColorSpace) -> Self {
        let mut state = Self {
            hue,
            saturation,
            luma,
            space,
        };
        state.validate();
        state
    }

    pub fn from_rgb(rgb: Rgb, space: ColorSpace) -> Self {
        let mut state = Self::new(0.0, 0.0, 0.0, space);
        state.set_rgb(rgb);
        state
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    pub fn luma(&self) -> f64 {
        self.luma
    }

    pub fn space(&self) -> ColorSpace {
        self.space
    }

    /// Wrap hue into `[0, 360)` and clamp saturation and luma into `[0, 1]`.
    pub fn validate(&mut self) {
        self.hue = math::wrap_hue(self.hue);
        self.saturation = math::clamp_unit(self.saturation);
        self.luma = math::clamp_unit(self.luma);
    }

    pub fn set_hue(&mut self, hue: f64) {
        self.hue = hue;
        self.validate();
    }

    pub fn set_saturation(&mut self, saturation: f64) {
        self.saturation = saturation;
        self.validate();
    }

    pub fn set_luma(&mut self, luma: f64) {
        self.luma = luma;
        self.validate();
    }

    pub fn to_hsl(&self) -> Hsl {
        match self.space {
            ColorSpace::Hsl => Hsl::new(self.hue, self.saturation, self.luma),
            ColorSpace::Hsv => math::hsv_to_hsl(Hsv::new(self.hue, self.saturation, self.luma)),
        }
    }

    pub fn to_hsv(&self) -> Hsv {
        match self.space {
            ColorSpace::Hsl => math::hsl_to_hsv(Hsl::new(self.hue, self.saturation, self.luma)),
            ColorSpace::Hsv => Hsv::new(self.hue, self.saturation, self.luma),
        }
    }

    pub fn to_rgb(&self) -> Rgb {
        match self.space {
            ColorSpace::Hsl => math::hsl_to_rgb(self.to_hsl()),
            ColorSpace::Hsv => math::hsv_to_rgb(self.to_hsv()),
        }
    }

    pub fn set_hsl(&mut self, hsl: Hsl) {
        let (h, s, l) = match self.space {
            ColorSpace::Hsl => (hsl.h, hsl.s, hsl.l),
            ColorSpace::Hsv => {
                let hsv = math::hsl_to_hsv(Hsl::new(
                    math::wrap_hue(hsl.h),
                    math::clamp_unit(hsl.s),
                    math::clamp_unit(hsl.l),
                ));
                (hsv.h, hsv.s, hsv.v)
            }
        };
        self.hue = h;
        self.saturation = s;
        self.luma = l;
        self.validate();
    }

    pub fn set_hsv(&mut self, hsv: Hsv) {
        let (h, s, v) = match self.space {
            ColorSpace::Hsv => (hsv.h, hsv.s, hsv.v),
            ColorSpace::Hsl => {
                let hsl = math::hsv_to_hsl(Hsv::new(
                    math::wrap_hue(hsv.h),
                    math::clamp_unit(hsv.s),
                    math::clamp_unit(hsv.v),
                ));
                (hsl.h, hsl.s, hsl.l)
            }
        };
        self.hue = h;
        self.saturation = s;
        self.luma = v;
        self.validate();
    }

    /// Replace the color with `rgb`.
    ///
    /// Achromatic colors keep the current hue so the hue knob does not jump
    /// back to 0 when the user picks a gray.
    pub fn set_rgb(&mut self, rgb: Rgb) {
        let (h, s, luma) = match self.space {
            ColorSpace::Hsl => {
                let hsl = math::rgb_to_hsl(rgb);
                (hsl.h, hsl.s, hsl.l)
            }
            ColorSpace::Hsv => {
                let hsv = math::rgb_to_hsv(rgb);
                (hsv.h, hsv.s, hsv.v)
            }
        };
        if s > 0.0 {
            self.hue = h;
        }
        self.saturation = s;
        self.luma = luma;
        self.validate();
    }

    /// Switch color-space mode, converting the stored channels.
    pub fn convert_to(&mut self, space: ColorSpace) {
        if space == self.space {
            return;
        }
        match space {
            ColorSpace::Hsv => {
                let hsv = self.to_hsv();
                self.saturation = hsv.s;
                self.luma = hsv.v;
            }
            ColorSpace::Hsl => {
                let hsl = self.to_hsl();
                self.saturation = hsl.s;
                self.luma = hsl.l;
            }
        }
        self.space = space;
        self.validate();
    }
}

impl Default for ColorState {
    fn default() -> Self {
        Self::new(0.0, 1.0, 0.5, ColorSpace::Hsl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: u8, b: u8) -> bool {
        (a as i16 - b as i16).abs() <= 1
    }

    #[test]
    fn hue_wraps_into_range() {
        let mut state = ColorState::default();
        state.set_hue(400.0);
        assert!((state.hue() - 40.0).abs() < 1e-9);
        state.set_hue(-10.0);
        assert!((state.hue() - 350.0).abs() < 1e-9);
    }

    #[test]
    fn saturation_and_luma_clamp() {
        let mut state = ColorState::default();
        state.set_saturation(1.5);
        state.set_luma(-0.2);
        assert_eq!(state.saturation(), 1.0);
        assert_eq!(state.luma(), 0.0);
    }

    #[test]
    fn nan_channels_become_zero() {
        let state = ColorState::new(f64::NAN, f64::NAN, f64::NAN, ColorSpace::Hsv);
        assert_eq!(state.hue(), 0.0);
        assert_eq!(state.saturation(), 0.0);
        assert_eq!(state.luma(), 0.0);
    }

    #[test]
    fn mode_switch_round_trip_preserves_rgb() {
        for rgb in [
            Rgb::new(12, 200, 99),
            Rgb::new(255, 0, 0),
            Rgb::new(1, 2, 3),
            Rgb::new(250, 250, 10),
            Rgb::new(128, 128, 128),
        ] {
            let mut state = ColorState::from_rgb(rgb, ColorSpace::Hsl);
            let before = state.to_rgb();
            state.convert_to(ColorSpace::Hsv);
            state.convert_to(ColorSpace::Hsl);
            let after = state.to_rgb();
            assert!(close(before.r, after.r), "{before:?} vs {after:?}");
            assert!(close(before.g, after.g), "{before:?} vs {after:?}");
            assert!(close(before.b, after.b), "{before:?} vs {after:?}");
        }
    }

    #[test]
    fn gray_keeps_previous_hue() {
        let mut state = ColorState::new(210.0, 1.0, 0.5, ColorSpace::Hsl);
        state.set_rgb(Rgb::new(128, 128, 128));
        assert_eq!(state.hue(), 210.0);
        assert_eq!(state.saturation(), 0.0);
    }

    #[test]
    fn set_hsl_in_hsv_mode_stores_hsv() {
        let mut state = ColorState::new(0.0, 0.0, 0.0, ColorSpace::Hsv);
        state.set_hsl(Hsl::new(120.0, 1.0, 0.5));
        assert!((state.saturation() - 1.0).abs() < 1e-9);
        assert!((state.luma() - 1.0).abs() < 1e-9);
        assert_eq!(state.to_rgb(), Rgb::new(0, 255, 0));
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(Rgb::from_hex("#3B82F6"), Some(Rgb::new(0x3B, 0x82, 0xF6)));
        assert_eq!(Rgb::from_hex("fff"), Some(Rgb::WHITE));
        assert_eq!(Rgb::from_hex("#12345"), None);
        assert_eq!(Rgb::from_hex("zzzzzz"), None);
        assert_eq!(Rgb::new(0x3B, 0x82, 0xF6).to_string(), "#3B82F6");
    }

    #[test]
    fn clamped_constructor() {
        assert_eq!(Rgb::clamped(300, -5, 17), Rgb::new(255, 0, 17));
    }

    #[test]
    fn rgb_serializes_as_hex() {
        let json = serde_json::to_string(&Rgb::new(255, 0, 16)).unwrap();
        assert_eq!(json, "\"#FF0010\"");
        let back: Rgb = serde_json::from_str("\"#abc\"").unwrap();
        assert_eq!(back, Rgb::new(0xAA, 0xBB, 0xCC));
        assert!(serde_json::from_str::<Rgb>("\"nope\"").is_err());
    }
}
