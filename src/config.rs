//! Typed picker configuration.
//!
//! [`PickerConfig`] carries every recognized option with a documented
//! default. Loading from JSON is lenient: each recognized value is applied
//! on its own, values that fail to deserialize keep their default, and
//! unknown keys are ignored.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::color::{ColorSpace, ColorState, Rgb};
use crate::constants;
use crate::geometry::GeometryConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("config must be a JSON object")]
    NotAnObject,
}

/// Knob fill colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KnobColors {
    pub normal: Rgb,
    /// Used while the knob is hovered or dragged.
    pub selected: Rgb,
}

impl Default for KnobColors {
    fn default() -> Self {
        Self {
            normal: constants::KNOB_NORMAL,
            selected: constants::KNOB_SELECTED,
        }
    }
}

/// Key names and step for one channel.
///
/// Key names are logical key names such as `ArrowUp`, `PageDown` or `h`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelKeys {
    pub increase: String,
    pub decrease: String,
    pub step: f64,
}

impl ChannelKeys {
    fn new(increase: &str, decrease: &str, step: f64) -> Self {
        Self {
            increase: increase.to_string(),
            decrease: decrease.to_string(),
            step,
        }
    }

    /// `Some(1.0)` for the increase key, `Some(-1.0)` for decrease.
    pub(crate) fn direction(&self, key: &str) -> Option<f64> {
        if key == self.increase {
            Some(1.0)
        } else if key == self.decrease {
            Some(-1.0)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    pub enabled: bool,
    /// Whether the widget can take keyboard focus at all.
    pub focusable: bool,
    /// Step multiplier while shift is held.
    pub shift_factor: f64,
    pub hue: ChannelKeys,
    pub saturation: ChannelKeys,
    pub lightness: ChannelKeys,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            focusable: true,
            shift_factor: constants::SHIFT_FACTOR,
            hue: ChannelKeys::new("ArrowRight", "ArrowLeft", constants::HUE_STEP),
            saturation: ChannelKeys::new("ArrowUp", "ArrowDown", constants::SATURATION_STEP),
            lightness: ChannelKeys::new("PageUp", "PageDown", constants::LIGHTNESS_STEP),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub diameter: f64,
    pub hue_thickness: f64,
    pub luma_thickness: f64,
    /// Initial hue in degrees.
    pub hue: f64,
    pub saturation: f64,
    /// Initial lightness, or value in HSV mode.
    pub lightness: f64,
    /// Initial color; wins over `hue`/`saturation`/`lightness`.
    pub rgb: Option<Rgb>,
    pub color_space: ColorSpace,
    /// Radial dragging of the hue knob edits saturation.
    pub saturation_control: bool,
    /// Show the luma ring and its knob.
    pub lightness_control: bool,
    pub show_color_spot: bool,
    pub color_spot_radius_factor: f64,
    pub color_spot_border_width: f64,
    pub color_spot_border_color: Rgb,
    /// Knob radius as a fraction of half the hue ring thickness.
    pub knob_size: f64,
    pub hue_knob_color: KnobColors,
    pub luma_knob_color: KnobColors,
    pub shadow_size: f64,
    pub shadow_color: Rgb,
    pub shadow_alpha: f64,
    /// Holding the lock modifier freezes hue while dragging.
    pub hue_lock: bool,
    pub luma_ring_clickable: bool,
    pub keyboard: KeyboardConfig,
    pub debounce_ms: u64,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            diameter: constants::DIAMETER,
            hue_thickness: constants::HUE_THICKNESS,
            luma_thickness: constants::LUMA_THICKNESS,
            hue: 0.0,
            saturation: 1.0,
            lightness: 0.5,
            rgb: None,
            color_space: ColorSpace::Hsl,
            saturation_control: true,
            lightness_control: true,
            show_color_spot: true,
            color_spot_radius_factor: constants::COLOR_SPOT_RADIUS_FACTOR,
            color_spot_border_width: constants::COLOR_SPOT_BORDER_WIDTH,
            color_spot_border_color: Rgb::BLACK,
            knob_size: constants::KNOB_SIZE,
            hue_knob_color: KnobColors::default(),
            luma_knob_color: KnobColors::default(),
            shadow_size: constants::SHADOW_SIZE,
            shadow_color: Rgb::BLACK,
            shadow_alpha: constants::SHADOW_ALPHA,
            hue_lock: true,
            luma_ring_clickable: false,
            keyboard: KeyboardConfig::default(),
            debounce_ms: constants::DEBOUNCE_MS,
        }
    }
}

/// Escape a key for use in a JSON pointer.
fn pointer_token(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

/// Apply `overrides` onto `root` one leaf at a time, keeping a leaf only if
/// the whole document still deserializes.
fn apply_overrides(root: &mut Value, prefix: &str, overrides: &Map<String, Value>) {
    for (key, value) in overrides {
        let path = format!("{prefix}/{}", pointer_token(key));
        let existing = root.pointer(&path).map(Value::is_object);
        match (existing, value) {
            (None, _) => {
                log::debug!("ignoring unknown config key `{path}`");
            }
            (Some(true), Value::Object(nested)) => apply_overrides(root, &path, nested),
            (Some(_), _) => {
                let mut candidate = root.clone();
                if let Some(slot) = candidate.pointer_mut(&path) {
                    *slot = value.clone();
                }
                match serde_json::from_value::<PickerConfig>(candidate.clone()) {
                    Ok(_) => *root = candidate,
                    Err(err) => {
                        log::warn!("ignoring config value {value} for `{path}`: {err}");
                    }
                }
            }
        }
    }
}

fn sanitize(name: &str, value: f64, default: f64, valid: impl Fn(f64) -> bool) -> f64 {
    if value.is_finite() && valid(value) {
        value
    } else {
        log::warn!("config `{name}` = {value} is out of range, using {default}");
        default
    }
}

/// Clamp `value` into `[min, max]`. Only non-finite values fall back to
/// `default`.
fn clamp_into(name: &str, value: f64, default: f64, min: f64, max: f64) -> f64 {
    if !value.is_finite() {
        log::warn!("config `{name}` = {value} is not a number, using {default}");
        return default.clamp(min, max);
    }
    let clamped = value.clamp(min, max);
    if clamped != value {
        log::debug!("config `{name}` = {value} clamped to {clamped}");
    }
    clamped
}

impl PickerConfig {
    /// Build from a JSON object, falling back to defaults value by value.
    pub fn from_json_value(value: &Value) -> Self {
        let defaults = Self::default();
        let Value::Object(overrides) = value else {
            log::warn!("config must be a JSON object, using defaults");
            return defaults;
        };
        let mut merged = match serde_json::to_value(&defaults) {
            Ok(v) => v,
            Err(err) => {
                log::warn!("could not serialize default config: {err}");
                return defaults;
            }
        };
        apply_overrides(&mut merged, "", overrides);
        serde_json::from_value(merged).unwrap_or(defaults)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(ConfigError::NotAnObject);
        }
        Ok(Self::from_json_value(&value))
    }

    /// Clamp numeric options into usable ranges.
    pub fn validated(mut self) -> Self {
        let d = Self::default();
        self.diameter = clamp_into("diameter", self.diameter, d.diameter, 1.0, f64::INFINITY);
        let half = (self.diameter / 2.0).max(1.0);
        self.hue_thickness =
            clamp_into("hue_thickness", self.hue_thickness, d.hue_thickness, 1.0, half);
        self.luma_thickness =
            clamp_into("luma_thickness", self.luma_thickness, d.luma_thickness, 1.0, half);
        self.knob_size = sanitize("knob_size", self.knob_size, d.knob_size, |v| v > 0.0);
        self.color_spot_radius_factor = clamp_into(
            "color_spot_radius_factor",
            self.color_spot_radius_factor,
            d.color_spot_radius_factor,
            0.0,
            1.0,
        );
        self.color_spot_border_width = clamp_into(
            "color_spot_border_width",
            self.color_spot_border_width,
            d.color_spot_border_width,
            0.0,
            f64::INFINITY,
        );
        self.shadow_size =
            clamp_into("shadow_size", self.shadow_size, d.shadow_size, 0.0, half / 2.0);
        self.shadow_alpha = clamp_into("shadow_alpha", self.shadow_alpha, d.shadow_alpha, 0.0, 1.0);

        let k = &mut self.keyboard;
        let dk = &d.keyboard;
        k.shift_factor = sanitize(
            "keyboard.shift_factor",
            k.shift_factor,
            dk.shift_factor,
            |v| v > 0.0,
        );
        k.hue.step = sanitize("keyboard.hue.step", k.hue.step, dk.hue.step, |_| true);
        k.saturation.step = sanitize(
            "keyboard.saturation.step",
            k.saturation.step,
            dk.saturation.step,
            |_| true,
        );
        k.lightness.step = sanitize(
            "keyboard.lightness.step",
            k.lightness.step,
            dk.lightness.step,
            |_| true,
        );
        self
    }

    pub fn knob_radius(&self) -> f64 {
        self.knob_size * self.hue_thickness / 2.0
    }

    pub fn geometry(&self) -> GeometryConfig {
        GeometryConfig {
            diameter: self.diameter,
            hue_thickness: self.hue_thickness,
            luma_thickness: self.luma_thickness,
            knob_radius: self.knob_radius(),
            color_spot_radius_factor: self.color_spot_radius_factor,
            shadow_size: self.shadow_size,
            show_luma_ring: self.lightness_control,
        }
    }

    /// Starting color: `rgb` when given, else the hue/saturation/lightness
    /// triple in the configured space.
    pub fn initial_state(&self) -> ColorState {
        match self.rgb {
            Some(rgb) => ColorState::from_rgb(rgb, self.color_space),
            None => ColorState::new(self.hue, self.saturation, self.lightness, self.color_space),
        }
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
