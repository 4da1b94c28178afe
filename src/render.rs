//! Declarative description of one frame.
//!
//! [`RenderRequest`] says what to draw: ring bands with their color
//! segments, knob shapes and fills, the color spot and the shadow. Turning
//! it into pixels is the drawing surface's job (see `ring_view`).

use std::f64::consts::TAU;

use floem::kurbo::Point;

use crate::color::{ColorSpace, ColorState, Hsl, Hsv, Rgb};
use crate::config::{KnobColors, PickerConfig};
use crate::constants;
use crate::geometry::{self, HitTarget, RingBand, RingLayout};
use crate::interaction::{DragTarget, Interaction};
use crate::math;

/// Which knob is drawn in its selected color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    None,
    Hue,
    Luma,
}

/// A slice of a ring band filled with one color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueKnob {
    pub points: [Point; 3],
    pub fill: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LumaKnob {
    pub center: Point,
    pub radius: f64,
    pub fill: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorSpot {
    pub radius: f64,
    pub fill: Rgb,
    pub border_width: f64,
    pub border_color: Rgb,
}

/// Soft edge drawn just outside the hue ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub radius: f64,
    pub size: f64,
    pub color: Rgb,
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub center: Point,
    pub hue_ring: RingBand,
    pub hue_segments: Vec<ArcSegment>,
    pub luma_ring: Option<RingBand>,
    pub luma_segments: Vec<ArcSegment>,
    pub hue_angle: f64,
    pub luma_angle: f64,
    pub highlight: Highlight,
    pub hue_knob: HueKnob,
    pub luma_knob: Option<LumaKnob>,
    pub color_spot: Option<ColorSpot>,
    pub shadow: Option<Shadow>,
}

/// Split a full turn into `count` segments colored by `color_at(t)`, where
/// `t` is the segment midpoint in `[0, 1)`.
fn segments(count: usize, color_at: impl Fn(f64) -> Rgb) -> Vec<ArcSegment> {
    let step = TAU / count as f64;
    (0..count)
        .map(|i| {
            let start_angle = i as f64 * step;
            ArcSegment {
                start_angle,
                end_angle: start_angle + step,
                color: color_at((i as f64 + 0.5) / count as f64),
            }
        })
        .collect()
}

/// Fully saturated color shown on the hue ring at `hue`.
pub fn hue_ring_color(hue: f64, space: ColorSpace) -> Rgb {
    match space {
        ColorSpace::Hsl => math::hsl_to_rgb(Hsl::new(hue, 1.0, 0.5)),
        ColorSpace::Hsv => math::hsv_to_rgb(Hsv::new(hue, 1.0, 1.0)),
    }
}

/// Color shown on the luma ring at `luma`, keeping the current hue and
/// saturation.
pub fn luma_ring_color(color: &ColorState, luma: f64) -> Rgb {
    ColorState::new(color.hue(), color.saturation(), luma, color.space()).to_rgb()
}

impl RenderRequest {
    pub fn build(layout: &RingLayout, interaction: &Interaction, config: &PickerConfig) -> Self {
        let color = interaction.color();
        let highlight = match interaction.drag() {
            DragTarget::HueKnob => Highlight::Hue,
            DragTarget::LumaKnob => Highlight::Luma,
            DragTarget::None => match interaction.hover() {
                Some(HitTarget::HueKnob) => Highlight::Hue,
                Some(HitTarget::LumaKnob) => Highlight::Luma,
                _ => Highlight::None,
            },
        };
        let pick = |colors: &KnobColors, selected: bool| {
            if selected {
                colors.selected
            } else {
                colors.normal
            }
        };

        let space = color.space();
        let luma_ring = layout.luma_ring();
        let luma_segments = if luma_ring.is_some() {
            segments(constants::RING_SEGMENTS, |t| luma_ring_color(color, t))
        } else {
            Vec::new()
        };

        Self {
            center: layout.center,
            hue_ring: layout.hue,
            hue_segments: segments(constants::RING_SEGMENTS, |t| {
                hue_ring_color(t * 360.0, space)
            }),
            luma_ring,
            luma_segments,
            hue_angle: geometry::hue_to_angle(color.hue()),
            luma_angle: geometry::luma_to_angle(color.luma()),
            highlight,
            hue_knob: HueKnob {
                points: layout.hue_knob(color.hue()),
                fill: pick(&config.hue_knob_color, highlight == Highlight::Hue),
            },
            luma_knob: luma_ring.map(|_| LumaKnob {
                center: layout.luma_knob_center(color.luma()),
                radius: layout.knob_radius,
                fill: pick(&config.luma_knob_color, highlight == Highlight::Luma),
            }),
            color_spot: config.show_color_spot.then(|| ColorSpot {
                radius: layout.color_spot_radius,
                fill: color.to_rgb(),
                border_width: config.color_spot_border_width,
                border_color: config.color_spot_border_color,
            }),
            shadow: (config.shadow_size > 0.0).then(|| Shadow {
                radius: layout.outer_radius,
                size: config.shadow_size,
                color: config.shadow_color,
                alpha: config.shadow_alpha,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::{Controls, PointerInput};

    fn build(config: &PickerConfig, interaction: &Interaction) -> RenderRequest {
        let layout = RingLayout::new(&config.geometry());
        RenderRequest::build(&layout, interaction, config)
    }

    #[test]
    fn idle_frame() {
        let config = PickerConfig::default();
        let ix = Interaction::new(config.initial_state());
        let frame = build(&config, &ix);

        assert_eq!(frame.highlight, Highlight::None);
        assert_eq!(frame.hue_knob.fill, config.hue_knob_color.normal);
        assert_eq!(frame.hue_segments.len(), constants::RING_SEGMENTS);
        assert_eq!(frame.hue_segments[0].start_angle, 0.0);
        let last = frame.hue_segments.last().unwrap();
        assert!((last.end_angle - TAU).abs() < 1e-9);
        assert_eq!(frame.color_spot.map(|s| s.fill), Some(Rgb::new(255, 0, 0)));
        assert!(frame.luma_knob.is_some());
        assert!(frame.shadow.is_some());
    }

    #[test]
    fn dragged_knob_is_highlighted() {
        let config = PickerConfig::default();
        let layout = RingLayout::new(&config.geometry());
        let mut ix = Interaction::new(config.initial_state());
        let controls = Controls {
            saturation: true,
            lightness: true,
            hue_lock: true,
            luma_ring_clickable: false,
        };
        ix.pointer_down(&layout, controls, PointerInput::at(29.0, 100.0));
        let frame = RenderRequest::build(&layout, &ix, &config);
        assert_eq!(frame.highlight, Highlight::Luma);
        assert_eq!(frame.luma_knob.unwrap().fill, config.luma_knob_color.selected);
        assert_eq!(frame.hue_knob.fill, config.hue_knob_color.normal);
    }

    #[test]
    fn hidden_parts_are_omitted() {
        let config = PickerConfig {
            show_color_spot: false,
            lightness_control: false,
            shadow_size: 0.0,
            ..PickerConfig::default()
        };
        let ix = Interaction::new(config.initial_state());
        let frame = build(&config, &ix);
        assert!(frame.color_spot.is_none());
        assert!(frame.luma_ring.is_none());
        assert!(frame.luma_knob.is_none());
        assert!(frame.luma_segments.is_empty());
        assert!(frame.shadow.is_none());
    }

    #[test]
    fn luma_ring_runs_dark_to_light() {
        let state = ColorState::new(0.0, 1.0, 0.5, ColorSpace::Hsl);
        assert_eq!(luma_ring_color(&state, 0.0), Rgb::BLACK);
        assert_eq!(luma_ring_color(&state, 1.0), Rgb::WHITE);
        assert_eq!(hue_ring_color(240.0, ColorSpace::Hsv), Rgb::new(0, 0, 255));
    }
}
