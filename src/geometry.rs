//! Ring geometry: polar conversion, angle ↔ channel mapping, knob shapes and
//! hit-testing.
//!
//! Everything here is pure. Angles follow `atan2` on screen coordinates:
//! 0 points to 3 o'clock and positive angles turn clockwise because the y
//! axis points down.

use std::f64::consts::{PI, TAU};

use floem::kurbo::{Point, Vec2};

use crate::color::ColorState;
use crate::constants;
use crate::math;

/// Inputs the ring layout is derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryConfig {
    pub diameter: f64,
    pub hue_thickness: f64,
    pub luma_thickness: f64,
    pub knob_radius: f64,
    pub color_spot_radius_factor: f64,
    pub shadow_size: f64,
    pub show_luma_ring: bool,
}

/// A position relative to the ring center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    /// Distance from center, always `>= 0`.
    pub distance: f64,
    /// Angle in radians, `(-π, π]`.
    pub angle: f64,
}

pub fn pixel_to_polar(point: Point, center: Point) -> Polar {
    let d = point - center;
    Polar {
        distance: d.hypot(),
        angle: d.y.atan2(d.x),
    }
}

/// Pointer angle (radians) → hue in degrees, `[0, 360)`.
pub fn angle_to_hue(angle: f64) -> f64 {
    let mut hue = angle * 180.0 / PI;
    if hue < 0.0 {
        hue += 360.0;
    }
    math::wrap_hue(hue)
}

/// Hue in degrees → knob angle in radians, `[0, 2π)`.
pub fn hue_to_angle(hue: f64) -> f64 {
    math::wrap_hue(hue) * PI / 180.0
}

/// Pointer angle (radians) → luma, `[0, 1)`. One turn spans the channel.
pub fn angle_to_luma(angle: f64) -> f64 {
    let luma = (angle / TAU).rem_euclid(1.0);
    if luma >= 1.0 {
        0.0
    } else {
        luma
    }
}

pub fn luma_to_angle(luma: f64) -> f64 {
    math::clamp_unit(luma) * TAU
}

/// Returns barycentric weights of `p` within triangle `(a, b, c)`, or `None`
/// for a degenerate triangle.
fn barycentric(p: Point, a: Point, b: Point, c: Point) -> Option<(f64, f64, f64)> {
    let denom = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    if denom.abs() <= f64::EPSILON {
        return None;
    }
    let wa = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) / denom;
    let wb = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) / denom;
    Some((wa, wb, 1.0 - wa - wb))
}

pub fn point_in_triangle(p: Point, [a, b, c]: [Point; 3]) -> bool {
    const EPS: f64 = 1e-9;
    match barycentric(p, a, b, c) {
        Some((wa, wb, wc)) => wa >= -EPS && wb >= -EPS && wc >= -EPS,
        None => false,
    }
}

/// An annulus described by its mid-line radius and band width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingBand {
    pub radius: f64,
    pub thickness: f64,
}

impl RingBand {
    pub fn inner(&self) -> f64 {
        (self.radius - self.thickness / 2.0).max(0.0)
    }

    pub fn outer(&self) -> f64 {
        self.radius + self.thickness / 2.0
    }

    pub fn contains(&self, distance: f64) -> bool {
        (distance - self.radius).abs() <= self.thickness / 2.0
    }
}

/// What a pointer position lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    HueKnob,
    LumaKnob,
    HueRing,
    LumaRing,
}

impl HitTarget {
    pub fn is_knob(self) -> bool {
        matches!(self, HitTarget::HueKnob | HitTarget::LumaKnob)
    }
}

/// Radii derived from a [`GeometryConfig`]. Rebuild it whenever the config
/// changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingLayout {
    pub center: Point,
    pub outer_radius: f64,
    pub hue: RingBand,
    luma: RingBand,
    show_luma_ring: bool,
    pub knob_radius: f64,
    /// Free radius inside the innermost visible ring.
    pub inner_radius: f64,
    pub color_spot_radius: f64,
}

impl RingLayout {
    pub fn new(config: &GeometryConfig) -> Self {
        let half = config.diameter / 2.0;
        let center = Point::new(half, half);
        let outer_radius = (half - config.shadow_size).max(0.0);
        let hue = RingBand {
            radius: (outer_radius - config.hue_thickness / 2.0).max(0.0),
            thickness: config.hue_thickness,
        };
        let luma = RingBand {
            radius: (hue.inner() - constants::RING_GAP - config.luma_thickness / 2.0).max(0.0),
            thickness: config.luma_thickness,
        };
        let innermost = if config.show_luma_ring {
            luma.inner()
        } else {
            hue.inner()
        };
        let inner_radius = (innermost - constants::RING_GAP).max(0.0);
        Self {
            center,
            outer_radius,
            hue,
            luma,
            show_luma_ring: config.show_luma_ring,
            knob_radius: config.knob_radius,
            inner_radius,
            color_spot_radius: inner_radius * math::clamp_unit(config.color_spot_radius_factor),
        }
    }

    pub fn luma_ring(&self) -> Option<RingBand> {
        self.show_luma_ring.then_some(self.luma)
    }

    pub fn polar(&self, point: Point) -> Polar {
        pixel_to_polar(point, self.center)
    }

    /// Point at `radial` along `angle` from the center, shifted `tangential`
    /// perpendicular to it.
    fn point_at(&self, angle: f64, radial: f64, tangential: f64) -> Point {
        let dir = Vec2::new(angle.cos(), angle.sin());
        let perp = Vec2::new(-dir.y, dir.x);
        self.center + dir * radial + perp * tangential
    }

    /// Hue knob triangle: tip on the inner edge of the hue band, base across
    /// the outer edge.
    pub fn hue_knob(&self, hue: f64) -> [Point; 3] {
        let angle = hue_to_angle(hue);
        [
            self.point_at(angle, self.hue.inner(), 0.0),
            self.point_at(angle, self.hue.outer(), -self.knob_radius),
            self.point_at(angle, self.hue.outer(), self.knob_radius),
        ]
    }

    pub fn luma_knob_center(&self, luma: f64) -> Point {
        self.point_at(luma_to_angle(luma), self.luma.radius, 0.0)
    }

    /// Normalize a radial distance against the saturation band, which runs
    /// from the knob margin at the center to the inner edge of the hue ring.
    pub fn saturation_at(&self, distance: f64) -> f64 {
        let inner = self.knob_radius;
        let outer = self.hue.inner();
        if outer <= inner {
            return if distance >= outer { 1.0 } else { 0.0 };
        }
        math::clamp_unit((distance - inner) / (outer - inner))
    }

    /// Classify `point` in priority order: hue knob, luma knob, hue ring,
    /// luma ring. The luma knob only counts while the luma ring is shown and
    /// the luma band only when it is also clickable.
    pub fn hit_test(
        &self,
        point: Point,
        state: &ColorState,
        luma_ring_clickable: bool,
    ) -> Option<HitTarget> {
        if point_in_triangle(point, self.hue_knob(state.hue())) {
            return Some(HitTarget::HueKnob);
        }
        if self.show_luma_ring
            && (point - self.luma_knob_center(state.luma())).hypot() <= self.knob_radius
        {
            return Some(HitTarget::LumaKnob);
        }
        let distance = self.polar(point).distance;
        if self.hue.contains(distance) {
            return Some(HitTarget::HueRing);
        }
        if self.show_luma_ring && luma_ring_clickable && self.luma.contains(distance) {
            return Some(HitTarget::LumaRing);
        }
        None
    }
}
