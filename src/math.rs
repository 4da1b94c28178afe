//! Color math — direct conversions without external dependencies.
//!
//! Hue is in degrees, every other channel in 0.0–1.0, RGB in 0–255.
//! Inputs are wrapped/clamped before use; RGB output is clamped and
//! truncated to integers.

use crate::color::{Hsl, Hsv, Rgb};

/// Wrap a hue in degrees into `[0, 360)`. Non-finite input maps to 0.
pub fn wrap_hue(hue: f64) -> f64 {
    if !hue.is_finite() {
        return 0.0;
    }
    let h = hue.rem_euclid(360.0);
    // rem_euclid rounds up to 360.0 for tiny negative inputs
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

/// Clamp into `[0, 1]`. NaN maps to 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn to_channel(unit: f64) -> u8 {
    (unit * 255.0).clamp(0.0, 255.0) as u8
}

/// Hue in degrees from normalized RGB, 0 for achromatic input.
fn hue_of(r: f64, g: f64, b: f64, max: f64, delta: f64) -> f64 {
    if delta == 0.0 {
        return 0.0;
    }
    let sector = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    wrap_hue(sector * 60.0)
}

/// HSV → RGB.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let h = wrap_hue(hsv.h);
    let s = clamp_unit(hsv.s);
    let v = clamp_unit(hsv.v);
    if s == 0.0 {
        let c = to_channel(v);
        return Rgb::new(c, c, c);
    }
    let h6 = h / 60.0;
    let i = h6.floor() as u32;
    let f = h6 - h6.floor();
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match i % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgb::new(to_channel(r), to_channel(g), to_channel(b))
}

/// HSL → RGB.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = wrap_hue(hsl.h);
    let s = clamp_unit(hsl.s);
    let l = clamp_unit(hsl.l);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h6 = h / 60.0;
    let x = c * (1.0 - (h6 % 2.0 - 1.0).abs());
    let (r, g, b) = match h6.floor() as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    Rgb::new(to_channel(r + m), to_channel(g + m), to_channel(b + m))
}

/// RGB → HSV.
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let (r, g, b) = rgb.to_unit();
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { delta / max };
    Hsv::new(hue_of(r, g, b, max, delta), s, v)
}

/// RGB → HSL.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let (r, g, b) = rgb.to_unit();
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let l = (max + min) / 2.0;
    let s = if delta == 0.0 {
        0.0
    } else {
        clamp_unit(delta / (1.0 - (2.0 * l - 1.0).abs()))
    };
    Hsl::new(hue_of(r, g, b, max, delta), s, l)
}

/// HSL → HSV, hue preserved.
pub fn hsl_to_hsv(hsl: Hsl) -> Hsv {
    let l = hsl.l;
    let v = l + hsl.s * l.min(1.0 - l);
    let s = if v == 0.0 { 0.0 } else { 2.0 * (1.0 - l / v) };
    Hsv::new(hsl.h, clamp_unit(s), clamp_unit(v))
}

/// HSV → HSL, hue preserved.
pub fn hsv_to_hsl(hsv: Hsv) -> Hsl {
    let v = hsv.v;
    let l = v * (1.0 - hsv.s / 2.0);
    let s = if l == 0.0 || l == 1.0 {
        0.0
    } else {
        (v - l) / l.min(1.0 - l)
    };
    Hsl::new(hsv.h, clamp_unit(s), clamp_unit(l))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within_one(a: Rgb, b: Rgb) -> bool {
        let d = |x: u8, y: u8| (x as i16 - y as i16).abs() <= 1;
        d(a.r, b.r) && d(a.g, b.g) && d(a.b, b.b)
    }

    #[test]
    fn primaries() {
        assert_eq!(hsl_to_rgb(Hsl::new(0.0, 1.0, 0.5)), Rgb::new(255, 0, 0));
        assert_eq!(hsl_to_rgb(Hsl::new(120.0, 1.0, 0.5)), Rgb::new(0, 255, 0));
        assert_eq!(hsl_to_rgb(Hsl::new(240.0, 1.0, 0.5)), Rgb::new(0, 0, 255));
        assert_eq!(hsv_to_rgb(Hsv::new(60.0, 1.0, 1.0)), Rgb::new(255, 255, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(300.0, 1.0, 1.0)), Rgb::new(255, 0, 255));
    }

    #[test]
    fn achromatic_gray() {
        let hsl = rgb_to_hsl(Rgb::new(128, 128, 128));
        assert_eq!(hsl.h, 0.0);
        assert_eq!(hsl.s, 0.0);
        assert!((hsl.l - 0.502).abs() < 1e-3);

        let hsv = rgb_to_hsv(Rgb::new(128, 128, 128));
        assert_eq!(hsv.h, 0.0);
        assert_eq!(hsv.s, 0.0);
    }

    #[test]
    fn out_of_range_inputs_are_normalized() {
        assert_eq!(
            hsl_to_rgb(Hsl::new(480.0, 2.0, 0.5)),
            hsl_to_rgb(Hsl::new(120.0, 1.0, 0.5))
        );
        assert_eq!(hsv_to_rgb(Hsv::new(-60.0, 1.0, 1.0)), Rgb::new(255, 0, 255));
        assert_eq!(hsl_to_rgb(Hsl::new(0.0, 0.0, -3.0)), Rgb::BLACK);
        assert_eq!(hsv_to_rgb(Hsv::new(0.0, 0.0, 9.0)), Rgb::WHITE);
    }

    #[test]
    fn wrap_hue_edges() {
        assert_eq!(wrap_hue(400.0), 40.0);
        assert_eq!(wrap_hue(-10.0), 350.0);
        assert_eq!(wrap_hue(360.0), 0.0);
        assert_eq!(wrap_hue(-1e-20), 0.0);
        assert_eq!(wrap_hue(f64::INFINITY), 0.0);
    }

    #[test]
    fn hsl_hsv_direct_conversion_agrees_with_rgb() {
        let hsl = Hsl::new(200.0, 0.6, 0.3);
        let via_hsv = hsv_to_rgb(hsl_to_hsv(hsl));
        assert!(within_one(via_hsv, hsl_to_rgb(hsl)));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_rgb() -> impl Strategy<Value = Rgb> {
            (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb::new(r, g, b))
        }

        proptest! {
            #[test]
            fn hsl_round_trip_within_one(rgb in any_rgb()) {
                let back = hsl_to_rgb(rgb_to_hsl(rgb));
                prop_assert!(within_one(rgb, back), "{:?} -> {:?}", rgb, back);
            }

            #[test]
            fn hsv_round_trip_within_one(rgb in any_rgb()) {
                let back = hsv_to_rgb(rgb_to_hsv(rgb));
                prop_assert!(within_one(rgb, back), "{:?} -> {:?}", rgb, back);
            }

            #[test]
            fn converted_channels_stay_in_range(rgb in any_rgb()) {
                let hsl = rgb_to_hsl(rgb);
                prop_assert!((0.0..360.0).contains(&hsl.h));
                prop_assert!((0.0..=1.0).contains(&hsl.s));
                prop_assert!((0.0..=1.0).contains(&hsl.l));
                let hsv = rgb_to_hsv(rgb);
                prop_assert!((0.0..360.0).contains(&hsv.h));
                prop_assert!((0.0..=1.0).contains(&hsv.s));
                prop_assert!((0.0..=1.0).contains(&hsv.v));
            }
        }
    }
}
