//! Pointer and keyboard state machine.
//!
//! [`Interaction`] owns the color and the drag state. Its handlers take the
//! current [`RingLayout`] and option switches as arguments, mutate the owned
//! state, and report what happened as a [`Transition`]. Nothing here draws
//! or emits; the caller decides what to do with the transition.

use floem::kurbo::Point;

use crate::color::ColorState;
use crate::config::KeyboardConfig;
use crate::geometry::{self, HitTarget, RingLayout};

/// Which knob is being dragged. `None` is the idle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragTarget {
    #[default]
    None,
    HueKnob,
    LumaKnob,
}

/// A normalized pointer event in widget-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub pos: Point,
    /// The lock modifier is held.
    pub lock: bool,
    pub is_touch: bool,
}

impl PointerInput {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            pos: Point::new(x, y),
            lock: false,
            is_touch: false,
        }
    }

    pub fn locked(mut self) -> Self {
        self.lock = true;
        self
    }
}

/// A key press, identified by its logical key name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput<'a> {
    pub key: &'a str,
    pub shift: bool,
}

/// Option switches the state machine consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub saturation: bool,
    pub lightness: bool,
    pub hue_lock: bool,
    pub luma_ring_clickable: bool,
}

/// Outcome of one handler call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    /// The color changed; a change event should be scheduled.
    pub color_changed: bool,
    pub redraw: bool,
}

impl Transition {
    pub const NONE: Transition = Transition {
        color_changed: false,
        redraw: false,
    };

    pub const REDRAW: Transition = Transition {
        color_changed: false,
        redraw: true,
    };

    fn from_change(changed: bool) -> Self {
        Transition {
            color_changed: changed,
            redraw: changed,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    color: ColorState,
    drag: DragTarget,
    hover: Option<HitTarget>,
    /// Hue most recently taken from a pointer angle while unlocked.
    last_unlocked_hue: f64,
    focused: bool,
    pointer: Point,
    is_touch: bool,
}

impl Interaction {
    pub fn new(color: ColorState) -> Self {
        Self {
            last_unlocked_hue: color.hue(),
            color,
            drag: DragTarget::None,
            hover: None,
            focused: false,
            pointer: Point::ZERO,
            is_touch: false,
        }
    }

    pub fn color(&self) -> &ColorState {
        &self.color
    }

    /// Mutate the color outside of pointer/key handling, e.g. from a setter.
    /// Does not touch the last unlocked hue.
    pub fn update_color(&mut self, f: impl FnOnce(&mut ColorState)) -> bool {
        let before = self.color;
        f(&mut self.color);
        self.color.validate();
        before != self.color
    }

    /// Take a new starting color from outside, e.g. a bound signal. Unlike
    /// [`Interaction::update_color`] the lock then freezes at its hue.
    pub fn adopt_color(&mut self, f: impl FnOnce(&mut ColorState)) -> bool {
        let changed = self.update_color(f);
        self.last_unlocked_hue = self.color.hue();
        changed
    }

    pub fn drag(&self) -> DragTarget {
        self.drag
    }

    pub fn hover(&self) -> Option<HitTarget> {
        self.hover
    }

    pub fn focused(&self) -> bool {
        self.focused
    }

    /// Last pointer position seen by any pointer handler.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn is_touch(&self) -> bool {
        self.is_touch
    }

    fn record(&mut self, input: &PointerInput) {
        self.pointer = input.pos;
        self.is_touch = input.is_touch;
    }

    fn set_hue_from_angle(&mut self, angle: f64) {
        let hue = geometry::angle_to_hue(angle);
        self.last_unlocked_hue = hue;
        self.color.set_hue(hue);
    }

    pub fn pointer_down(
        &mut self,
        layout: &RingLayout,
        controls: Controls,
        input: PointerInput,
    ) -> Transition {
        self.record(&input);
        let before = self.color;
        let hit = layout.hit_test(input.pos, &self.color, controls.luma_ring_clickable);
        self.hover = hit.filter(|t| t.is_knob());
        let polar = layout.polar(input.pos);
        match hit {
            Some(HitTarget::HueKnob) => {
                log::debug!("drag start: hue knob");
                self.drag = DragTarget::HueKnob;
                return Transition::REDRAW;
            }
            Some(HitTarget::LumaKnob) => {
                log::debug!("drag start: luma knob");
                self.drag = DragTarget::LumaKnob;
                return Transition::REDRAW;
            }
            Some(HitTarget::HueRing) => self.set_hue_from_angle(polar.angle),
            Some(HitTarget::LumaRing) => {
                self.color.set_luma(geometry::angle_to_luma(polar.angle));
            }
            None => return Transition::NONE,
        }
        self.color.validate();
        Transition::from_change(before != self.color)
    }

    pub fn pointer_move(
        &mut self,
        layout: &RingLayout,
        controls: Controls,
        input: PointerInput,
    ) -> Transition {
        self.record(&input);
        let polar = layout.polar(input.pos);
        let before = self.color;
        match self.drag {
            DragTarget::None => {
                let hover = layout
                    .hit_test(input.pos, &self.color, controls.luma_ring_clickable)
                    .filter(|t| t.is_knob());
                if hover == self.hover {
                    return Transition::NONE;
                }
                self.hover = hover;
                return Transition::REDRAW;
            }
            DragTarget::HueKnob => {
                if input.lock && controls.hue_lock {
                    self.color.set_hue(self.last_unlocked_hue);
                } else {
                    self.set_hue_from_angle(polar.angle);
                }
                if controls.saturation {
                    self.color.set_saturation(layout.saturation_at(polar.distance));
                }
            }
            DragTarget::LumaKnob => {
                self.color.set_luma(geometry::angle_to_luma(polar.angle));
            }
        }
        self.color.validate();
        Transition::from_change(before != self.color)
    }

    /// Ends any drag. Always asks for a redraw so knob highlights clear.
    pub fn pointer_up(&mut self, input: PointerInput) -> Transition {
        self.record(&input);
        if self.drag != DragTarget::None {
            log::debug!("drag end: {:?}", self.drag);
        }
        self.drag = DragTarget::None;
        Transition::REDRAW
    }

    /// Drop a drag without a pointer-up, e.g. when its ring is hidden.
    pub fn cancel_drag(&mut self) -> Transition {
        if self.drag == DragTarget::None && self.hover.is_none() {
            return Transition::NONE;
        }
        self.drag = DragTarget::None;
        self.hover = None;
        Transition::REDRAW
    }

    pub fn set_focused(&mut self, focused: bool) -> Transition {
        if self.focused == focused {
            return Transition::NONE;
        }
        self.focused = focused;
        if !focused {
            self.drag = DragTarget::None;
            self.hover = None;
        }
        Transition::REDRAW
    }

    /// Step a channel by its configured increment. Unknown keys, disabled
    /// channels and an unfocused widget are no-ops.
    pub fn key_down(
        &mut self,
        keyboard: &KeyboardConfig,
        controls: Controls,
        key: KeyInput<'_>,
    ) -> Transition {
        if !keyboard.enabled || !self.focused {
            return Transition::NONE;
        }
        let factor = if key.shift { keyboard.shift_factor } else { 1.0 };
        let before = self.color;
        if let Some(dir) = keyboard.hue.direction(key.key) {
            let hue = self.color.hue() + dir * keyboard.hue.step * factor;
            self.color.set_hue(hue);
        } else if let Some(dir) = keyboard.saturation.direction(key.key) {
            if !controls.saturation {
                return Transition::NONE;
            }
            let s = self.color.saturation() + dir * keyboard.saturation.step * factor;
            self.color.set_saturation(s);
        } else if let Some(dir) = keyboard.lightness.direction(key.key) {
            if !controls.lightness {
                return Transition::NONE;
            }
            let l = self.color.luma() + dir * keyboard.lightness.step * factor;
            self.color.set_luma(l);
        } else {
            return Transition::NONE;
        }
        self.color.validate();
        Transition::from_change(before != self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorSpace;
    use crate::config::PickerConfig;

    const ALL: Controls = Controls {
        saturation: true,
        lightness: true,
        hue_lock: true,
        luma_ring_clickable: false,
    };

    fn setup(hue: f64) -> (RingLayout, Interaction) {
        let layout = RingLayout::new(&PickerConfig::default().geometry());
        let state = ColorState::new(hue, 1.0, 0.5, ColorSpace::Hsl);
        (layout, Interaction::new(state))
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn hue_knob_drag_updates_hue_not_lightness() {
        let (layout, mut ix) = setup(0.0);
        let t = ix.pointer_down(&layout, ALL, PointerInput::at(190.0, 100.0));
        assert_eq!(ix.drag(), DragTarget::HueKnob);
        assert!(!t.color_changed);

        let t = ix.pointer_move(&layout, ALL, PointerInput::at(100.0, 190.0));
        assert!(t.color_changed);
        assert!(approx(ix.color().hue(), 90.0));
        assert_eq!(ix.color().luma(), 0.5);
        assert_eq!(ix.color().saturation(), 1.0);
    }

    #[test]
    fn radial_drag_sets_saturation() {
        let (layout, mut ix) = setup(0.0);
        ix.pointer_down(&layout, ALL, PointerInput::at(190.0, 100.0));
        ix.pointer_move(&layout, ALL, PointerInput::at(143.0, 100.0));
        assert!(approx(ix.color().saturation(), 0.5));
        ix.pointer_move(&layout, ALL, PointerInput::at(102.0, 100.0));
        assert_eq!(ix.color().saturation(), 0.0);

        let controls = Controls {
            saturation: false,
            ..ALL
        };
        let (layout, mut ix) = setup(0.0);
        ix.pointer_down(&layout, controls, PointerInput::at(190.0, 100.0));
        ix.pointer_move(&layout, controls, PointerInput::at(143.0, 100.0));
        assert_eq!(ix.color().saturation(), 1.0);
    }

    #[test]
    fn ring_click_sets_hue_without_dragging() {
        let (layout, mut ix) = setup(30.0);
        let t = ix.pointer_down(&layout, ALL, PointerInput::at(190.0, 100.0));
        assert!(t.color_changed);
        assert_eq!(ix.drag(), DragTarget::None);
        assert_eq!(ix.color().hue(), 0.0);

        // A later move without a drag never changes the color.
        let t = ix.pointer_move(&layout, ALL, PointerInput::at(100.0, 190.0));
        assert!(!t.color_changed);
        assert_eq!(ix.color().hue(), 0.0);
    }

    #[test]
    fn luma_knob_drag_wraps_angle() {
        let (layout, mut ix) = setup(45.0);
        ix.pointer_down(&layout, ALL, PointerInput::at(29.0, 100.0));
        assert_eq!(ix.drag(), DragTarget::LumaKnob);
        ix.pointer_move(&layout, ALL, PointerInput::at(100.0, 29.0));
        assert!(approx(ix.color().luma(), 0.75));
        assert_eq!(ix.color().hue(), 45.0);

        let t = ix.pointer_up(PointerInput::at(100.0, 29.0));
        assert_eq!(ix.drag(), DragTarget::None);
        assert!(t.redraw && !t.color_changed);
    }

    #[test]
    fn luma_band_needs_clickable() {
        let (layout, mut ix) = setup(0.0);
        let t = ix.pointer_down(&layout, ALL, PointerInput::at(100.0, 171.0));
        assert_eq!(t, Transition::NONE);

        let clickable = Controls {
            luma_ring_clickable: true,
            ..ALL
        };
        let t = ix.pointer_down(&layout, clickable, PointerInput::at(100.0, 171.0));
        assert!(t.color_changed);
        assert!(approx(ix.color().luma(), 0.25));
        assert_eq!(ix.drag(), DragTarget::None);
    }

    #[test]
    fn miss_is_a_no_op() {
        let (layout, mut ix) = setup(0.0);
        let before = ix.clone();
        let t = ix.pointer_down(&layout, ALL, PointerInput::at(100.0, 100.0));
        assert_eq!(t, Transition::NONE);
        assert_eq!(ix.color(), before.color());
        assert_eq!(ix.drag(), DragTarget::None);
    }

    #[test]
    fn lock_freezes_hue_at_last_unlocked_value() {
        let (layout, mut ix) = setup(0.0);
        ix.pointer_down(&layout, ALL, PointerInput::at(190.0, 100.0));
        ix.pointer_move(&layout, ALL, PointerInput::at(100.0, 190.0));
        ix.pointer_move(&layout, ALL, PointerInput::at(10.0, 100.0).locked());
        assert!(approx(ix.color().hue(), 90.0));
        ix.pointer_up(PointerInput::at(10.0, 100.0));

        // A setter moves the hue, but the frozen value is still the last
        // pointer-driven one.
        ix.update_color(|c| c.set_hue(200.0));
        let knob = layout.hue_knob(200.0);
        let inside = Point::new(
            (knob[0].x + knob[1].x + knob[2].x) / 3.0,
            (knob[0].y + knob[1].y + knob[2].y) / 3.0,
        );
        ix.pointer_down(&layout, ALL, PointerInput::at(inside.x, inside.y));
        assert_eq!(ix.drag(), DragTarget::HueKnob);
        ix.pointer_move(&layout, ALL, PointerInput::at(100.0, 10.0).locked());
        assert!(approx(ix.color().hue(), 90.0));
    }

    #[test]
    fn lock_ignored_when_disabled() {
        let controls = Controls {
            hue_lock: false,
            ..ALL
        };
        let (layout, mut ix) = setup(0.0);
        ix.pointer_down(&layout, controls, PointerInput::at(190.0, 100.0));
        ix.pointer_move(&layout, controls, PointerInput::at(100.0, 190.0).locked());
        assert!(approx(ix.color().hue(), 90.0));
    }

    #[test]
    fn adopted_color_becomes_lock_hue() {
        let (layout, mut ix) = setup(0.0);
        assert!(ix.adopt_color(|c| c.set_hue(217.0)));
        let knob = layout.hue_knob(217.0);
        let inside = Point::new(
            (knob[0].x + knob[1].x + knob[2].x) / 3.0,
            (knob[0].y + knob[1].y + knob[2].y) / 3.0,
        );
        ix.pointer_down(&layout, ALL, PointerInput::at(inside.x, inside.y));
        assert_eq!(ix.drag(), DragTarget::HueKnob);
        ix.pointer_move(&layout, ALL, PointerInput::at(190.0, 100.0).locked());
        assert!(approx(ix.color().hue(), 217.0));
    }

    #[test]
    fn hover_tracks_knobs_only() {
        let (layout, mut ix) = setup(0.0);
        let t = ix.pointer_move(&layout, ALL, PointerInput::at(190.0, 100.0));
        assert_eq!(t, Transition::REDRAW);
        assert_eq!(ix.hover(), Some(HitTarget::HueKnob));
        let t = ix.pointer_move(&layout, ALL, PointerInput::at(191.0, 100.0));
        assert_eq!(t, Transition::NONE);
        let t = ix.pointer_move(&layout, ALL, PointerInput::at(100.0, 190.0));
        assert_eq!(t, Transition::REDRAW);
        assert_eq!(ix.hover(), None);
    }

    #[test]
    fn keys_need_focus() {
        let keyboard = KeyboardConfig::default();
        let (_, mut ix) = setup(0.0);
        let right = KeyInput {
            key: "ArrowRight",
            shift: false,
        };
        assert_eq!(ix.key_down(&keyboard, ALL, right), Transition::NONE);

        ix.set_focused(true);
        assert!(ix.key_down(&keyboard, ALL, right).color_changed);
        assert!(approx(ix.color().hue(), 1.0));

        let shifted = KeyInput { shift: true, ..right };
        ix.key_down(&keyboard, ALL, shifted);
        assert!(approx(ix.color().hue(), 11.0));

        let disabled = KeyboardConfig {
            enabled: false,
            ..KeyboardConfig::default()
        };
        assert_eq!(ix.key_down(&disabled, ALL, right), Transition::NONE);
    }

    #[test]
    fn key_steps_wrap_and_clamp() {
        let keyboard = KeyboardConfig::default();
        let (_, mut ix) = setup(0.0);
        ix.set_focused(true);
        let key = |key| KeyInput { key, shift: false };

        ix.key_down(&keyboard, ALL, key("ArrowLeft"));
        assert!(approx(ix.color().hue(), 359.0));

        // Saturation is already at 1.
        assert_eq!(ix.key_down(&keyboard, ALL, key("ArrowUp")), Transition::NONE);
        ix.key_down(&keyboard, ALL, key("ArrowDown"));
        assert!(approx(ix.color().saturation(), 0.99));

        ix.key_down(&keyboard, ALL, key("PageDown"));
        assert!(approx(ix.color().luma(), 0.49));

        assert_eq!(ix.key_down(&keyboard, ALL, key("q")), Transition::NONE);
    }

    #[test]
    fn disabled_channel_keys_are_no_ops() {
        let keyboard = KeyboardConfig::default();
        let controls = Controls {
            saturation: false,
            lightness: false,
            ..ALL
        };
        let (_, mut ix) = setup(0.0);
        ix.set_focused(true);
        let before = *ix.color();
        for key in ["ArrowDown", "PageUp", "PageDown"] {
            let t = ix.key_down(&keyboard, controls, KeyInput { key, shift: true });
            assert_eq!(t, Transition::NONE);
        }
        assert_eq!(*ix.color(), before);
    }

    #[test]
    fn losing_focus_ends_drag() {
        let (layout, mut ix) = setup(0.0);
        ix.set_focused(true);
        ix.pointer_down(&layout, ALL, PointerInput::at(190.0, 100.0));
        assert_eq!(ix.drag(), DragTarget::HueKnob);
        ix.set_focused(false);
        assert_eq!(ix.drag(), DragTarget::None);
    }
}
