//! Floem view for the ring picker.
//!
//! Paints a [`RenderRequest`] with kurbo shapes and turns Floem pointer,
//! key and focus events into [`RingPicker`] input. Settled change events are
//! delivered from a timer tick scheduled with [`exec_after`].

use floem::action::exec_after;
use floem::keyboard::Key;
use floem::kurbo::{BezPath, Circle, Point, Rect, Stroke};
use floem::peniko::Color;

use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;
use web_time::Instant;

use crate::clipboard;
use crate::color::Rgb;
use crate::config::PickerConfig;
use crate::interaction::{DragTarget, KeyInput, PointerInput, Transition};
use crate::notifier::ColorEvent;
use crate::picker::RingPicker;
use crate::render::{ArcSegment, RenderRequest};

/// Line segments per radian when approximating arcs.
const ARC_STEPS_PER_RADIAN: f64 = 40.0;

const OUTLINE: Color = Color::rgba8(0, 0, 0, 90);

fn to_color(rgb: Rgb) -> Color {
    Color::rgb8(rgb.r, rgb.g, rgb.b)
}

/// Build a closed annular sector from line segments (no cubic curves).
fn sector_path(center: Point, inner: f64, outer: f64, start: f64, end: f64) -> BezPath {
    let steps = (((end - start) * ARC_STEPS_PER_RADIAN).ceil() as usize).max(1);
    let at = |radius: f64, angle: f64| {
        Point::new(
            center.x + angle.cos() * radius,
            center.y + angle.sin() * radius,
        )
    };
    let mut path = BezPath::new();
    path.move_to(at(outer, start));
    for i in 1..=steps {
        let angle = start + (end - start) * i as f64 / steps as f64;
        path.line_to(at(outer, angle));
    }
    for i in (0..=steps).rev() {
        let angle = start + (end - start) * i as f64 / steps as f64;
        path.line_to(at(inner, angle));
    }
    path.close_path();
    path
}

fn triangle_path([a, b, c]: [Point; 3]) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(a);
    path.line_to(b);
    path.line_to(c);
    path.close_path();
    path
}

/// Logical key name used by the keyboard config, e.g. `ArrowUp` or `h`.
fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Named(named) => Some(format!("{named:?}")),
        Key::Character(c) => Some(c.to_string()),
        _ => None,
    }
}

enum RingUpdate {
    Color(Rgb),
    Tick,
}

pub struct RingPickerView {
    id: ViewId,
    picker: RingPicker,
    hovering: RwSignal<bool>,
    tick_scheduled: bool,
    size: floem::taffy::prelude::Size<f32>,
}

/// Creates a hue ring picker bound to `color`.
///
/// Writes to `color` from outside move the knobs without emitting change
/// events; user edits update `color` once they settle.
pub fn ring_picker(color: RwSignal<Rgb>, config: PickerConfig) -> RingPickerView {
    let id = ViewId::new();
    let hovering = RwSignal::new(false);

    let mut picker = RingPicker::new(PickerConfig {
        rgb: Some(color.get_untracked()),
        ..config
    });
    picker.on_change(move |e: &ColorEvent| {
        let rgb = Rgb::new(e.r, e.g, e.b);
        if color.get_untracked() != rgb {
            color.set(rgb);
        }
    });

    create_effect(move |_| {
        let rgb = color.get();
        id.update_state(RingUpdate::Color(rgb));
    });

    let diameter = picker.diameter();
    let focusable = picker.config().keyboard.focusable;
    let view = RingPickerView {
        id,
        picker,
        hovering,
        tick_scheduled: false,
        size: Default::default(),
    }
    .style(move |s| {
        let cursor = if hovering.get() {
            floem::style::CursorStyle::Pointer
        } else {
            floem::style::CursorStyle::Default
        };
        s.size(diameter, diameter).cursor(cursor)
    });
    if focusable {
        view.keyboard_navigable()
    } else {
        view
    }
}

impl RingPickerView {
    /// Register a listener for settled change events.
    pub fn on_color_change(mut self, listener: impl FnMut(&ColorEvent) + 'static) -> Self {
        self.picker.on_change(listener);
        self
    }

    /// The picker behind this view.
    pub fn picker(&self) -> &RingPicker {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut RingPicker {
        &mut self.picker
    }

    /// Adjust the picker while building the view, e.g.
    /// `.configure(|p| { p.set_color_space(ColorSpace::Hsv).toggle_color_spot(); })`.
    pub fn configure(mut self, f: impl FnOnce(&mut RingPicker)) -> Self {
        f(&mut self.picker);
        self.id.request_layout();
        self
    }

    fn pointer_input(pos: Point, lock: bool) -> PointerInput {
        PointerInput {
            pos,
            lock,
            is_touch: false,
        }
    }

    fn apply(&mut self, transition: Transition) {
        if transition.color_changed {
            self.schedule_tick();
        }
        if transition.redraw {
            self.hovering.set(self.picker.hover().is_some());
            self.id.request_paint();
        }
    }

    /// Arm a timer for the pending change event. A tick that fires before a
    /// rescheduled deadline re-arms itself.
    fn schedule_tick(&mut self) {
        if self.tick_scheduled {
            return;
        }
        let Some(delay) = self.picker.pending_remaining(Instant::now()) else {
            return;
        };
        let id = self.id;
        self.tick_scheduled = true;
        exec_after(delay, move |_| id.update_state(RingUpdate::Tick));
    }
}

impl View for RingPickerView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<RingUpdate>() {
            match *update {
                RingUpdate::Color(rgb) => {
                    if self.picker.rgb() != rgb {
                        self.picker.adopt_rgb(rgb);
                        self.id.request_paint();
                    }
                }
                RingUpdate::Tick => {
                    self.tick_scheduled = false;
                    self.picker.poll_events(Instant::now());
                    self.schedule_tick();
                }
            }
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        let now = Instant::now();
        match event {
            Event::PointerDown(e) => {
                cx.update_active(self.id());
                let t = self
                    .picker
                    .pointer_down(Self::pointer_input(e.pos, e.modifiers.alt()), now);
                let handled = t.color_changed || self.picker.drag() != DragTarget::None;
                self.apply(t);
                if handled {
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerMove(e) => {
                let t = self
                    .picker
                    .pointer_move(Self::pointer_input(e.pos, e.modifiers.alt()), now);
                self.apply(t);
                if self.picker.drag() != DragTarget::None {
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(e) => {
                let t = self.picker.pointer_up(Self::pointer_input(e.pos, e.modifiers.alt()));
                self.apply(t);
                EventPropagation::Continue
            }
            Event::KeyDown(ke) => {
                let copy = ke.modifiers.control() || ke.modifiers.meta();
                if copy && matches!(&ke.key.logical_key, Key::Character(c) if c.as_str() == "c") {
                    clipboard::copy_color(self.picker.rgb());
                    return EventPropagation::Stop;
                }
                let Some(name) = key_name(&ke.key.logical_key) else {
                    return EventPropagation::Continue;
                };
                let key = KeyInput {
                    key: &name,
                    shift: ke.modifiers.shift(),
                };
                let t = self.picker.key_down(key, now);
                self.apply(t);
                if t.color_changed {
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::FocusGained => {
                let t = self.picker.set_focused(true);
                self.apply(t);
                EventPropagation::Continue
            }
            Event::FocusLost => {
                let t = self.picker.set_focused(false);
                self.apply(t);
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        let side = (self.size.width as f64).min(self.size.height as f64);
        if side >= 1.0 && (side - self.picker.diameter()).abs() > 0.5 {
            self.picker.set_diameter(side);
        }
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        if self.size.width == 0.0 || self.size.height == 0.0 {
            return;
        }
        let frame = self.picker.render_request();
        paint_frame(cx, &frame);
    }
}

fn paint_ring(cx: &mut PaintCx, center: Point, inner: f64, outer: f64, segments: &[ArcSegment]) {
    for seg in segments {
        let path = sector_path(center, inner, outer, seg.start_angle, seg.end_angle);
        cx.fill(&path, to_color(seg.color), 0.0);
    }
}

fn paint_frame(cx: &mut PaintCx, frame: &RenderRequest) {
    let center = frame.center;

    if let Some(shadow) = frame.shadow {
        let alpha = (shadow.alpha * 255.0 + 0.5) as u8;
        let c = shadow.color;
        cx.stroke(
            &Circle::new(center, shadow.radius - shadow.size / 2.0),
            Color::rgba8(c.r, c.g, c.b, alpha),
            &Stroke::new(shadow.size),
        );
    }

    let hue = frame.hue_ring;
    paint_ring(cx, center, hue.inner(), hue.outer(), &frame.hue_segments);
    if let Some(luma) = frame.luma_ring {
        paint_ring(cx, center, luma.inner(), luma.outer(), &frame.luma_segments);
    }

    if let Some(spot) = frame.color_spot {
        let circle = Circle::new(center, spot.radius);
        cx.fill(&circle, to_color(spot.fill), 0.0);
        if spot.border_width > 0.0 {
            cx.stroke(&circle, to_color(spot.border_color), &Stroke::new(spot.border_width));
        }
    }

    let knob = triangle_path(frame.hue_knob.points);
    cx.fill(&knob, to_color(frame.hue_knob.fill), 0.0);
    cx.stroke(&knob, OUTLINE, &Stroke::new(1.0));

    if let Some(luma_knob) = frame.luma_knob {
        let circle = Circle::new(luma_knob.center, luma_knob.radius);
        cx.fill(&circle, to_color(luma_knob.fill), 0.0);
        cx.stroke(&circle, OUTLINE, &Stroke::new(1.0));
    }
}
