//! The ring picker itself, independent of any drawing surface.
//!
//! [`RingPicker`] ties configuration, layout, interaction state and the
//! change notifier together. Input handlers forward to [`Interaction`] and
//! schedule a [`ColorEvent`] whenever the color changed; getters return the
//! current value and setters return `&mut Self` so calls can be chained.
//! Setters never emit change events.

use std::time::Duration;

use web_time::Instant;

use crate::color::{ColorSpace, ColorState, Hsl, Hsv, Rgb};
use crate::config::PickerConfig;
use crate::geometry::{HitTarget, RingLayout};
use crate::interaction::{Controls, DragTarget, Interaction, KeyInput, PointerInput, Transition};
use crate::notifier::{ChangeNotifier, ColorEvent};
use crate::render::RenderRequest;

#[derive(Debug)]
pub struct RingPicker {
    /// Options as set by the caller.
    requested: PickerConfig,
    /// `requested` clamped into usable ranges; everything reads this.
    config: PickerConfig,
    layout: RingLayout,
    interaction: Interaction,
    notifier: ChangeNotifier,
}

impl Default for RingPicker {
    fn default() -> Self {
        Self::new(PickerConfig::default())
    }
}

impl RingPicker {
    pub fn new(requested: PickerConfig) -> Self {
        let config = requested.clone().validated();
        let layout = RingLayout::new(&config.geometry());
        let interaction = Interaction::new(config.initial_state());
        let notifier = ChangeNotifier::new(config.debounce_window());
        Self {
            requested,
            config,
            layout,
            interaction,
            notifier,
        }
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn layout(&self) -> &RingLayout {
        &self.layout
    }

    pub fn color(&self) -> &ColorState {
        self.interaction.color()
    }

    pub fn drag(&self) -> DragTarget {
        self.interaction.drag()
    }

    pub fn focused(&self) -> bool {
        self.interaction.focused()
    }

    /// Knob under the pointer while idle.
    pub fn hover(&self) -> Option<HitTarget> {
        self.interaction.hover()
    }

    fn controls(&self) -> Controls {
        Controls {
            saturation: self.config.saturation_control,
            lightness: self.config.lightness_control,
            hue_lock: self.config.hue_lock,
            luma_ring_clickable: self.config.luma_ring_clickable,
        }
    }

    /// Re-derive the clamped config after a setter and rebuild the layout.
    /// The requested values are kept, so a clamp is undone once the value
    /// fits again.
    fn reconfigure(&mut self) {
        self.config = self.requested.clone().validated();
        self.layout = RingLayout::new(&self.config.geometry());
        self.notifier.set_window(self.config.debounce_window());
    }

    fn after(&mut self, transition: Transition, now: Instant) -> Transition {
        if transition.color_changed {
            let pos = self.interaction.pointer();
            let event = ColorEvent::new(
                self.interaction.color(),
                pos.x,
                pos.y,
                self.interaction.is_touch(),
            );
            self.notifier.schedule(event, now);
        }
        transition
    }

    // ── color ─────────────────────────────────────────────────────────

    pub fn hsl(&self) -> Hsl {
        self.color().to_hsl()
    }

    pub fn set_hsl(&mut self, hsl: Hsl) -> &mut Self {
        self.interaction.update_color(|c| c.set_hsl(hsl));
        self
    }

    pub fn hsv(&self) -> Hsv {
        self.color().to_hsv()
    }

    pub fn set_hsv(&mut self, hsv: Hsv) -> &mut Self {
        self.interaction.update_color(|c| c.set_hsv(hsv));
        self
    }

    pub fn rgb(&self) -> Rgb {
        self.color().to_rgb()
    }

    pub fn set_rgb(&mut self, rgb: Rgb) -> &mut Self {
        self.interaction.update_color(|c| c.set_rgb(rgb));
        self
    }

    /// Like [`RingPicker::set_rgb`], but also makes `rgb`'s hue the one the
    /// hue lock holds. Used when a bound value is written from outside.
    pub fn adopt_rgb(&mut self, rgb: Rgb) -> &mut Self {
        self.interaction.adopt_color(|c| c.set_rgb(rgb));
        self
    }

    /// Current color as uppercase `RRGGBB`.
    pub fn hex(&self) -> String {
        self.rgb().to_hex()
    }

    /// Set the color from a hex string. Invalid strings leave it unchanged.
    pub fn set_hex(&mut self, hex: &str) -> &mut Self {
        match Rgb::from_hex(hex) {
            Some(rgb) => self.set_rgb(rgb),
            None => {
                log::debug!("ignoring invalid hex color {hex:?}");
                self
            }
        }
    }

    pub fn color_space(&self) -> ColorSpace {
        self.config.color_space
    }

    /// Switch between HSL and HSV, converting the stored channels.
    pub fn set_color_space(&mut self, space: ColorSpace) -> &mut Self {
        self.interaction.update_color(|c| c.convert_to(space));
        self.requested.color_space = space;
        self.reconfigure();
        self
    }

    // ── appearance and behavior ───────────────────────────────────────

    pub fn show_color_spot(&self) -> bool {
        self.config.show_color_spot
    }

    pub fn set_show_color_spot(&mut self, show: bool) -> &mut Self {
        self.requested.show_color_spot = show;
        self.reconfigure();
        self
    }

    pub fn toggle_color_spot(&mut self) -> &mut Self {
        self.set_show_color_spot(!self.config.show_color_spot)
    }

    pub fn lightness_control(&self) -> bool {
        self.config.lightness_control
    }

    /// Show or hide the luma ring. Hiding it ends a luma drag.
    pub fn set_lightness_control(&mut self, enabled: bool) -> &mut Self {
        self.requested.lightness_control = enabled;
        if !enabled && self.interaction.drag() == DragTarget::LumaKnob {
            self.interaction.cancel_drag();
        }
        self.reconfigure();
        self
    }

    pub fn toggle_lightness_control(&mut self) -> &mut Self {
        self.set_lightness_control(!self.config.lightness_control)
    }

    pub fn saturation_control(&self) -> bool {
        self.config.saturation_control
    }

    pub fn set_saturation_control(&mut self, enabled: bool) -> &mut Self {
        self.requested.saturation_control = enabled;
        self.reconfigure();
        self
    }

    pub fn toggle_saturation_control(&mut self) -> &mut Self {
        self.set_saturation_control(!self.config.saturation_control)
    }

    pub fn diameter(&self) -> f64 {
        self.config.diameter
    }

    pub fn set_diameter(&mut self, diameter: f64) -> &mut Self {
        self.requested.diameter = diameter;
        self.reconfigure();
        self
    }

    pub fn hue_thickness(&self) -> f64 {
        self.config.hue_thickness
    }

    pub fn set_hue_thickness(&mut self, thickness: f64) -> &mut Self {
        self.requested.hue_thickness = thickness;
        self.reconfigure();
        self
    }

    pub fn luma_thickness(&self) -> f64 {
        self.config.luma_thickness
    }

    pub fn set_luma_thickness(&mut self, thickness: f64) -> &mut Self {
        self.requested.luma_thickness = thickness;
        self.reconfigure();
        self
    }

    pub fn color_spot_radius_factor(&self) -> f64 {
        self.config.color_spot_radius_factor
    }

    pub fn set_color_spot_radius_factor(&mut self, factor: f64) -> &mut Self {
        self.requested.color_spot_radius_factor = factor;
        self.reconfigure();
        self
    }

    pub fn luma_ring_clickable(&self) -> bool {
        self.config.luma_ring_clickable
    }

    pub fn set_luma_ring_clickable(&mut self, clickable: bool) -> &mut Self {
        self.requested.luma_ring_clickable = clickable;
        self.reconfigure();
        self
    }

    pub fn hue_lock(&self) -> bool {
        self.config.hue_lock
    }

    pub fn set_hue_lock(&mut self, enabled: bool) -> &mut Self {
        self.requested.hue_lock = enabled;
        self.reconfigure();
        self
    }

    // ── input ─────────────────────────────────────────────────────────

    pub fn pointer_down(&mut self, input: PointerInput, now: Instant) -> Transition {
        let controls = self.controls();
        let t = self.interaction.pointer_down(&self.layout, controls, input);
        self.after(t, now)
    }

    pub fn pointer_move(&mut self, input: PointerInput, now: Instant) -> Transition {
        let controls = self.controls();
        let t = self.interaction.pointer_move(&self.layout, controls, input);
        self.after(t, now)
    }

    pub fn pointer_up(&mut self, input: PointerInput) -> Transition {
        self.interaction.pointer_up(input)
    }

    pub fn key_down(&mut self, key: KeyInput<'_>, now: Instant) -> Transition {
        let controls = self.controls();
        let t = self.interaction.key_down(&self.config.keyboard, controls, key);
        self.after(t, now)
    }

    pub fn set_focused(&mut self, focused: bool) -> Transition {
        let focusable = self.config.keyboard.focusable;
        self.interaction.set_focused(focused && focusable)
    }

    // ── output ────────────────────────────────────────────────────────

    pub fn render_request(&self) -> RenderRequest {
        RenderRequest::build(&self.layout, &self.interaction, &self.config)
    }

    /// Register a listener for settled change events.
    pub fn on_change(&mut self, listener: impl FnMut(&ColorEvent) + 'static) -> &mut Self {
        self.notifier.subscribe(listener);
        self
    }

    /// Deliver the pending change event if its quiescence period is over.
    pub fn poll_events(&mut self, now: Instant) -> Option<ColorEvent> {
        self.notifier.poll(now)
    }

    pub fn flush_events(&mut self) -> Option<ColorEvent> {
        self.notifier.flush()
    }

    /// Time until the pending event is due, `None` when nothing is pending.
    pub fn pending_remaining(&self, now: Instant) -> Option<Duration> {
        self.notifier.debouncer().remaining(now)
    }
}
