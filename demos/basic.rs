//! Standalone demo: opens a window with the ring picker.
//!
//! Run with `RUST_LOG=debug` to see settled change events.

use floem::prelude::*;
use floem::window::WindowConfig;
use floem_ring::{ring_picker, PickerConfig, Rgb};

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(json) => PickerConfig::from_json_str(&json).unwrap_or_else(|err| {
            log::warn!("ignoring config argument: {err}");
            PickerConfig::default()
        }),
        None => PickerConfig::default(),
    };
    let color = RwSignal::new(Rgb::new(59, 130, 246));
    let side = config.diameter + 32.0;

    floem::Application::new()
        .window(
            move |_| {
                let picker = ring_picker(color, config.clone())
                    .on_color_change(|e| println!("{e:?}"))
                    .style(|s| s.margin(16.0));
                let hex = label(move || color.get().to_string()).style(|s| s.margin(16.0));
                v_stack((picker, hex))
                    .on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                        floem::quit_app()
                    })
            },
            Some(
                WindowConfig::default()
                    .size((side, side + 48.0))
                    .title("floem-ring"),
            ),
        )
        .run();
}
