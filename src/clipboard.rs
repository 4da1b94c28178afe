use crate::color::Rgb;

/// Put `text` on the system clipboard. Returns whether it was stored.
pub(crate) fn copy_to_clipboard(text: &str) -> bool {
    let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
    match result {
        Ok(()) => true,
        Err(err) => {
            log::warn!("clipboard unavailable: {err}");
            false
        }
    }
}

/// Copy `rgb` as `#RRGGBB`.
pub(crate) fn copy_color(rgb: Rgb) -> bool {
    let text = rgb.to_string();
    log::debug!("copying {text} to clipboard");
    copy_to_clipboard(&text)
}
