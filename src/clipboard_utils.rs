use arboard::Clipboard;

use crate::error::{Error, Result};

/// Plain-text access to a clipboard plus a token that changes whenever
/// its contents do
pub trait ClipboardSource {
    /// Current invalidation token, or None if the clipboard is unavailable
    fn change_token(&mut self) -> Option<u64>;

    /// Current plain-text payload, or None if there is no text on it
    fn read_text(&mut self) -> Option<String>;

    /// Replace the clipboard contents with `text`
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard, through arboard
///
/// The arboard handle is opened lazily and kept alive: on some platforms the
/// process has to stay the clipboard owner for written text to remain
/// available.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut Clipboard> {
        if self.clipboard.is_none() {
            let clipboard = Clipboard::new()
                .map_err(|e| Error::Clipboard(format!("Failed to access clipboard: {}", e)))?;
            self.clipboard = Some(clipboard);
        }
        self.clipboard
            .as_mut()
            .ok_or_else(|| Error::Clipboard("Clipboard handle missing".to_string()))
    }
}

impl ClipboardSource for SystemClipboard {
    #[cfg(target_os = "macos")]
    fn change_token(&mut self) -> Option<u64> {
        pasteboard::change_count()
    }

    #[cfg(not(target_os = "macos"))]
    fn change_token(&mut self) -> Option<u64> {
        // No change counter outside macOS: hash the text instead.
        // A clipboard without text hashes like an empty one.
        let text = self.read_text().unwrap_or_default();
        Some(text_token(&text))
    }

    fn read_text(&mut self) -> Option<String> {
        let clipboard = match self.handle() {
            Ok(clipboard) => clipboard,
            Err(e) => {
                tracing::debug!("{}", e);
                return None;
            }
        };
        match clipboard.get_text() {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::debug!("Failed to read from clipboard: {}", e);
                None
            }
        }
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.handle()?
            .set_text(text)
            .map_err(|e| Error::Clipboard(format!("Failed to write to clipboard: {}", e)))
    }
}

/// Invalidation token derived from the clipboard text itself
#[cfg_attr(target_os = "macos", allow(dead_code))]
pub fn text_token(text: &str) -> u64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

#[cfg(target_os = "macos")]
mod pasteboard {
    use objc::runtime::{Class, Object};
    use objc::{msg_send, sel, sel_impl};

    /// `[[NSPasteboard generalPasteboard] changeCount]`
    pub fn change_count() -> Option<u64> {
        unsafe {
            let class = Class::get("NSPasteboard")?;
            let general: *mut Object = msg_send![class, generalPasteboard];
            if general.is_null() {
                return None;
            }
            let count: isize = msg_send![general, changeCount];
            Some(count as u64)
        }
    }
}
