use std::time::Duration;

use crate::clipboard_utils::ClipboardSource;

/// Default clipboard polling period
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Turns clipboard changes into candidate note contents.
///
/// The poller only reads the clipboard text when the change token moved
/// since the previous tick. It never inserts anything itself.
#[derive(Debug, Default)]
pub struct ClipboardPoller {
    last_token: Option<u64>,
}

impl ClipboardPoller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the clipboard's current token, so whatever is already on
    /// the clipboard is not picked up by the first tick
    pub fn primed(source: &mut impl ClipboardSource) -> Self {
        Self {
            last_token: source.change_token(),
        }
    }

    /// Check the clipboard once.
    ///
    /// Returns the trimmed clipboard text if the clipboard changed and holds
    /// non-blank text; None otherwise.
    pub fn poll(&mut self, source: &mut impl ClipboardSource) -> Option<String> {
        let token = source.change_token()?;
        if self.last_token == Some(token) {
            return None;
        }
        self.last_token = Some(token);

        let Some(text) = source.read_text() else {
            tracing::debug!("clipboard changed but holds no text");
            return None;
        };
        let cleaned = text.trim();
        if cleaned.is_empty() {
            tracing::debug!("clipboard changed to blank text, skipping");
            return None;
        }
        Some(cleaned.to_string())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::{Error, Result};

    /// In-memory clipboard with an explicit change counter
    #[derive(Debug, Default)]
    pub(crate) struct FakeClipboard {
        pub change_count: u64,
        pub text: Option<String>,
        pub available: bool,
        pub reads: usize,
        pub fail_writes: bool,
    }

    impl FakeClipboard {
        pub fn new() -> Self {
            Self {
                available: true,
                ..Default::default()
            }
        }

        /// What another application copying `text` looks like
        pub fn copy(&mut self, text: &str) {
            self.change_count += 1;
            self.text = Some(text.to_string());
        }

        /// A copy of non-text data (an image, say)
        pub fn copy_non_text(&mut self) {
            self.change_count += 1;
            self.text = None;
        }
    }

    impl ClipboardSource for FakeClipboard {
        fn change_token(&mut self) -> Option<u64> {
            self.available.then_some(self.change_count)
        }

        fn read_text(&mut self) -> Option<String> {
            self.reads += 1;
            self.text.clone()
        }

        fn write_text(&mut self, text: &str) -> Result<()> {
            if self.fail_writes {
                return Err(Error::Clipboard("write refused".to_string()));
            }
            self.copy(text);
            Ok(())
        }
    }

    #[test]
    fn test_picks_up_change() {
        let mut clipboard = FakeClipboard::new();
        let mut poller = ClipboardPoller::primed(&mut clipboard);

        clipboard.copy("hello");
        assert_eq!(poller.poll(&mut clipboard).as_deref(), Some("hello"));
    }

    #[test]
    fn test_unchanged_token_skips_read() {
        let mut clipboard = FakeClipboard::new();
        let mut poller = ClipboardPoller::primed(&mut clipboard);

        clipboard.copy("hello");
        poller.poll(&mut clipboard);
        let reads = clipboard.reads;

        assert_eq!(poller.poll(&mut clipboard), None);
        assert_eq!(poller.poll(&mut clipboard), None);
        assert_eq!(clipboard.reads, reads);
    }

    #[test]
    fn test_primed_ignores_existing_content() {
        let mut clipboard = FakeClipboard::new();
        clipboard.copy("already there");
        let mut poller = ClipboardPoller::primed(&mut clipboard);
        assert_eq!(poller.poll(&mut clipboard), None);
    }

    #[test]
    fn test_unprimed_reads_existing_content() {
        let mut clipboard = FakeClipboard::new();
        clipboard.copy("already there");
        let mut poller = ClipboardPoller::new();
        assert_eq!(poller.poll(&mut clipboard).as_deref(), Some("already there"));
    }

    #[test]
    fn test_trims_whitespace_and_newlines() {
        let mut clipboard = FakeClipboard::new();
        let mut poller = ClipboardPoller::primed(&mut clipboard);

        clipboard.copy("  hello\n");
        assert_eq!(poller.poll(&mut clipboard).as_deref(), Some("hello"));

        clipboard.copy("\n\t line one\nline two \r\n");
        assert_eq!(
            poller.poll(&mut clipboard).as_deref(),
            Some("line one\nline two")
        );
    }

    #[test]
    fn test_blank_text_is_skipped() {
        let mut clipboard = FakeClipboard::new();
        let mut poller = ClipboardPoller::primed(&mut clipboard);

        clipboard.copy(" \n\t ");
        assert_eq!(poller.poll(&mut clipboard), None);
    }

    #[test]
    fn test_non_text_is_skipped_and_token_consumed() {
        let mut clipboard = FakeClipboard::new();
        let mut poller = ClipboardPoller::primed(&mut clipboard);

        clipboard.copy_non_text();
        assert_eq!(poller.poll(&mut clipboard), None);
        let reads = clipboard.reads;
        assert_eq!(poller.poll(&mut clipboard), None);
        assert_eq!(clipboard.reads, reads);
    }

    #[test]
    fn test_unavailable_clipboard_is_silent() {
        let mut clipboard = FakeClipboard::new();
        let mut poller = ClipboardPoller::primed(&mut clipboard);

        clipboard.available = false;
        clipboard.copy("hidden");
        assert_eq!(poller.poll(&mut clipboard), None);
        assert_eq!(clipboard.reads, 0);

        clipboard.available = true;
        assert_eq!(poller.poll(&mut clipboard).as_deref(), Some("hidden"));
    }
}
