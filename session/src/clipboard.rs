//! FILENAME: session/src/clipboard.rs
//! Clipboard dispatch with a fallback path.
//!
//! The platform clipboard is an injected capability. A failed write
//! falls back once to a secondary writer (the original implementation
//! used a hidden textarea); if that also fails the copy degrades to a
//! no-op and the user simply sees no confirmation.

use serde::Serialize;

/// A "set clipboard text" capability.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), String>;
}

/// In-memory clipboard for tests and headless use.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        MemoryClipboard::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), String> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Confirmation for a completed copy, for transient user feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CopyFeedback {
    /// Number of cells copied.
    pub cells: usize,

    pub with_headers: bool,
}

impl CopyFeedback {
    pub fn message(&self) -> String {
        if self.with_headers {
            format!("Copied {} cells with headers", self.cells)
        } else {
            format!("Copied {} cells", self.cells)
        }
    }
}

/// Writes through the primary clipboard, falling back once on failure.
/// Returns whether any writer accepted the text.
pub fn write_with_fallback(
    primary: &mut dyn Clipboard,
    fallback: &mut dyn Clipboard,
    text: &str,
) -> bool {
    match primary.write_text(text) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("Failed to copy to clipboard: {}", err);
            match fallback.write_text(text) {
                Ok(()) => true,
                Err(err) => {
                    log::warn!("Failed to copy to clipboard: {}", err);
                    false
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn write_text(&mut self, _text: &str) -> Result<(), String> {
            Err("unavailable".to_string())
        }
    }

    #[test]
    fn primary_success_skips_fallback() {
        let mut primary = MemoryClipboard::new();
        let mut fallback = MemoryClipboard::new();

        assert!(write_with_fallback(&mut primary, &mut fallback, "text"));
        assert_eq!(primary.contents(), Some("text"));
        assert_eq!(fallback.contents(), None);
    }

    #[test]
    fn primary_failure_uses_fallback() {
        let mut primary = BrokenClipboard;
        let mut fallback = MemoryClipboard::new();

        assert!(write_with_fallback(&mut primary, &mut fallback, "text"));
        assert_eq!(fallback.contents(), Some("text"));
    }

    #[test]
    fn double_failure_degrades_to_noop() {
        let mut primary = BrokenClipboard;
        let mut fallback = BrokenClipboard;

        assert!(!write_with_fallback(&mut primary, &mut fallback, "text"));
    }

    #[test]
    fn feedback_messages() {
        let plain = CopyFeedback { cells: 6, with_headers: false };
        assert_eq!(plain.message(), "Copied 6 cells");

        let with_headers = CopyFeedback { cells: 4, with_headers: true };
        assert_eq!(with_headers.message(), "Copied 4 cells with headers");
    }
}
