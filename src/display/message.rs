//! Bounded display text.

use core::fmt;

use heapless::String;

/// Longest message the renderer accepts, in characters.
pub const MAX_MESSAGE_CHARS: usize = 16;

/// Up to [`MAX_MESSAGE_CHARS`] characters of display text. Longer input is
/// cut to its first 16 characters, never rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayMessage {
    // 4 bytes per char covers any UTF-8 input.
    text: String<{ MAX_MESSAGE_CHARS * 4 }>,
}

impl DisplayMessage {
    pub fn new(text: &str) -> Self {
        let end = text
            .char_indices()
            .nth(MAX_MESSAGE_CHARS)
            .map_or(text.len(), |(i, _)| i);
        let mut out = String::new();
        // Cannot fail: 16 chars are at most 64 bytes.
        let _ = out.push_str(&text[..end]);
        Self { text: out }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters (glyph cells), not bytes.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl From<&str> for DisplayMessage {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for DisplayMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
