//! Character/byte offset handling for GAP spans.
//!
//! GAP offsets count **characters**, not bytes. Rust strings index by byte, so
//! every span check goes through a conversion:
//!
//! ```text
//! Text:  "Zoë said she"
//!
//!   char:  Z  o  ë  _  s  a  i  d  _  s  h  e
//!          0  1  2  3  4  5  6  7  8  9  10 11
//!   byte:  0  1  2  4  5  6  7  8  9  10 11 12
//!                └ ë takes 2 bytes
//!
//! "she" is at char 9 but byte 10. Slicing text[9..12] gives " sh".
//! ```
//!
//! This module provides:
//! - [`TextSpan`]: a span carrying both byte and char offsets
//! - [`SpanConverter`]: precomputed char to byte table for one text
//! - [`chars_to_bytes`]: one-off conversion

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A text span with both byte and character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextSpan {
    /// Byte offset (start, inclusive)
    pub byte_start: usize,
    /// Byte offset (end, exclusive)
    pub byte_end: usize,
    /// Character offset (start, inclusive)
    pub char_start: usize,
    /// Character offset (end, exclusive)
    pub char_end: usize,
}

impl TextSpan {
    /// Create a span from character offsets.
    ///
    /// Returns `None` if either offset lies past the end of `text`.
    ///
    /// # Example
    /// ```
    /// use gap_score::offset::TextSpan;
    ///
    /// let text = "Price €50";
    /// let span = TextSpan::from_chars(text, 6, 9).unwrap();
    /// assert_eq!(span.byte_start, 6);
    /// assert_eq!(span.byte_end, 11); // € is 1 char but 3 bytes
    /// assert_eq!(span.extract(text), "€50");
    /// ```
    #[must_use]
    pub fn from_chars(text: &str, char_start: usize, char_end: usize) -> Option<Self> {
        let (byte_start, byte_end) = chars_to_bytes(text, char_start, char_end)?;
        Some(Self {
            byte_start,
            byte_end,
            char_start,
            char_end,
        })
    }

    /// Get byte range.
    #[must_use]
    pub const fn byte_range(&self) -> Range<usize> {
        self.byte_start..self.byte_end
    }

    /// Get character range.
    #[must_use]
    pub const fn char_range(&self) -> Range<usize> {
        self.char_start..self.char_end
    }

    /// Character length.
    #[must_use]
    pub const fn char_len(&self) -> usize {
        self.char_end.saturating_sub(self.char_start)
    }

    /// Check if this span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.byte_start >= self.byte_end
    }

    /// Extract the text for this span.
    #[must_use]
    pub fn extract<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.byte_start..self.byte_end).unwrap_or("")
    }
}

/// Convert character offsets to byte offsets.
///
/// `char_end` may equal the character count (end of text). Returns `None` when
/// either offset is out of range or `char_start > char_end`.
#[must_use]
pub fn chars_to_bytes(text: &str, char_start: usize, char_end: usize) -> Option<(usize, usize)> {
    if char_start > char_end {
        return None;
    }

    let mut byte_start = None;
    for (char_idx, (byte_idx, _ch)) in text.char_indices().enumerate() {
        if char_idx == char_start {
            byte_start = Some(byte_idx);
        }
        if char_idx == char_end {
            return byte_start.map(|start| (start, byte_idx));
        }
    }

    // char_end (and possibly char_start) sits exactly at the end of the text
    let char_count = text.chars().count();
    if char_end != char_count {
        return None;
    }
    let start = match byte_start {
        Some(start) => start,
        None if char_start == char_count => text.len(),
        None => return None,
    };
    Some((start, text.len()))
}

/// Build an offset mapping table from char to byte.
///
/// Returns a vec where `mapping[char_idx]` gives the byte index, with one
/// extra entry for the end of the text.
#[must_use]
pub fn build_char_to_byte_map(text: &str) -> Vec<usize> {
    let mut map: Vec<usize> = text.char_indices().map(|(byte_idx, _)| byte_idx).collect();
    map.push(text.len());
    map
}

/// Converter for checking several spans against the same text.
///
/// Pre-computes the char to byte table once so each lookup is O(1). ASCII
/// text skips the table entirely.
pub struct SpanConverter {
    char_to_byte: Vec<usize>,
    char_count: usize,
    is_ascii: bool,
}

impl SpanConverter {
    /// Create a converter for the given text.
    #[must_use]
    pub fn new(text: &str) -> Self {
        if text.is_ascii() {
            Self {
                char_to_byte: Vec::new(),
                char_count: text.len(),
                is_ascii: true,
            }
        } else {
            let char_to_byte = build_char_to_byte_map(text);
            let char_count = char_to_byte.len() - 1;
            Self {
                char_to_byte,
                char_count,
                is_ascii: false,
            }
        }
    }

    /// Number of characters in the text.
    #[must_use]
    pub const fn char_count(&self) -> usize {
        self.char_count
    }

    /// Convert char offset to byte offset, `None` past the end of the text.
    #[must_use]
    pub fn char_to_byte(&self, char_idx: usize) -> Option<usize> {
        if char_idx > self.char_count {
            None
        } else if self.is_ascii {
            Some(char_idx)
        } else {
            self.char_to_byte.get(char_idx).copied()
        }
    }

    /// Convert a char span to a [`TextSpan`].
    #[must_use]
    pub fn from_chars(&self, char_start: usize, char_end: usize) -> Option<TextSpan> {
        if char_start > char_end {
            return None;
        }
        Some(TextSpan {
            byte_start: self.char_to_byte(char_start)?,
            byte_end: self.char_to_byte(char_end)?,
            char_start,
            char_end,
        })
    }

    /// Check if this text is ASCII.
    #[must_use]
    pub const fn is_ascii(&self) -> bool {
        self.is_ascii
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chars_to_bytes_ascii() {
        assert_eq!(chars_to_bytes("Hello John", 6, 10), Some((6, 10)));
    }

    #[test]
    fn test_chars_to_bytes_multibyte() {
        let text = "Zoë said she left";
        let (start, end) = chars_to_bytes(text, 9, 12).unwrap();
        assert_eq!(&text[start..end], "she");
    }

    #[test]
    fn test_chars_to_bytes_end_of_text() {
        let text = "café";
        assert_eq!(chars_to_bytes(text, 3, 4), Some((3, 5)));
        assert_eq!(chars_to_bytes(text, 4, 4), Some((5, 5)));
    }

    #[test]
    fn test_chars_to_bytes_out_of_range() {
        assert_eq!(chars_to_bytes("abc", 2, 5), None);
        assert_eq!(chars_to_bytes("abc", 4, 4), None);
        assert_eq!(chars_to_bytes("abc", 2, 1), None);
    }

    #[test]
    fn test_converter_matches_one_off() {
        let text = "Ørsted met Åsa; she smiled.";
        let conv = SpanConverter::new(text);
        assert!(!conv.is_ascii());
        for (start, end) in [(0, 6), (11, 14), (16, 19), (20, 27)] {
            let span = conv.from_chars(start, end).unwrap();
            assert_eq!(
                Some((span.byte_start, span.byte_end)),
                chars_to_bytes(text, start, end)
            );
        }
        assert!(conv.from_chars(20, 28).is_none());
    }

    #[test]
    fn test_text_span_extract() {
        let text = "Zoë said she left";
        let span = TextSpan::from_chars(text, 0, 3).unwrap();
        assert_eq!(span.extract(text), "Zoë");
        assert_eq!(span.char_len(), 3);
        assert_eq!(span.byte_range(), 0..4);
        assert_eq!(span.char_range(), 0..3);
        assert!(!span.is_empty());
    }
}
