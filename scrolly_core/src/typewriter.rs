// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Character-by-character text reveal.

extern crate alloc;

use alloc::string::String;
use core::time::Duration;

/// Reveals a string one `char` per tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Typewriter {
    text: String,
    total: usize,
    shown: usize,
    char_delay: Duration,
}

impl Typewriter {
    /// Creates a typewriter with nothing revealed yet.
    pub fn new(text: impl Into<String>, char_delay: Duration) -> Self {
        let text = text.into();
        let total = text.chars().count();
        Self {
            text,
            total,
            shown: 0,
            char_delay,
        }
    }

    /// The full text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Delay between characters.
    pub fn char_delay(&self) -> Duration {
        self.char_delay
    }

    /// Time to reveal the whole text: `chars * char_delay`.
    pub fn duration(&self) -> Duration {
        self.char_delay
            .saturating_mul(u32::try_from(self.total).unwrap_or(u32::MAX))
    }

    /// Number of characters in the text.
    pub fn len(&self) -> usize {
        self.total
    }

    /// Returns `true` for an empty text.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of characters revealed.
    pub fn shown(&self) -> usize {
        self.shown
    }

    /// Whether every character is revealed.
    pub fn is_complete(&self) -> bool {
        self.shown >= self.total
    }

    /// The revealed prefix, always cut on a `char` boundary.
    pub fn visible_text(&self) -> &str {
        match self.text.char_indices().nth(self.shown) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }

    /// Reveals one more character; returns `true` once the text is complete.
    pub fn advance(&mut self) -> bool {
        if self.shown < self.total {
            self.shown += 1;
        }
        self.is_complete()
    }

    /// Reveals everything at once.
    pub fn finish(&mut self) {
        self.shown = self.total;
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn reveals_one_char_per_advance() {
        let mut t = Typewriter::new("héllo", Duration::from_millis(45));
        assert_eq!(t.visible_text(), "");
        assert!(!t.advance());
        assert!(!t.advance());
        assert_eq!(t.visible_text(), "hé", "multi-byte chars are never split");
        while !t.advance() {}
        assert_eq!(t.visible_text(), "héllo");
        assert!(t.advance(), "advancing a complete typewriter stays complete");
        assert_eq!(t.shown(), 5);
    }

    #[test]
    fn duration_counts_chars_not_bytes() {
        let t = Typewriter::new("héllo", Duration::from_millis(45));
        assert_eq!(t.duration(), Duration::from_millis(225));
    }

    #[test]
    fn empty_text_is_complete_immediately() {
        let t = Typewriter::new("", Duration::from_millis(22));
        assert!(t.is_complete());
        assert_eq!(t.duration(), Duration::ZERO);
    }
}
