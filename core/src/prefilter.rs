//! Splits a rune sequence at separator characters before DAG construction.
//!
//! Each separator rune becomes a range of its own; the text between
//! separators forms the other ranges. Ranges are yielded left to right and
//! together cover the input exactly.

use ahash::AHashSet;
use once_cell::sync::Lazy;
use std::ops::Range;

use crate::rune::Rune;

/// Separators used when nothing else is configured: space, tab, newline,
/// full-width comma and full-width full stop.
pub const SPECIAL_SEPARATORS: &str = " \t\n\u{FF0C}\u{3002}";

static DEFAULT_SEPARATORS: Lazy<SeparatorSet> = Lazy::new(SeparatorSet::default);

/// Set of characters that always split a sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatorSet {
    chars: AHashSet<char>,
}

impl SeparatorSet {
    pub fn from_chars(chars: &str) -> Self {
        Self {
            chars: chars.chars().collect(),
        }
    }

    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl Default for SeparatorSet {
    fn default() -> Self {
        Self::from_chars(SPECIAL_SEPARATORS)
    }
}

/// The process-wide default separator set.
pub fn default_separators() -> &'static SeparatorSet {
    &DEFAULT_SEPARATORS
}

/// Iterator over the index ranges of `runes` between separators.
///
/// # Example
/// ```
/// use libjieba_core::prefilter::{default_separators, PreFilter};
/// use libjieba_core::rune::decode_runes;
///
/// let runes = decode_runes("你好，世界");
/// let ranges: Vec<_> = PreFilter::new(&runes, default_separators()).collect();
/// assert_eq!(ranges, vec![0..2, 2..3, 3..5]);
/// ```
#[derive(Debug, Clone)]
pub struct PreFilter<'r, 's> {
    runes: &'r [Rune],
    separators: &'s SeparatorSet,
    cursor: usize,
}

impl<'r, 's> PreFilter<'r, 's> {
    pub fn new(runes: &'r [Rune], separators: &'s SeparatorSet) -> Self {
        Self {
            runes,
            separators,
            cursor: 0,
        }
    }
}

impl Iterator for PreFilter<'_, '_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        if self.cursor >= self.runes.len() {
            return None;
        }
        let begin = self.cursor;
        while self.cursor < self.runes.len() {
            if self.separators.contains(self.runes[self.cursor].ch) {
                if self.cursor == begin {
                    self.cursor += 1;
                }
                return Some(begin..self.cursor);
            }
            self.cursor += 1;
        }
        Some(begin..self.cursor)
    }
}
