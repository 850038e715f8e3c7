//! Decoded code points with their position in the source text.
//!
//! Every other structure in the workspace (DAG nodes, word spans) refers back
//! to the original `&str` through these offsets instead of copying text.

use std::ops::Range;

/// A single decoded character and where it sits in the original sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rune {
    /// The code point.
    pub ch: char,
    /// Byte offset of the first UTF-8 byte in the sentence.
    pub byte_offset: usize,
    /// Number of UTF-8 bytes (1..=4).
    pub byte_len: u8,
    /// Index of this rune among all runes of the sentence.
    pub char_index: usize,
}

impl Rune {
    pub fn new(ch: char, byte_offset: usize, char_index: usize) -> Self {
        Self {
            ch,
            byte_offset,
            byte_len: ch.len_utf8() as u8,
            char_index,
        }
    }

    /// The code point as a plain integer.
    pub fn codepoint(&self) -> u32 {
        self.ch as u32
    }

    /// Exclusive byte offset just past this rune.
    pub fn byte_end(&self) -> usize {
        self.byte_offset + self.byte_len as usize
    }

    /// ASCII letter or digit; the only characters merged when left unmatched.
    pub fn is_ascii_alnum(&self) -> bool {
        self.ch.is_ascii_alphanumeric()
    }
}

/// Decode `text` into runes. Total for any `&str`.
pub fn decode_runes(text: &str) -> Vec<Rune> {
    text.char_indices()
        .enumerate()
        .map(|(idx, (offset, ch))| Rune::new(ch, offset, idx))
        .collect()
}

/// Byte range of `text` covered by the inclusive rune pair `first..=last`.
pub fn byte_range(first: &Rune, last: &Rune) -> Range<usize> {
    first.byte_offset..last.byte_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_mixed_text() {
        let runes = decode_runes("a你b");
        assert_eq!(runes.len(), 3);
        assert_eq!(runes[0], Rune::new('a', 0, 0));
        assert_eq!(runes[1].byte_offset, 1);
        assert_eq!(runes[1].byte_len, 3);
        assert_eq!(runes[1].codepoint(), 0x4F60);
        assert_eq!(runes[2].byte_offset, 4);
        assert_eq!(runes[2].char_index, 2);
    }

    #[test]
    fn decode_empty() {
        assert!(decode_runes("").is_empty());
    }

    #[test]
    fn byte_range_slices_original() {
        let text = "北京大学";
        let runes = decode_runes(text);
        assert_eq!(&text[byte_range(&runes[1], &runes[2])], "京大");
    }

    #[test]
    fn alnum_is_ascii_only() {
        let runes = decode_runes("aZ9_１");
        let flags: Vec<bool> = runes.iter().map(|r| r.is_ascii_alnum()).collect();
        assert_eq!(flags, vec![true, true, true, false, false]);
    }
}
