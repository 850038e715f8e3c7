// libjieba/src/tagger.rs
//
// Part-of-speech tagging on top of a segmenter.
//
// Words found in the dictionary take the dictionary's tag. Anything else
// is classified by its ASCII content: numbers become "m", Latin words
// "eng", everything else "x".

use libjieba_core::DictUnit;

pub const POS_M: &str = "m";
pub const POS_ENG: &str = "eng";
pub const POS_X: &str = "x";

/// What the tagger needs from a segmenter.
pub trait SegmentProvider {
    /// Segment `sentence` into words.
    fn segment<'t>(&self, sentence: &'t str) -> Vec<&'t str>;

    /// Dictionary entry for an exact word.
    fn lookup_unit(&self, word: &str) -> Option<&DictUnit>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PosTagger;

impl PosTagger {
    pub fn new() -> Self {
        Self
    }

    /// Segment `text` with `provider` and tag every word.
    pub fn tag<P: SegmentProvider + ?Sized>(&self, text: &str, provider: &P) -> Vec<(String, String)> {
        provider
            .segment(text)
            .into_iter()
            .map(|word| (word.to_string(), self.lookup_tag(word, provider)))
            .collect()
    }

    /// Tag of a single word: the dictionary's when present and non-empty.
    pub fn lookup_tag<P: SegmentProvider + ?Sized>(&self, word: &str, provider: &P) -> String {
        match provider.lookup_unit(word) {
            Some(unit) if !unit.tag.is_empty() => unit.tag.clone(),
            _ => special_rule(word).to_string(),
        }
    }
}

/// Classify a word the dictionary knows nothing about.
///
/// Only the first ASCII runes are inspected: counting stops once the number
/// of ASCII runes seen reaches half the word length (rounded down).
pub fn special_rule(word: &str) -> &'static str {
    let len = word.chars().count();
    let mut eng = 0usize;
    let mut m = 0usize;
    for ch in word.chars() {
        if eng >= len / 2 {
            break;
        }
        if ch.is_ascii() {
            eng += 1;
            if ch.is_ascii_digit() {
                m += 1;
            }
        }
    }
    if eng == 0 {
        POS_X
    } else if m == eng {
        POS_M
    } else {
        POS_ENG
    }
}
