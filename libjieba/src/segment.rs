// libjieba/src/segment.rs
//
// Maximum-probability segmenter.
//
// Pipeline per sentence: decode runes -> split at separators -> ask the
// dictionary for the DAG of each range -> score the DAG -> extract spans.
// Nothing survives a call except the dictionary, so one segmenter can serve
// concurrent callers as long as its dictionary is not mutated.

use std::ops::Deref;
use std::path::Path;

use anyhow::Result;
use libjieba_core::{
    decode_runes, default_separators, Config, DictTrie, DictUnit, Dictionary, PreFilter, Rune, SeparatorSet,
    UserWordWeight, MAX_WORD_LENGTH,
};
use serde::Serialize;
use tracing::{debug, trace};

use crate::extractor::{extract, WordSpan};
use crate::scorer::score;
use crate::tagger::{PosTagger, SegmentProvider};

/// A dictionary the segmenter either owns or borrows.
///
/// An owned dictionary is dropped together with the segmenter; a borrowed
/// one belongs to someone else and outlives it.
#[derive(Debug)]
pub enum DictSource<'d, D> {
    Owned(D),
    Borrowed(&'d D),
}

impl<D> DictSource<'_, D> {
    pub fn is_owned(&self) -> bool {
        matches!(self, DictSource::Owned(_))
    }
}

impl<D> Deref for DictSource<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        match self {
            DictSource::Owned(dict) => dict,
            DictSource::Borrowed(dict) => *dict,
        }
    }
}

/// A segmented word with its position in the sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Word<'t> {
    pub text: &'t str,
    /// Byte offset in the sentence.
    pub offset: usize,
    /// Offset in characters.
    pub char_offset: usize,
    /// Length in characters.
    pub char_len: usize,
}

impl<'t> Word<'t> {
    fn from_span(sentence: &'t str, span: &WordSpan) -> Self {
        Self {
            text: span.as_str(sentence),
            offset: span.start.byte_offset,
            char_offset: span.start.char_index,
            char_len: span.rune_len(),
        }
    }
}

/// Segmenter choosing the highest-weight path through the dictionary DAG.
///
/// # Example
/// ```
/// use libjieba::MpSegment;
/// use libjieba_core::{DictTrie, UserWordWeight};
///
/// let dict = DictTrie::from_entries(
///     vec![("北京", 10.0, "ns"), ("大学", 20.0, "n"), ("北京大学", 30.0, "nt")],
///     UserWordWeight::Median,
/// )
/// .unwrap();
/// let seg = MpSegment::new(dict);
/// assert_eq!(seg.cut("我在北京大学abc123"), vec!["我", "在", "北京大学", "abc123"]);
/// ```
#[derive(Debug)]
pub struct MpSegment<'d, D = DictTrie> {
    dict: DictSource<'d, D>,
    separators: SeparatorSet,
    max_word_len: usize,
    tagger: PosTagger,
}

impl MpSegment<'static, DictTrie> {
    /// Load a text dictionary and user dictionaries into an owned trie.
    pub fn from_paths<P: AsRef<Path>, Q: AsRef<Path>>(dict_path: P, user_dict_paths: &[Q]) -> Result<Self> {
        let dict = DictTrie::load(dict_path, user_dict_paths, UserWordWeight::default())?;
        Ok(Self::new(dict))
    }

    /// Build a segmenter from a [`Config`].
    pub fn from_config(config: &Config) -> Result<Self> {
        let dict = config.load_dictionary()?;
        let mut seg = Self::new(dict);
        seg.separators = config.separator_set();
        seg.max_word_len = config.max_word_len;
        debug!(max_word_len = seg.max_word_len, separators = seg.separators.len(), "segmenter configured");
        Ok(seg)
    }
}

impl<'d, D: Dictionary> MpSegment<'d, D> {
    /// Segmenter owning `dict`.
    pub fn new(dict: D) -> Self {
        Self::from_source(DictSource::Owned(dict))
    }

    /// Segmenter borrowing a dictionary owned elsewhere.
    pub fn with_dictionary(dict: &'d D) -> Self {
        Self::from_source(DictSource::Borrowed(dict))
    }

    pub fn from_source(dict: DictSource<'d, D>) -> Self {
        Self {
            dict,
            separators: default_separators().clone(),
            max_word_len: MAX_WORD_LENGTH,
            tagger: PosTagger::new(),
        }
    }

    pub fn dictionary(&self) -> &D {
        &self.dict
    }

    pub fn owns_dictionary(&self) -> bool {
        self.dict.is_owned()
    }

    /// Replace the separator characters.
    pub fn reset_separators(&mut self, chars: &str) {
        self.separators = SeparatorSet::from_chars(chars);
    }

    pub fn separators(&self) -> &SeparatorSet {
        &self.separators
    }

    /// Length bound used by [`MpSegment::cut`].
    pub fn max_word_len(&self) -> usize {
        self.max_word_len
    }

    pub fn set_max_word_len(&mut self, max_word_len: usize) {
        self.max_word_len = max_word_len;
    }

    /// Segment `sentence` into words borrowed from it.
    pub fn cut<'t>(&self, sentence: &'t str) -> Vec<&'t str> {
        self.cut_with_max_len(sentence, self.max_word_len)
    }

    pub fn cut_with_max_len<'t>(&self, sentence: &'t str, max_word_len: usize) -> Vec<&'t str> {
        self.cut_spans(sentence, max_word_len)
            .iter()
            .map(|span| span.as_str(sentence))
            .collect()
    }

    /// Segment `sentence` into words with byte and character offsets.
    pub fn cut_words<'t>(&self, sentence: &'t str, max_word_len: usize) -> Vec<Word<'t>> {
        self.cut_spans(sentence, max_word_len)
            .iter()
            .map(|span| Word::from_span(sentence, span))
            .collect()
    }

    /// Segment `sentence` into rune spans.
    pub fn cut_spans(&self, sentence: &str, max_word_len: usize) -> Vec<WordSpan> {
        let runes = decode_runes(sentence);
        self.cut_runes(&runes, max_word_len)
    }

    /// Segment already decoded runes, splitting them at separators first.
    pub fn cut_runes(&self, runes: &[Rune], max_word_len: usize) -> Vec<WordSpan> {
        let mut spans = Vec::with_capacity(runes.len() / 2);
        let mut ranges = 0usize;
        for range in PreFilter::new(runes, &self.separators) {
            spans.extend(self.cut_range(&runes[range], max_word_len));
            ranges += 1;
        }
        trace!(runes = runes.len(), ranges, words = spans.len(), "cut sentence");
        spans
    }

    /// Segment one separator-free range without pre-filtering.
    pub fn cut_range(&self, runes: &[Rune], max_word_len: usize) -> Vec<WordSpan> {
        let dag = self.dict.find(runes, max_word_len);
        let routes = score(&dag, self.dict.min_weight());
        extract(runes, &routes)
    }

    /// Segment and tag `sentence` with part-of-speech labels.
    pub fn tag(&self, sentence: &str) -> Vec<(String, String)> {
        self.tagger.tag(sentence, self)
    }

    pub fn is_user_dict_single_chinese_word(&self, ch: char) -> bool {
        self.dict.is_user_dict_single_chinese_word(ch)
    }
}

impl<D: Dictionary> SegmentProvider for MpSegment<'_, D> {
    fn segment<'t>(&self, sentence: &'t str) -> Vec<&'t str> {
        self.cut(sentence)
    }

    fn lookup_unit(&self, word: &str) -> Option<&DictUnit> {
        self.dict.lookup(word)
    }
}
