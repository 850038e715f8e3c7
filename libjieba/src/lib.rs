//! libjieba crate root
//!
//! Maximum-probability word segmentation for Chinese text mixed with Latin
//! and digit runs, on top of the dictionary and text model in
//! `libjieba-core`.
//!
//! Public API exported here:
//! - `MpSegment` and `DictSource` from `segment`
//! - `score` / `Route` from `scorer`
//! - `extract`, `SpanExtractor`, `WordSpan` from `extractor`
//! - `PosTagger` and `SegmentProvider` from `tagger`

pub mod extractor;
pub mod scorer;
pub mod segment;
pub mod tagger;

pub use extractor::{extract, ExtractState, SpanExtractor, WordSpan};
pub use scorer::{score, Route};
pub use segment::{DictSource, MpSegment, Word};
pub use tagger::{special_rule, PosTagger, SegmentProvider};

// Convenience re-exports for common types used by callers.
pub use libjieba_core::{Config, DictTrie, DictUnit, Dictionary, UserWordWeight, MAX_WORD_LENGTH};
