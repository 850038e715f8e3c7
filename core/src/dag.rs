//! Candidate word graph shared between dictionaries and segmenters.
//!
//! A dictionary turns a run of runes into one `DagNode` per position. Each
//! node lists the words that may start there as edges pointing at the index
//! of the word's last rune. The segmenter never builds edges itself; it only
//! scores and walks what the dictionary hands back.

use serde::{Deserialize, Serialize};

use crate::rune::Rune;

/// One dictionary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictUnit {
    pub word: Vec<char>,
    /// Log-probability-like score, higher is preferred.
    pub weight: f64,
    /// Part-of-speech label, empty when unknown.
    pub tag: String,
}

impl DictUnit {
    pub fn new<T: Into<String>>(word: &str, weight: f64, tag: T) -> Self {
        Self {
            word: word.chars().collect(),
            weight,
            tag: tag.into(),
        }
    }

    /// Word length in runes.
    pub fn len(&self) -> usize {
        self.word.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    pub fn text(&self) -> String {
        self.word.iter().collect()
    }
}

/// Outgoing edge of a DAG node.
///
/// `next` is the inclusive index of the last rune covered by the edge, so a
/// single-rune edge from node `i` has `next == i`. `unit` is `None` for the
/// fallback edge of a rune no dictionary word covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<'d> {
    pub next: usize,
    pub unit: Option<&'d DictUnit>,
}

impl<'d> Edge<'d> {
    pub fn new(next: usize, unit: Option<&'d DictUnit>) -> Self {
        Self { next, unit }
    }

    pub fn fallback(at: usize) -> Self {
        Self { next: at, unit: None }
    }
}

/// All candidate words starting at one rune.
#[derive(Debug, Clone)]
pub struct DagNode<'d> {
    pub rune: Rune,
    /// Ordered candidates. Never empty; the order decides score ties.
    pub edges: Vec<Edge<'d>>,
}

impl<'d> DagNode<'d> {
    pub fn new(rune: Rune) -> Self {
        Self {
            rune,
            edges: Vec::new(),
        }
    }
}

/// Contract between the segmentation engine and a weighted dictionary.
///
/// Implementations must return exactly one node per input rune from
/// [`Dictionary::find`], every node must carry at least one edge, and edges
/// must never point backwards. Edge order is part of the contract: scoring
/// keeps the *last* of several equally good edges, so the order has to be
/// stable between calls.
pub trait Dictionary {
    /// Build the DAG for `runes`, considering words of at most `max_word_len` runes.
    fn find<'d>(&'d self, runes: &[Rune], max_word_len: usize) -> Vec<DagNode<'d>>;

    /// Score of a rune matched by no dictionary word.
    fn min_weight(&self) -> f64;

    /// Exact lookup of a whole word.
    fn lookup(&self, word: &str) -> Option<&DictUnit>;

    /// Whether `ch` was added as a one-rune word by a user dictionary.
    fn is_user_dict_single_chinese_word(&self, _ch: char) -> bool {
        false
    }
}
