//! Weighted dictionary backed by a character trie.
//!
//! `DictTrie` is the stock [`Dictionary`] used by the segmenters. It loads
//! jieba-style text dictionaries (`word freq tag` per line), turns raw
//! frequencies into log-probability weights, accepts user words on top, and
//! can be compiled into an fst + bincode artifact pair for fast start-up.
//!
//! Edge order produced by [`DictTrie::find`] at position `i`:
//! 1. `(i, unit of the single rune)` or `(i, None)` when the rune alone is not a word;
//! 2. every longer word starting at `i`, shortest first.
//!
//! Segmentation ties are resolved in favour of the later edge, so with this
//! order a longer word wins over a shorter one with the same total score.

use ahash::AHashSet;
use anyhow::{bail, Context, Result};
use fst::{Map, MapBuilder, Streamer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{create_dir_all, File};
use std::io::{BufRead, BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::dag::{DagNode, DictUnit, Dictionary, Edge};
use crate::rune::Rune;
use crate::trie::TrieNode;

/// File names used by [`DictTrie::save_artifacts`] / [`DictTrie::load_artifacts`].
pub const ARTIFACT_FST: &str = "dict.fst";
pub const ARTIFACT_PAYLOAD: &str = "dict.bincode";

/// Weight given to user words that come without a frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserWordWeight {
    Min,
    #[default]
    Median,
    Max,
}

impl UserWordWeight {
    fn pick(self, min: f64, median: f64, max: f64) -> f64 {
        match self {
            UserWordWeight::Min => min,
            UserWordWeight::Median => median,
            UserWordWeight::Max => max,
        }
    }
}

/// Serialized payload of a compiled dictionary.
#[derive(Debug, Serialize, Deserialize)]
struct DictSnapshot {
    units: Vec<DictUnit>,
    freq_sum: f64,
    min_weight: f64,
    max_weight: f64,
    median_weight: f64,
    user_word_default_weight: f64,
    user_single_chars: Vec<char>,
}

#[derive(Debug, Clone)]
pub struct DictTrie {
    units: Vec<DictUnit>,
    trie: TrieNode,
    freq_sum: f64,
    min_weight: f64,
    max_weight: f64,
    median_weight: f64,
    user_word_default_weight: f64,
    user_single_chars: AHashSet<char>,
}

impl DictTrie {
    /// Build from `(word, freq, tag)` triples of a main dictionary.
    ///
    /// Each weight is `ln(freq / Σfreq)`. The static weights (min, median,
    /// max) are taken over these entries only; user words added later do
    /// not move them.
    pub fn from_entries<I, W, T>(entries: I, user_weight: UserWordWeight) -> Result<Self>
    where
        I: IntoIterator<Item = (W, f64, T)>,
        W: AsRef<str>,
        T: Into<String>,
    {
        let raw: Vec<(W, f64, T)> = entries.into_iter().collect();
        let freq_sum: f64 = raw.iter().map(|(_, f, _)| *f).sum();
        if raw.is_empty() || freq_sum <= 0.0 {
            bail!("dictionary has no entries with positive frequency");
        }
        let units: Vec<DictUnit> = raw
            .into_iter()
            .filter(|(w, _, _)| !w.as_ref().is_empty())
            .map(|(w, f, t)| DictUnit::new(w.as_ref(), (f / freq_sum).ln(), t))
            .collect();
        if units.is_empty() {
            bail!("dictionary has no non-empty words");
        }
        Ok(Self::build(units, freq_sum, user_weight))
    }

    /// Build from units whose weights are already final.
    ///
    /// Static weights are computed from the given units. There is no
    /// frequency total, so user words must then be added without one.
    pub fn from_weighted_units(units: Vec<DictUnit>, user_weight: UserWordWeight) -> Result<Self> {
        if units.is_empty() {
            bail!("dictionary has no entries");
        }
        Ok(Self::build(units, 0.0, user_weight))
    }

    fn build(units: Vec<DictUnit>, freq_sum: f64, user_weight: UserWordWeight) -> Self {
        let mut weights: Vec<f64> = units.iter().map(|u| u.weight).collect();
        weights.sort_by(|a, b| a.total_cmp(b));
        let min_weight = weights[0];
        let max_weight = weights[weights.len() - 1];
        let median_weight = weights[weights.len() / 2];
        let user_word_default_weight = user_weight.pick(min_weight, median_weight, max_weight);

        let mut trie = TrieNode::new();
        for (idx, unit) in units.iter().enumerate() {
            trie.insert(&unit.word, idx);
        }

        debug!(
            entries = units.len(),
            min_weight, median_weight, max_weight, "built dictionary trie"
        );

        Self {
            units,
            trie,
            freq_sum,
            min_weight,
            max_weight,
            median_weight,
            user_word_default_weight,
            user_single_chars: AHashSet::new(),
        }
    }

    /// Parse a main dictionary: one `word freq tag` entry per line.
    pub fn from_reader<R: BufRead>(reader: R, source: &str, user_weight: UserWordWeight) -> Result<Self> {
        let mut entries = Vec::new();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("read {}", source))?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() != 3 {
                bail!(
                    "{}:{}: expected `word freq tag`, found {} columns",
                    source,
                    lineno + 1,
                    parts.len()
                );
            }
            let freq = parse_freq(parts[1]).with_context(|| format!("{}:{}", source, lineno + 1))?;
            entries.push((parts[0].to_string(), freq, parts[2].to_string()));
        }
        debug!(source, entries = entries.len(), "parsed dictionary");
        Self::from_entries(entries, user_weight)
    }

    /// Load a main dictionary file plus any number of user dictionaries.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        dict_path: P,
        user_dict_paths: &[Q],
        user_weight: UserWordWeight,
    ) -> Result<Self> {
        let dict_path = dict_path.as_ref();
        let f = File::open(dict_path).with_context(|| format!("open dictionary {}", dict_path.display()))?;
        let mut dict = Self::from_reader(BufReader::new(f), &dict_path.display().to_string(), user_weight)?;
        for path in user_dict_paths {
            dict.load_user_dict(path)?;
        }
        Ok(dict)
    }

    /// Load one user dictionary file.
    pub fn load_user_dict<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("open user dictionary {}", path.display()))?;
        self.load_user_dict_from_reader(BufReader::new(f), &path.display().to_string())
    }

    /// Parse user dictionary lines: `word`, `word tag` or `word freq tag`.
    pub fn load_user_dict_from_reader<R: BufRead>(&mut self, reader: R, source: &str) -> Result<()> {
        let mut added = 0usize;
        for (lineno, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("read {}", source))?;
            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts.as_slice() {
                [] => continue,
                [word] => self.insert_user_word(word, ""),
                [word, tag] => self.insert_user_word(word, *tag),
                [word, freq, tag] => {
                    let freq = parse_freq(freq).with_context(|| format!("{}:{}", source, lineno + 1))?;
                    self.insert_user_word_with_freq(word, freq, *tag)?
                }
                _ => {
                    warn!(source, line = lineno + 1, "skipping user dictionary line with {} columns", parts.len());
                    continue;
                }
            };
            added += 1;
        }
        debug!(source, added, "loaded user dictionary");
        Ok(())
    }

    /// Add a word with the configured default user weight.
    pub fn insert_user_word<T: Into<String>>(&mut self, word: &str, tag: T) {
        let weight = self.user_word_default_weight;
        self.insert_unit(DictUnit::new(word, weight, tag));
    }

    /// Add a word whose weight is derived from `freq` and the main dictionary total.
    pub fn insert_user_word_with_freq<T: Into<String>>(&mut self, word: &str, freq: f64, tag: T) -> Result<()> {
        if self.freq_sum <= 0.0 {
            bail!("cannot weigh user word {:?}: dictionary has no frequency total", word);
        }
        let weight = (freq / self.freq_sum).ln();
        self.insert_unit(DictUnit::new(word, weight, tag));
        Ok(())
    }

    fn insert_unit(&mut self, unit: DictUnit) {
        if unit.is_empty() {
            return;
        }
        if unit.len() == 1 {
            self.user_single_chars.insert(unit.word[0]);
        }
        let idx = self.units.len();
        self.trie.insert(&unit.word, idx);
        self.units.push(unit);
    }

    pub fn freq_sum(&self) -> f64 {
        self.freq_sum
    }

    pub fn max_weight(&self) -> f64 {
        self.max_weight
    }

    pub fn median_weight(&self) -> f64 {
        self.median_weight
    }

    pub fn user_word_default_weight(&self) -> f64 {
        self.user_word_default_weight
    }

    /// Re-select the weight used for user words without a frequency.
    /// Words already inserted keep their weight.
    pub fn set_user_word_weight(&mut self, user_weight: UserWordWeight) {
        self.user_word_default_weight = user_weight.pick(self.min_weight, self.median_weight, self.max_weight);
    }

    /// Number of stored units, replaced ones included.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Write `dict.fst` (word -> unit index) and `dict.bincode` into `dir`.
    pub fn save_artifacts<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;

        // fst keys must be inserted in sorted order
        let mut live: BTreeMap<String, u64> = BTreeMap::new();
        for unit in &self.units {
            if let Some(idx) = self.trie.get(unit.word.iter().copied()) {
                live.insert(unit.text(), idx as u64);
            }
        }

        let fst_path = dir.join(ARTIFACT_FST);
        let w = BufWriter::new(File::create(&fst_path).with_context(|| format!("create {}", fst_path.display()))?);
        let mut builder = MapBuilder::new(w)?;
        for (word, idx) in &live {
            builder.insert(word, *idx)?;
        }
        builder.finish()?;

        let mut user_single_chars: Vec<char> = self.user_single_chars.iter().copied().collect();
        user_single_chars.sort_unstable();
        let snapshot = DictSnapshot {
            units: self.units.clone(),
            freq_sum: self.freq_sum,
            min_weight: self.min_weight,
            max_weight: self.max_weight,
            median_weight: self.median_weight,
            user_word_default_weight: self.user_word_default_weight,
            user_single_chars,
        };
        let bin_path = dir.join(ARTIFACT_PAYLOAD);
        let w = BufWriter::new(File::create(&bin_path).with_context(|| format!("create {}", bin_path.display()))?);
        bincode::serialize_into(w, &snapshot)?;

        debug!(dir = %dir.display(), words = live.len(), "saved dictionary artifacts");
        Ok(())
    }

    /// Load a dictionary written by [`DictTrie::save_artifacts`].
    pub fn load_artifacts<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let fst_path = dir.join(ARTIFACT_FST);
        let bin_path = dir.join(ARTIFACT_PAYLOAD);

        let map = {
            let mut f = File::open(&fst_path).with_context(|| format!("open {}", fst_path.display()))?;
            let mut buf = Vec::new();
            f.read_to_end(&mut buf)?;
            Map::new(buf).with_context(|| format!("fst map {}", fst_path.display()))?
        };

        let snapshot: DictSnapshot = {
            let f = File::open(&bin_path).with_context(|| format!("open {}", bin_path.display()))?;
            bincode::deserialize_from(BufReader::new(f)).with_context(|| format!("deserialize {}", bin_path.display()))?
        };

        let mut trie = TrieNode::new();
        let mut stream = map.stream();
        while let Some((key, idx)) = stream.next() {
            let word = std::str::from_utf8(key).context("dictionary key is not UTF-8")?;
            let idx = idx as usize;
            if idx >= snapshot.units.len() {
                bail!("word {:?} points at unit {} of {}", word, idx, snapshot.units.len());
            }
            let chars: Vec<char> = word.chars().collect();
            trie.insert(&chars, idx);
        }

        debug!(dir = %dir.display(), units = snapshot.units.len(), "loaded dictionary artifacts");
        Ok(Self {
            units: snapshot.units,
            trie,
            freq_sum: snapshot.freq_sum,
            min_weight: snapshot.min_weight,
            max_weight: snapshot.max_weight,
            median_weight: snapshot.median_weight,
            user_word_default_weight: snapshot.user_word_default_weight,
            user_single_chars: snapshot.user_single_chars.into_iter().collect(),
        })
    }
}

impl Dictionary for DictTrie {
    fn find<'d>(&'d self, runes: &[Rune], max_word_len: usize) -> Vec<DagNode<'d>> {
        let mut dag = Vec::with_capacity(runes.len());
        for (i, rune) in runes.iter().enumerate() {
            let mut node = DagNode::new(*rune);
            // the single-rune edge is always considered, whatever the length bound
            let matches = self.trie.walk_prefixes(runes, i, max_word_len.max(1));
            let mut rest = matches.as_slice();
            match rest.first() {
                Some(&(last, idx)) if last == i => {
                    node.edges.push(Edge::new(i, Some(&self.units[idx])));
                    rest = &rest[1..];
                }
                _ => node.edges.push(Edge::fallback(i)),
            }
            node.edges
                .extend(rest.iter().map(|&(last, idx)| Edge::new(last, Some(&self.units[idx]))));
            dag.push(node);
        }
        dag
    }

    fn min_weight(&self) -> f64 {
        self.min_weight
    }

    fn lookup(&self, word: &str) -> Option<&DictUnit> {
        self.trie.get(word.chars()).map(|idx| &self.units[idx])
    }

    fn is_user_dict_single_chinese_word(&self, ch: char) -> bool {
        self.user_single_chars.contains(&ch)
    }
}

/// Split a user dictionary path list on `|` or `;`.
pub fn split_dict_paths(paths: &str) -> Vec<PathBuf> {
    paths
        .split(['|', ';'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn parse_freq(raw: &str) -> Result<f64> {
    let freq: f64 = raw.parse().with_context(|| format!("invalid frequency {:?}", raw))?;
    if !freq.is_finite() || freq < 0.0 {
        bail!("invalid frequency {:?}", raw);
    }
    Ok(freq)
}
