//! libjieba-core
//!
//! Text model, weighted dictionary and pre-filter shared by the segmenters in
//! the `libjieba` crate.
//!
//! Public API:
//! - `Rune` / `decode_runes` - decoded characters with byte offsets
//! - `DictUnit`, `DagNode`, `Edge` - the candidate word graph
//! - `Dictionary` - contract a segmenter relies on to build that graph
//! - `DictTrie` - trie-backed dictionary loaded from text or compiled artifacts
//! - `PreFilter` - splits a sentence at separator characters
//! - `Config` - configuration loadable from TOML
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod rune;
pub use rune::{decode_runes, Rune};

pub mod dag;
pub use dag::{DagNode, DictUnit, Dictionary, Edge};

pub mod trie;
pub use trie::TrieNode;

pub mod dict;
pub use dict::{split_dict_paths, DictTrie, UserWordWeight};

pub mod prefilter;
pub use prefilter::{default_separators, PreFilter, SeparatorSet, SPECIAL_SEPARATORS};

/// Upper bound on the length, in runes, of a dictionary match.
pub const MAX_WORD_LENGTH: usize = 512;

/// Segmenter configuration.
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Main dictionary (`word freq tag` per line).
    pub dict_path: Option<PathBuf>,
    /// Directory holding `dict.fst` + `dict.bincode`; preferred over `dict_path` when set.
    pub artifacts_dir: Option<PathBuf>,
    /// User dictionaries applied on top of the main one, in order.
    pub user_dict_paths: Vec<PathBuf>,
    /// Weight for user words listed without a frequency.
    pub user_word_weight: UserWordWeight,
    /// Longest dictionary match considered, in runes.
    pub max_word_len: usize,
    /// Characters that always split a sentence.
    pub separators: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dict_path: None,
            artifacts_dir: None,
            user_dict_paths: Vec::new(),
            user_word_weight: UserWordWeight::Median,
            max_word_len: MAX_WORD_LENGTH,
            separators: SPECIAL_SEPARATORS.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Separator set built from `separators`.
    pub fn separator_set(&self) -> SeparatorSet {
        SeparatorSet::from_chars(&self.separators)
    }

    /// Load the dictionary this configuration points at.
    ///
    /// Compiled artifacts win over a text dictionary; user dictionaries are
    /// applied in both cases.
    pub fn load_dictionary(&self) -> anyhow::Result<DictTrie> {
        let mut dict = match (&self.artifacts_dir, &self.dict_path) {
            (Some(dir), _) => {
                let mut dict = DictTrie::load_artifacts(dir)?;
                dict.set_user_word_weight(self.user_word_weight);
                dict
            }
            (None, Some(path)) => DictTrie::load(path, &[] as &[PathBuf], self.user_word_weight)?,
            (None, None) => anyhow::bail!("config names neither `dict_path` nor `artifacts_dir`"),
        };
        for path in &self.user_dict_paths {
            dict.load_user_dict(path)?;
        }
        Ok(dict)
    }
}
