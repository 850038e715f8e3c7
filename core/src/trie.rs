/// Character trie mapping dictionary words to unit indices.
use ahash::AHashMap;

use crate::rune::Rune;

/// A prefix tree keyed by `char`.
///
/// Each node that terminates a dictionary word stores the index of that
/// word's `DictUnit` in the owning dictionary's unit table. Used by
/// `DictTrie` to enumerate every word starting at a position while building
/// the segmentation DAG.
///
/// # Example
/// ```
/// use libjieba_core::trie::TrieNode;
/// use libjieba_core::rune::decode_runes;
///
/// let mut trie = TrieNode::new();
/// trie.insert(&['北', '京'], 0);
/// trie.insert(&['北', '京', '大', '学'], 1);
///
/// let runes = decode_runes("北京大学");
/// let prefixes = trie.walk_prefixes(&runes, 0, 8);
/// assert_eq!(prefixes, vec![(1, 0), (3, 1)]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct TrieNode {
    children: AHashMap<char, Box<TrieNode>>,
    /// Unit index when a word ends at this node.
    value: Option<usize>,
}

impl TrieNode {
    /// Create a new empty trie root.
    pub fn new() -> Self {
        Self {
            children: AHashMap::new(),
            value: None,
        }
    }

    /// Insert `word` with the given unit index, returning the index it replaced.
    pub fn insert(&mut self, word: &[char], index: usize) -> Option<usize> {
        let mut node = self;
        for ch in word {
            node = node
                .children
                .entry(*ch)
                .or_insert_with(|| Box::new(TrieNode::new()));
        }
        node.value.replace(index)
    }

    /// Exact lookup: the unit index stored for `word`, if any.
    pub fn get<I: IntoIterator<Item = char>>(&self, word: I) -> Option<usize> {
        let mut node = self;
        for ch in word {
            node = node.children.get(&ch)?;
        }
        node.value
    }

    /// Walk the trie over `runes[start..]` and return every word found.
    ///
    /// Results are `(last_index, unit_index)` pairs where `last_index` is the
    /// inclusive rune index of the word's final character, in order of
    /// increasing length. Words longer than `max_len` runes are not reported.
    pub fn walk_prefixes(&self, runes: &[Rune], start: usize, max_len: usize) -> Vec<(usize, usize)> {
        let mut res = Vec::new();
        let mut node = self;
        for (idx, rune) in runes.iter().enumerate().skip(start) {
            if idx - start + 1 > max_len {
                break;
            }
            match node.children.get(&rune.ch) {
                Some(child) => node = child,
                None => break,
            }
            if let Some(value) = node.value {
                res.push((idx, value));
            }
        }
        res
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.value.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rune::decode_runes;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_basic_insert_and_get() {
        let mut trie = TrieNode::new();
        trie.insert(&chars("你好"), 0);
        trie.insert(&chars("你"), 1);

        assert_eq!(trie.get("你好".chars()), Some(0));
        assert_eq!(trie.get("你".chars()), Some(1));
        assert_eq!(trie.get("好".chars()), None);
        assert_eq!(trie.get("你好吗".chars()), None);
    }

    #[test]
    fn test_insert_replaces_value() {
        let mut trie = TrieNode::new();
        assert_eq!(trie.insert(&chars("中国"), 3), None);
        assert_eq!(trie.insert(&chars("中国"), 7), Some(3));
        assert_eq!(trie.get("中国".chars()), Some(7));
    }

    #[test]
    fn test_walk_prefixes_multiple_matches() {
        let mut trie = TrieNode::new();
        trie.insert(&chars("中"), 0);
        trie.insert(&chars("中华"), 1);
        trie.insert(&chars("中华人民"), 2);

        let runes = decode_runes("中华人民共和国");
        let prefixes = trie.walk_prefixes(&runes, 0, 16);
        assert_eq!(prefixes, vec![(0, 0), (1, 1), (3, 2)]);
    }

    #[test]
    fn test_walk_prefixes_respects_max_len() {
        let mut trie = TrieNode::new();
        trie.insert(&chars("中华"), 1);
        trie.insert(&chars("中华人民"), 2);

        let runes = decode_runes("中华人民");
        assert_eq!(trie.walk_prefixes(&runes, 0, 3), vec![(1, 1)]);
        assert!(trie.walk_prefixes(&runes, 0, 1).is_empty());
    }

    #[test]
    fn test_walk_prefixes_from_offset() {
        let mut trie = TrieNode::new();
        trie.insert(&chars("人民"), 4);

        let runes = decode_runes("中华人民");
        assert_eq!(trie.walk_prefixes(&runes, 2, 8), vec![(3, 4)]);
        assert!(trie.walk_prefixes(&runes, 1, 8).is_empty());
    }
}
