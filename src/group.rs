//! Anagram grouping
//!
//! Builds the key -> group table for one word stream (the whole input in
//! direct mode, a single length shard in sharded mode). Words are trimmed,
//! lowercased, and appended to their key's group in first-seen order.

use crate::key::{anagram_key, normalize};
use crate::reader::MmapLineIterator;

use ahash::RandomState;
use hashbrown::HashMap;
use std::path::Path;

/// Mapping from canonical anagram key to the words sharing it
///
/// Lives for one grouping pass; holds no state across runs.
pub struct GroupTable {
    groups: HashMap<String, Vec<String>, RandomState>,
    words_inserted: u64,
}

impl GroupTable {
    pub fn new() -> Self {
        Self {
            groups: HashMap::with_hasher(RandomState::new()),
            words_inserted: 0,
        }
    }

    /// Pre-size the table from an expected word count
    ///
    /// The hint is a performance knob only; any value yields the same
    /// groups.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            groups: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            words_inserted: 0,
        }
    }

    /// Insert one raw line
    ///
    /// Trims, skips blanks, lowercases, and appends to the group for the
    /// word's anagram key, creating the group on first occurrence.
    /// Returns true if the line contributed a word.
    pub fn insert(&mut self, line: &str) -> bool {
        let Some(word) = normalize(line) else {
            return false;
        };

        let word = word.to_lowercase();
        let key = anagram_key(&word);
        self.groups.entry(key).or_default().push(word);
        self.words_inserted += 1;
        true
    }

    /// Number of distinct anagram keys seen
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of words inserted across all groups
    pub fn words_inserted(&self) -> u64 {
        self.words_inserted
    }

    /// Look up the group for a word's key, if any
    pub fn group_for(&self, word: &str) -> Option<&[String]> {
        self.groups
            .get(&anagram_key(&word.to_lowercase()))
            .map(|g| g.as_slice())
    }

    /// All groups sorted by key
    ///
    /// Hash iteration order is seed-dependent; sorting by key makes the
    /// emitted output deterministic for a given input.
    pub fn sorted_groups(&self) -> Vec<(&str, &[String])> {
        let mut entries: Vec<_> = self
            .groups
            .iter()
            .map(|(k, g)| (k.as_str(), g.as_slice()))
            .collect();
        entries.sort_unstable_by_key(|(k, _)| *k);
        entries
    }
}

impl Default for GroupTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Group every word of a file into a fresh table
///
/// `size_hint` is the expected line count, used only to pre-size the
/// table. An unreadable file propagates the error; the driver decides
/// whether that is fatal (primary input) or a per-shard skip.
pub fn group_words(path: &Path, size_hint: usize) -> anyhow::Result<GroupTable> {
    let mut table = GroupTable::with_capacity(size_hint);

    for line in MmapLineIterator::new(path)? {
        table.insert(&line?);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_insert_groups_anagrams() {
        let mut table = GroupTable::new();
        for word in ["listen", "silent", "enlist", "foo", "cat", "act", "dog"] {
            table.insert(word);
        }

        assert_eq!(
            table.group_for("listen").unwrap(),
            ["listen", "silent", "enlist"]
        );
        assert_eq!(table.group_for("cat").unwrap(), ["cat", "act"]);
        assert_eq!(table.group_for("foo").unwrap(), ["foo"]);
        assert_eq!(table.words_inserted(), 7);
    }

    #[test]
    fn test_insert_lowercases_and_trims() {
        let mut table = GroupTable::new();
        assert!(table.insert("  Eat \n"));
        assert!(!table.insert("\n"));
        assert!(table.insert("tea"));

        assert_eq!(table.group_for("eat").unwrap(), ["eat", "tea"]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_first_seen_order_preserved() {
        let mut table = GroupTable::new();
        for word in ["tea", "ate", "eat"] {
            table.insert(word);
        }
        assert_eq!(table.group_for("eat").unwrap(), ["tea", "ate", "eat"]);
    }

    #[test]
    fn test_every_word_lands_in_exactly_one_group() {
        let words = ["pool", "loop", "polo", "stop", "pots", "xyz"];
        let mut table = GroupTable::new();
        for word in words {
            table.insert(word);
        }

        let total: usize = table.sorted_groups().iter().map(|(_, g)| g.len()).sum();
        assert_eq!(total, words.len());
    }

    #[test]
    fn test_sorted_groups_ordered_by_key() {
        let mut table = GroupTable::new();
        for word in ["zoo", "cab", "abc"] {
            table.insert(word);
        }

        let keys: Vec<_> = table.sorted_groups().iter().map(|(k, _)| *k).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_group_words_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "listen\n  Silent \n\nenlist\n").unwrap();

        let table = group_words(file.path(), 4).unwrap();
        assert_eq!(
            table.group_for("listen").unwrap(),
            ["listen", "silent", "enlist"]
        );
        assert_eq!(table.words_inserted(), 3);
    }

    #[test]
    fn test_group_words_missing_file() {
        assert!(group_words(Path::new("/nonexistent/words.txt"), 0).is_err());
    }

    #[test]
    fn test_capacity_hint_does_not_change_groups() {
        let mut a = GroupTable::with_capacity(0);
        let mut b = GroupTable::with_capacity(1024);
        for word in ["rat", "tar", "art"] {
            a.insert(word);
            b.insert(word);
        }
        assert_eq!(a.group_for("rat"), b.group_for("rat"));
    }
}
