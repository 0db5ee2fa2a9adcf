//! Canonical anagram keys
//!
//! Two words are anagrams iff their character multisets are equal, so the
//! characters sorted code-point ascending form a canonical key. The key
//! function itself is case-sensitive; callers lowercase first so that
//! "Eat" and "tea" land in the same group.

/// Compute the canonical anagram key for a word
///
/// Sorts the word's characters in code-point order. Pure function; the
/// caller is responsible for trimming and lowercasing.
#[inline]
pub fn anagram_key(word: &str) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    chars.sort_unstable();
    chars.into_iter().collect()
}

/// Trim a raw input line, discarding blanks
///
/// Returns `None` for lines that are empty after trimming; those never
/// count toward any shard or group.
#[inline]
pub fn normalize(line: &str) -> Option<&str> {
    let word = line.trim();
    if word.is_empty() {
        None
    } else {
        Some(word)
    }
}
