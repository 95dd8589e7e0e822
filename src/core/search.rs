//! Exact subsequence search over UTF-16 code units
//!
//! Two-phase matching: the pattern's first unit (head) is located with the
//! SIMD single-unit scan, then the remaining units (tail) are verified with
//! one bulk byte comparison. Worst case O(n*m) on repeated heads with failing
//! tails, close to O(n) on real text.

use super::unit::{find_unit, rfind_unit, units_equal};

/// Find the lowest offset where `pattern` occurs in `search`.
///
/// The empty pattern matches at offset 0.
pub fn index_of(search: &[u16], pattern: &[u16]) -> Option<usize> {
    let (head, tail) = match pattern.split_first() {
        Some(parts) => parts,
        None => return Some(0),
    };
    if tail.is_empty() {
        return find_unit(search, *head);
    }

    // Heads past n - (m - 1) cannot start a full match
    let mut remaining = search.len().checked_sub(tail.len())?;
    let mut offset = 0;

    while remaining > 0 {
        let relative = find_unit(&search[offset..offset + remaining], *head)?;
        let candidate = offset + relative;
        let rest = candidate + 1;

        if units_equal(&search[rest..rest + tail.len()], tail) {
            return Some(candidate);
        }

        offset += relative + 1;
        remaining -= relative + 1;
    }

    None
}

/// Find the highest offset where `pattern` occurs in `search`.
///
/// The empty pattern matches at offset `search.len()`.
pub fn last_index_of(search: &[u16], pattern: &[u16]) -> Option<usize> {
    let (head, tail) = match pattern.split_first() {
        Some(parts) => parts,
        None => return Some(search.len()),
    };
    if tail.is_empty() {
        return rfind_unit(search, *head);
    }

    // Exclusive upper bound on candidate head offsets
    let mut end = search.len().checked_sub(tail.len())?;

    while end > 0 {
        let candidate = rfind_unit(&search[..end], *head)?;
        let rest = candidate + 1;

        if units_equal(&search[rest..rest + tail.len()], tail) {
            return Some(candidate);
        }

        end = candidate;
    }

    None
}

/// Iterator over every start offset of a pattern, ascending.
///
/// Overlapping occurrences are all reported. The empty pattern yields
/// every offset from 0 to `search.len()` inclusive.
#[derive(Debug, Clone)]
pub struct MatchIndices<'a> {
    search: &'a [u16],
    pattern: &'a [u16],
    pos: usize,
    done: bool,
}

impl<'a> MatchIndices<'a> {
    /// Create an iterator over the matches of `pattern` in `search`
    pub fn new(search: &'a [u16], pattern: &'a [u16]) -> Self {
        MatchIndices {
            search,
            pattern,
            pos: 0,
            done: false,
        }
    }
}

impl Iterator for MatchIndices<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.done || self.pos > self.search.len() {
            return None;
        }

        match index_of(&self.search[self.pos..], self.pattern) {
            Some(relative) => {
                let found = self.pos + relative;
                self.pos = found + 1;
                Some(found)
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

/// Iterate over all start offsets of `pattern` in `search`
#[inline]
pub fn match_indices<'a>(search: &'a [u16], pattern: &'a [u16]) -> MatchIndices<'a> {
    MatchIndices::new(search, pattern)
}

/// Count occurrences of `pattern`, overlapping ones included
pub fn count_matches(search: &[u16], pattern: &[u16]) -> usize {
    match_indices(search, pattern).count()
}
