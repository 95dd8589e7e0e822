//! Core UTF-16 search primitives
//!
//! This module contains the building blocks every NIF is made of:
//! - Unit: SIMD single code-unit search (memchr) and raw equality
//! - Search: two-phase exact subsequence search, forward and backward
//! - Bitmap: 8 KiB membership table over the whole u16 space
//! - Except: first/last unit outside an exclusion set
//! - Encoding: BOM detection and byte/string to code-unit conversion
//!
//! All searches are pure functions over borrowed `&[u16]` buffers.

pub mod bitmap;
pub mod encoding;
pub mod except;
pub mod search;
pub mod unit;

pub use except::{index_of_any_except, last_index_of_any_except};
pub use search::{count_matches, index_of, last_index_of, match_indices};

/// Signature shared by all four searches: (search buffer, pattern or set)
pub type SearchFn = fn(&[u16], &[u16]) -> Option<usize>;

/// Not-found sentinel at the NIF boundary
pub const NOT_FOUND: i64 = -1;

/// Flatten a search result into an offset or `NOT_FOUND`
#[inline]
pub fn to_offset(result: Option<usize>) -> i64 {
    result.map_or(NOT_FOUND, |i| i as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_offset() {
        assert_eq!(to_offset(None), -1);
        assert_eq!(to_offset(Some(0)), 0);
        assert_eq!(to_offset(Some(42)), 42);
    }

    #[test]
    fn test_search_fn_table() {
        let s: Vec<u16> = "abcab".encode_utf16().collect();
        let p: Vec<u16> = "ab".encode_utf16().collect();
        let ops: [(SearchFn, i64); 4] = [
            (index_of as SearchFn, 0),
            (last_index_of as SearchFn, 3),
            (index_of_any_except as SearchFn, 2),
            (last_index_of_any_except as SearchFn, 2),
        ];
        for (op, expected) in ops {
            assert_eq!(to_offset(op(&s, &p)), expected);
        }
    }
}
