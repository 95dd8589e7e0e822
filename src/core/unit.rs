//! Single code-unit search and raw equality
//!
//! Leaf primitives for the UTF-16 searches. `memchr` only knows bytes, so
//! units are scanned through their native-endian byte view:
//! - pick one byte of the unit as the SIMD probe
//! - keep only hits on the matching byte lane (even/odd offset)
//! - confirm the full unit before reporting

use memchr::{memchr_iter, memrchr_iter};

/// View units as raw bytes (native endianness)
#[inline]
pub fn as_bytes(units: &[u16]) -> &[u8] {
    bytemuck::cast_slice(units)
}

/// Choose the probe byte and its lane within a unit.
///
/// Zero high bytes are everywhere in BMP text, so probing a zero byte
/// would stop on nearly every unit. Prefer whichever byte is non-zero.
#[inline]
fn probe(unit: u16) -> (u8, usize) {
    let [first, second] = unit.to_ne_bytes();
    if first == 0 && second != 0 {
        (second, 1)
    } else {
        (first, 0)
    }
}

/// Find the first occurrence of `unit`
#[inline]
pub fn find_unit(haystack: &[u16], unit: u16) -> Option<usize> {
    let (byte, lane) = probe(unit);
    memchr_iter(byte, as_bytes(haystack))
        .filter(|&i| i % 2 == lane)
        .map(|i| i / 2)
        .find(|&i| haystack[i] == unit)
}

/// Find the last occurrence of `unit`
#[inline]
pub fn rfind_unit(haystack: &[u16], unit: u16) -> Option<usize> {
    let (byte, lane) = probe(unit);
    memrchr_iter(byte, as_bytes(haystack))
        .filter(|&i| i % 2 == lane)
        .map(|i| i / 2)
        .find(|&i| haystack[i] == unit)
}

/// Compare two equal-length unit regions bit-for-bit (`2 * len` bytes)
#[inline]
pub fn units_equal(a: &[u16], b: &[u16]) -> bool {
    debug_assert_eq!(a.len(), b.len());
    as_bytes(a) == as_bytes(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_find_ascii() {
        let hay = units("hello world");
        assert_eq!(find_unit(&hay, 'o' as u16), Some(4));
        assert_eq!(rfind_unit(&hay, 'o' as u16), Some(7));
        assert_eq!(find_unit(&hay, 'z' as u16), None);
        assert_eq!(rfind_unit(&hay, 'z' as u16), None);
    }

    #[test]
    fn test_find_empty_haystack() {
        assert_eq!(find_unit(&[], 'a' as u16), None);
        assert_eq!(rfind_unit(&[], 'a' as u16), None);
    }

    #[test]
    fn test_find_zero_unit() {
        let hay = [0x0061, 0x0100, 0x0000, 0x0062, 0x0000];
        assert_eq!(find_unit(&hay, 0), Some(2));
        assert_eq!(rfind_unit(&hay, 0), Some(4));
    }

    #[test]
    fn test_find_ignores_wrong_lane() {
        // 0x6100 and 0x0061 share a byte value on opposite lanes
        let hay = [0x6100, 0x0161, 0x6100, 0x0061];
        assert_eq!(find_unit(&hay, 0x0061), Some(3));
        assert_eq!(rfind_unit(&hay, 0x6100), Some(2));
        assert_eq!(find_unit(&hay, 0x6100), Some(0));
    }

    #[test]
    fn test_find_high_byte_only_unit() {
        let hay = [0x0001, 0x0200, 0x0300, 0x0200];
        assert_eq!(find_unit(&hay, 0x0200), Some(1));
        assert_eq!(rfind_unit(&hay, 0x0200), Some(3));
        assert_eq!(find_unit(&hay, 0x0400), None);
    }

    #[test]
    fn test_find_surrogate_halves() {
        // U+1F600 encodes as D83D DE00
        let hay = units("a\u{1F600}b");
        assert_eq!(find_unit(&hay, 0xDE00), Some(2));
        assert_eq!(rfind_unit(&hay, 0xD83D), Some(1));
    }

    #[test]
    fn test_find_matches_naive_scan() {
        let hay: Vec<u16> = (0..2048u32).map(|i| ((i * 7919) % 600) as u16).collect();
        for unit in [0u16, 1, 255, 256, 300, 511, 599, 600] {
            assert_eq!(find_unit(&hay, unit), hay.iter().position(|&u| u == unit));
            assert_eq!(rfind_unit(&hay, unit), hay.iter().rposition(|&u| u == unit));
        }
    }

    #[test]
    fn test_units_equal() {
        assert!(units_equal(&units("abc"), &units("abc")));
        assert!(!units_equal(&units("abc"), &units("abd")));
        assert!(units_equal(&[], &[]));
        assert!(!units_equal(&[0x0100], &[0x0001]));
    }
}
