//! 65536-bit membership table over the UTF-16 code unit space

/// Number of bytes in the bitmap (one bit per possible `u16`)
pub const BITMAP_BYTES: usize = 8192;

const WORDS: usize = BITMAP_BYTES / 8;

/// Dense set of code units, one bit per value.
///
/// Built fresh for a single search and dropped with it. Lives on the
/// stack; 8 KiB regardless of how many units it holds.
#[derive(Clone)]
pub struct ExclusionBitmap {
    words: [u64; WORDS],
}

impl ExclusionBitmap {
    /// Create an empty bitmap
    #[inline]
    pub fn new() -> Self {
        ExclusionBitmap { words: [0; WORDS] }
    }

    /// Build a bitmap holding every unit of `units` (duplicates are harmless)
    pub fn from_units(units: &[u16]) -> Self {
        let mut bitmap = Self::new();
        for &unit in units {
            bitmap.insert(unit);
        }
        bitmap
    }

    /// Set the bit for `unit`
    #[inline]
    pub fn insert(&mut self, unit: u16) {
        let unit = unit as usize;
        self.words[unit >> 6] |= 1u64 << (unit & 63);
    }

    /// Test the bit for `unit`
    #[inline]
    pub fn contains(&self, unit: u16) -> bool {
        let unit = unit as usize;
        self.words[unit >> 6] & (1u64 << (unit & 63)) != 0
    }

    /// Number of distinct units in the set
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Check if no unit is set
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }
}

impl Default for ExclusionBitmap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size() {
        assert_eq!(std::mem::size_of::<ExclusionBitmap>(), BITMAP_BYTES);
    }

    #[test]
    fn test_empty() {
        let bitmap = ExclusionBitmap::new();
        assert!(bitmap.is_empty());
        assert_eq!(bitmap.len(), 0);
        assert!(!bitmap.contains(0));
        assert!(!bitmap.contains(u16::MAX));
    }

    #[test]
    fn test_insert_boundaries() {
        let bitmap = ExclusionBitmap::from_units(&[0, 63, 64, u16::MAX]);
        assert!(bitmap.contains(0));
        assert!(bitmap.contains(63));
        assert!(bitmap.contains(64));
        assert!(bitmap.contains(u16::MAX));
        assert!(!bitmap.contains(1));
        assert!(!bitmap.contains(65));
        assert!(!bitmap.contains(u16::MAX - 1));
        assert_eq!(bitmap.len(), 4);
    }

    #[test]
    fn test_duplicates() {
        let bitmap = ExclusionBitmap::from_units(&[7, 7, 7, 0x1234, 7]);
        assert_eq!(bitmap.len(), 2);
        assert!(bitmap.contains(7));
        assert!(bitmap.contains(0x1234));
    }

    #[test]
    fn test_no_casing() {
        let bitmap = ExclusionBitmap::from_units(&['a' as u16]);
        assert!(!bitmap.contains('A' as u16));
    }
}
