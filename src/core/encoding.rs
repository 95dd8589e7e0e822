//! UTF-16 Input Decoding
//!
//! Turns BEAM binaries and UTF-8 strings into code-unit buffers.
//! Binaries are not guaranteed to be 2-byte aligned, so units are always
//! assembled from byte pairs rather than cast in place.

use std::fmt;

/// Byte order of a UTF-16 binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    /// Detect byte order from a byte order mark.
    ///
    /// Returns the order and the BOM length to skip. Without a BOM the
    /// input is taken as little endian.
    pub fn detect(input: &[u8]) -> (Self, usize) {
        match input {
            [0xFF, 0xFE, ..] => (ByteOrder::Little, 2),
            [0xFE, 0xFF, ..] => (ByteOrder::Big, 2),
            _ => (ByteOrder::Little, 0),
        }
    }
}

/// Reasons a buffer cannot be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Byte count is not a multiple of two
    OddLength,
    /// Unpaired surrogate when converting back to a string
    InvalidUtf16,
}

impl DecodeError {
    /// Atom name reported to Elixir
    pub fn as_str(&self) -> &'static str {
        match self {
            DecodeError::OddLength => "odd_length",
            DecodeError::InvalidUtf16 => "invalid_utf16",
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::error::Error for DecodeError {}

/// Decode raw bytes into code units. No BOM handling.
pub fn decode_units(bytes: &[u8], order: ByteOrder) -> Result<Vec<u16>, DecodeError> {
    if bytes.len() % 2 != 0 {
        return Err(DecodeError::OddLength);
    }

    let units = match order {
        ByteOrder::Little => bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect(),
        ByteOrder::Big => bytes
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect(),
    };
    Ok(units)
}

/// Decode bytes, honouring and stripping a leading BOM
pub fn decode_with_bom(bytes: &[u8]) -> Result<Vec<u16>, DecodeError> {
    let (order, skip) = ByteOrder::detect(bytes);
    decode_units(&bytes[skip..], order)
}

/// Encode a UTF-8 string as code units
#[inline]
pub fn units_from_str(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

/// Convert code units back to a UTF-8 string
pub fn units_to_string(units: &[u16]) -> Result<String, DecodeError> {
    String::from_utf16(units).map_err(|_| DecodeError::InvalidUtf16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_le_bom() {
        assert_eq!(ByteOrder::detect(&[0xFF, 0xFE, b'a', 0x00]), (ByteOrder::Little, 2));
    }

    #[test]
    fn test_detect_be_bom() {
        assert_eq!(ByteOrder::detect(&[0xFE, 0xFF, 0x00, b'a']), (ByteOrder::Big, 2));
    }

    #[test]
    fn test_detect_no_bom() {
        assert_eq!(ByteOrder::detect(b"a\0"), (ByteOrder::Little, 0));
        assert_eq!(ByteOrder::detect(&[0xFF]), (ByteOrder::Little, 0));
        assert_eq!(ByteOrder::detect(&[]), (ByteOrder::Little, 0));
    }

    #[test]
    fn test_decode_le() {
        let units = decode_units(&[b'h', 0x00, b'i', 0x00, 0x3D, 0xD8], ByteOrder::Little).unwrap();
        assert_eq!(units, vec![b'h' as u16, b'i' as u16, 0xD83D]);
    }

    #[test]
    fn test_decode_be() {
        let units = decode_units(&[0x00, b'h', 0xD8, 0x3D], ByteOrder::Big).unwrap();
        assert_eq!(units, vec![b'h' as u16, 0xD83D]);
    }

    #[test]
    fn test_decode_odd_length() {
        assert_eq!(decode_units(&[0x00, 0x01, 0x02], ByteOrder::Little), Err(DecodeError::OddLength));
    }

    #[test]
    fn test_decode_with_bom_strips_mark() {
        let be = [0xFE, 0xFF, 0x00, b'<', 0x00, b'r'];
        assert_eq!(decode_with_bom(&be).unwrap(), vec![b'<' as u16, b'r' as u16]);

        let le = [0xFF, 0xFE, b'<', 0x00];
        assert_eq!(decode_with_bom(&le).unwrap(), vec![b'<' as u16]);
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode_units(&[], ByteOrder::Little).unwrap(), Vec::<u16>::new());
        assert_eq!(decode_with_bom(&[0xFF, 0xFE]).unwrap(), Vec::<u16>::new());
    }

    #[test]
    fn test_string_conversion() {
        let units = units_from_str("h\u{e9}\u{1F600}");
        assert_eq!(units, vec![0x0068, 0x00E9, 0xD83D, 0xDE00]);
        assert_eq!(units_to_string(&units).unwrap(), "h\u{e9}\u{1F600}");
    }

    #[test]
    fn test_lone_surrogate_rejected() {
        assert_eq!(units_to_string(&[0x0061, 0xD800]), Err(DecodeError::InvalidUtf16));
        assert_eq!(DecodeError::InvalidUtf16.to_string(), "invalid_utf16");
    }
}
