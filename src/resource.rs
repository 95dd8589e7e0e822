//! ResourceArc Wrappers
//!
//! Persistent decoded text, so repeated searches skip re-decoding the binary.

use rustler::ResourceArc;
use std::sync::Mutex;

/// Decoded UTF-16 text that can be stored in a ResourceArc
pub struct TextResource {
    /// Code units - decoded once, searched many times
    pub units: Mutex<Option<Vec<u16>>>,
}

impl TextResource {
    pub fn new(units: Vec<u16>) -> Self {
        TextResource {
            units: Mutex::new(Some(units)),
        }
    }

    /// Run `f` over the stored units.
    ///
    /// The lock is held for the whole call, so appends never interleave
    /// with a running search.
    ///
    /// # Errors
    ///
    /// Returns `"mutex_poisoned"` if the text mutex is poisoned,
    /// or `"no_text"` if no text is present.
    pub fn with_units<F, R>(&self, f: F) -> Result<R, &'static str>
    where
        F: FnOnce(&[u16]) -> R,
    {
        let guard = self.units.lock().map_err(|_| "mutex_poisoned")?;
        let units = guard.as_ref().ok_or("no_text")?;
        Ok(f(units))
    }

    /// Append units to the end of the text, returning the new length
    ///
    /// # Errors
    ///
    /// Same reasons as [`TextResource::with_units`].
    pub fn append(&self, more: &[u16]) -> Result<usize, &'static str> {
        let mut guard = self.units.lock().map_err(|_| "mutex_poisoned")?;
        let units = guard.as_mut().ok_or("no_text")?;
        units.extend_from_slice(more);
        Ok(units.len())
    }
}

#[rustler::resource_impl]
impl rustler::Resource for TextResource {}

impl Default for TextResource {
    fn default() -> Self {
        TextResource {
            units: Mutex::new(None),
        }
    }
}

/// Type alias for text ResourceArc
pub type TextRef = ResourceArc<TextResource>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::encoding::units_from_str;
    use crate::core::search::index_of;

    #[test]
    fn test_with_units() {
        let text = TextResource::new(units_from_str("hello world"));
        let found = text.with_units(|units| index_of(units, &units_from_str("world")));
        assert_eq!(found, Ok(Some(6)));
    }

    #[test]
    fn test_append_extends_text() {
        let text = TextResource::new(units_from_str("abc"));
        assert_eq!(text.append(&units_from_str("def")), Ok(6));
        let found = text.with_units(|units| index_of(units, &units_from_str("cd")));
        assert_eq!(found, Ok(Some(2)));
    }

    #[test]
    fn test_missing_text() {
        let text = TextResource::default();
        assert_eq!(text.with_units(|units| units.len()), Err("no_text"));
        assert_eq!(text.append(&[1]), Err("no_text"));
    }
}
