//! Exclusion search: first/last unit outside a given set

use super::bitmap::ExclusionBitmap;

/// Find the first unit of `search` that does not appear in `excluded`.
///
/// An empty `excluded` set excludes nothing, so any non-empty search
/// matches at 0 without building a bitmap.
pub fn index_of_any_except(search: &[u16], excluded: &[u16]) -> Option<usize> {
    if search.is_empty() {
        return None;
    }
    if excluded.is_empty() {
        return Some(0);
    }

    let bitmap = ExclusionBitmap::from_units(excluded);
    search.iter().position(|&unit| !bitmap.contains(unit))
}

/// Find the last unit of `search` that does not appear in `excluded`
pub fn last_index_of_any_except(search: &[u16], excluded: &[u16]) -> Option<usize> {
    if search.is_empty() {
        return None;
    }
    if excluded.is_empty() {
        return Some(search.len() - 1);
    }

    let bitmap = ExclusionBitmap::from_units(excluded);
    search.iter().rposition(|&unit| !bitmap.contains(unit))
}
