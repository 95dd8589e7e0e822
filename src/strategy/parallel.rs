//! Parallel Batch Search
//!
//! Uses Rayon to run one search per pattern over a shared text.

use rayon::prelude::*;
use crate::core::SearchFn;

/// Run `op` for every pattern in parallel, results in pattern order
pub fn search_many<P>(text: &[u16], patterns: &[P], op: SearchFn) -> Vec<Option<usize>>
where
    P: AsRef<[u16]> + Sync,
{
    patterns
        .par_iter()
        .map(|pattern| op(text, pattern.as_ref()))
        .collect()
}

/// Count overlapping matches of every pattern in parallel
pub fn count_many<P>(text: &[u16], patterns: &[P]) -> Vec<usize>
where
    P: AsRef<[u16]> + Sync,
{
    patterns
        .par_iter()
        .map(|pattern| crate::core::count_matches(text, pattern.as_ref()))
        .collect()
}
