//! RustyScan - Fast UTF-16 search primitives
//!
//! Searches:
//! A: Exact subsequence search (index_of, last_index_of, match_indices)
//! B: Exclusion search (index_of_any_except, last_index_of_any_except)
//!
//! Inputs:
//! - UTF-16LE binaries (offsets into exactly the binary given)
//! - UTF-8 strings (re-encoded, offsets are still UTF-16 code units)
//! - TextResource references (decoded once, searched many times)
//!
//! All results are code-unit offsets, or -1 when nothing is found.

use rustler::{Binary, Encoder, Env, NifResult, ResourceArc, Term};

mod core;
mod resource;
mod strategy;
mod term;

use crate::core::encoding::{decode_units, decode_with_bom, units_from_str, units_to_string, ByteOrder, DecodeError};
use crate::core::{except, search, to_offset, SearchFn};
use resource::{TextRef, TextResource};

// ============================================================================
// Allocator Configuration
// ============================================================================

#[cfg(feature = "memory_tracking")]
mod tracking {
    use std::alloc::{GlobalAlloc, Layout};
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub static ALLOCATED: AtomicUsize = AtomicUsize::new(0);
    pub static PEAK_ALLOCATED: AtomicUsize = AtomicUsize::new(0);

    pub struct TrackingAllocator;

    #[cfg(feature = "mimalloc")]
    static UNDERLYING: mimalloc::MiMalloc = mimalloc::MiMalloc;

    #[cfg(not(feature = "mimalloc"))]
    static UNDERLYING: std::alloc::System = std::alloc::System;

    unsafe impl GlobalAlloc for TrackingAllocator {
        unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
            let ptr = UNDERLYING.alloc(layout);
            if !ptr.is_null() {
                let current = ALLOCATED.fetch_add(layout.size(), Ordering::Relaxed) + layout.size();
                PEAK_ALLOCATED.fetch_max(current, Ordering::Relaxed);
            }
            ptr
        }

        unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
            ALLOCATED.fetch_sub(layout.size(), Ordering::Relaxed);
            UNDERLYING.dealloc(ptr, layout)
        }
    }
}

#[cfg(feature = "memory_tracking")]
#[global_allocator]
static GLOBAL: tracking::TrackingAllocator = tracking::TrackingAllocator;

#[cfg(all(feature = "mimalloc", not(feature = "memory_tracking")))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

// ============================================================================
// Memory Tracking NIFs
// ============================================================================

#[cfg(feature = "memory_tracking")]
use std::sync::atomic::Ordering;

#[cfg(feature = "memory_tracking")]
#[rustler::nif]
fn get_rust_memory() -> usize {
    tracking::ALLOCATED.load(Ordering::SeqCst)
}

#[cfg(feature = "memory_tracking")]
#[rustler::nif]
fn get_rust_memory_peak() -> usize {
    tracking::PEAK_ALLOCATED.load(Ordering::SeqCst)
}

#[cfg(feature = "memory_tracking")]
#[rustler::nif]
fn reset_rust_memory_stats() -> (usize, usize) {
    let current = tracking::ALLOCATED.load(Ordering::SeqCst);
    let peak = tracking::PEAK_ALLOCATED.swap(current, Ordering::SeqCst);
    (current, peak)
}

#[cfg(not(feature = "memory_tracking"))]
#[rustler::nif]
fn get_rust_memory() -> usize {
    0
}

#[cfg(not(feature = "memory_tracking"))]
#[rustler::nif]
fn get_rust_memory_peak() -> usize {
    0
}

#[cfg(not(feature = "memory_tracking"))]
#[rustler::nif]
fn reset_rust_memory_stats() -> (usize, usize) {
    (0, 0)
}

// ============================================================================
// Shared Helpers
// ============================================================================

/// Decode a UTF-16LE NIF binary (no BOM handling)
#[inline]
fn decode_binary(binary: &Binary) -> Result<Vec<u16>, DecodeError> {
    decode_units(binary.as_slice(), ByteOrder::Little)
}

/// Decode both binaries and run `op`
fn search_binaries<'a>(
    env: Env<'a>,
    haystack: Binary<'a>,
    needle: Binary<'a>,
    op: SearchFn,
) -> NifResult<Term<'a>> {
    let haystack = match decode_binary(&haystack) {
        Ok(units) => units,
        Err(e) => return Ok(term::decode_error(env, e)),
    };
    let needle = match decode_binary(&needle) {
        Ok(units) => units,
        Err(e) => return Ok(term::decode_error(env, e)),
    };
    Ok(term::offset_to_term(env, op(&haystack, &needle)))
}

/// Re-encode both strings as UTF-16 and run `op`
#[inline]
fn search_strings(haystack: &str, needle: &str, op: SearchFn) -> i64 {
    to_offset(op(&units_from_str(haystack), &units_from_str(needle)))
}

/// Run `op` against a stored text
fn search_text<'a>(env: Env<'a>, text: TextRef, needle: Binary<'a>, op: SearchFn) -> NifResult<Term<'a>> {
    let needle = match decode_binary(&needle) {
        Ok(units) => units,
        Err(e) => return Ok(term::decode_error(env, e)),
    };
    match text.with_units(|units| op(units, &needle)) {
        Ok(result) => Ok(term::offset_to_term(env, result)),
        Err(reason) => term::resource_error(env, reason),
    }
}

// ============================================================================
// Search A/B: Binaries
// ============================================================================

/// First offset of `pattern` in `haystack`, or -1
#[rustler::nif]
fn index_of<'a>(env: Env<'a>, haystack: Binary<'a>, pattern: Binary<'a>) -> NifResult<Term<'a>> {
    search_binaries(env, haystack, pattern, search::index_of)
}

/// Last offset of `pattern` in `haystack`, or -1
#[rustler::nif]
fn last_index_of<'a>(env: Env<'a>, haystack: Binary<'a>, pattern: Binary<'a>) -> NifResult<Term<'a>> {
    search_binaries(env, haystack, pattern, search::last_index_of)
}

/// First offset whose unit is not in `excluded`, or -1
#[rustler::nif]
fn index_of_any_except<'a>(env: Env<'a>, haystack: Binary<'a>, excluded: Binary<'a>) -> NifResult<Term<'a>> {
    search_binaries(env, haystack, excluded, except::index_of_any_except)
}

/// Last offset whose unit is not in `excluded`, or -1
#[rustler::nif]
fn last_index_of_any_except<'a>(env: Env<'a>, haystack: Binary<'a>, excluded: Binary<'a>) -> NifResult<Term<'a>> {
    search_binaries(env, haystack, excluded, except::last_index_of_any_except)
}

/// Every start offset of `pattern`, overlapping matches included
#[rustler::nif]
fn match_indices<'a>(env: Env<'a>, haystack: Binary<'a>, pattern: Binary<'a>) -> NifResult<Term<'a>> {
    let haystack = match decode_binary(&haystack) {
        Ok(units) => units,
        Err(e) => return Ok(term::decode_error(env, e)),
    };
    let pattern = match decode_binary(&pattern) {
        Ok(units) => units,
        Err(e) => return Ok(term::decode_error(env, e)),
    };
    let indices: Vec<usize> = search::match_indices(&haystack, &pattern).collect();
    Ok(term::indices_to_term(env, indices))
}

// ============================================================================
// Search A/B: UTF-8 Strings
// ============================================================================

#[rustler::nif]
fn index_of_string(haystack: &str, pattern: &str) -> i64 {
    search_strings(haystack, pattern, search::index_of)
}

#[rustler::nif]
fn last_index_of_string(haystack: &str, pattern: &str) -> i64 {
    search_strings(haystack, pattern, search::last_index_of)
}

#[rustler::nif]
fn index_of_any_except_string(haystack: &str, excluded: &str) -> i64 {
    search_strings(haystack, excluded, except::index_of_any_except)
}

#[rustler::nif]
fn last_index_of_any_except_string(haystack: &str, excluded: &str) -> i64 {
    search_strings(haystack, excluded, except::last_index_of_any_except)
}

// ============================================================================
// Text Resources
// ============================================================================

/// Decode a UTF-16 binary once (BOM honoured and stripped)
/// Returns {:ok, ref} or {:error, reason}
#[rustler::nif]
fn text_new<'a>(env: Env<'a>, input: Binary<'a>) -> NifResult<Term<'a>> {
    match decode_with_bom(input.as_slice()) {
        Ok(units) => {
            let arc = ResourceArc::new(TextResource::new(units));
            Ok(term::ok_tuple(env, arc))
        }
        Err(e) => Ok(term::decode_error(env, e)),
    }
}

/// Store a UTF-8 string as UTF-16 text
#[rustler::nif]
fn text_from_string(input: &str) -> TextRef {
    ResourceArc::new(TextResource::new(units_from_str(input)))
}

/// Append UTF-16LE units, returning the new length in code units
#[rustler::nif]
fn text_append<'a>(env: Env<'a>, text: TextRef, more: Binary<'a>) -> NifResult<Term<'a>> {
    let more = match decode_binary(&more) {
        Ok(units) => units,
        Err(e) => return Ok(term::decode_error(env, e)),
    };
    match text.append(&more) {
        Ok(len) => Ok(len.encode(env)),
        Err(reason) => term::resource_error(env, reason),
    }
}

/// Length of the stored text in code units
#[rustler::nif]
fn text_length<'a>(env: Env<'a>, text: TextRef) -> NifResult<Term<'a>> {
    match text.with_units(|units| units.len()) {
        Ok(len) => Ok(len.encode(env)),
        Err(reason) => term::resource_error(env, reason),
    }
}

/// Convert the stored text back to a UTF-8 string
#[rustler::nif]
fn text_to_string<'a>(env: Env<'a>, text: TextRef) -> NifResult<Term<'a>> {
    match text.with_units(units_to_string) {
        Ok(Ok(s)) => Ok(term::ok_tuple(env, s)),
        Ok(Err(e)) => Ok(term::decode_error(env, e)),
        Err(reason) => term::resource_error(env, reason),
    }
}

#[rustler::nif]
fn text_index_of<'a>(env: Env<'a>, text: TextRef, pattern: Binary<'a>) -> NifResult<Term<'a>> {
    search_text(env, text, pattern, search::index_of)
}

#[rustler::nif]
fn text_last_index_of<'a>(env: Env<'a>, text: TextRef, pattern: Binary<'a>) -> NifResult<Term<'a>> {
    search_text(env, text, pattern, search::last_index_of)
}

#[rustler::nif]
fn text_index_of_any_except<'a>(env: Env<'a>, text: TextRef, excluded: Binary<'a>) -> NifResult<Term<'a>> {
    search_text(env, text, excluded, except::index_of_any_except)
}

#[rustler::nif]
fn text_last_index_of_any_except<'a>(env: Env<'a>, text: TextRef, excluded: Binary<'a>) -> NifResult<Term<'a>> {
    search_text(env, text, excluded, except::last_index_of_any_except)
}

// ============================================================================
// Parallel Batch Search
// ============================================================================

/// Decode every pattern, then run `op` for each on the Rayon pool
fn search_text_many<'a>(
    env: Env<'a>,
    text: TextRef,
    patterns: Vec<Binary<'a>>,
    op: SearchFn,
) -> NifResult<Term<'a>> {
    let patterns = match patterns.iter().map(decode_binary).collect::<Result<Vec<_>, _>>() {
        Ok(patterns) => patterns,
        Err(e) => return Ok(term::decode_error(env, e)),
    };
    match text.with_units(|units| strategy::search_many(units, &patterns, op)) {
        Ok(results) => Ok(term::offsets_to_term(env, results)),
        Err(reason) => term::resource_error(env, reason),
    }
}

/// First offset of each pattern, in pattern order
#[rustler::nif(schedule = "DirtyCpu")]
fn text_index_of_many<'a>(env: Env<'a>, text: TextRef, patterns: Vec<Binary<'a>>) -> NifResult<Term<'a>> {
    search_text_many(env, text, patterns, search::index_of)
}

/// Last offset of each pattern, in pattern order
#[rustler::nif(schedule = "DirtyCpu")]
fn text_last_index_of_many<'a>(env: Env<'a>, text: TextRef, patterns: Vec<Binary<'a>>) -> NifResult<Term<'a>> {
    search_text_many(env, text, patterns, search::last_index_of)
}

/// Overlapping match count of each pattern, in pattern order
#[rustler::nif(schedule = "DirtyCpu")]
fn text_count_many<'a>(env: Env<'a>, text: TextRef, patterns: Vec<Binary<'a>>) -> NifResult<Term<'a>> {
    let patterns = match patterns.iter().map(decode_binary).collect::<Result<Vec<_>, _>>() {
        Ok(patterns) => patterns,
        Err(e) => return Ok(term::decode_error(env, e)),
    };
    match text.with_units(|units| strategy::count_many(units, &patterns)) {
        Ok(counts) => Ok(counts.encode(env)),
        Err(reason) => term::resource_error(env, reason),
    }
}

// ============================================================================
// NIF Initialization
// ============================================================================

#[allow(non_local_definitions)]
fn load(env: Env, _info: Term) -> bool {
    let _ = env.register::<TextResource>().is_ok();
    true
}

rustler::init!("Elixir.RustyScan.Native", load = load);
