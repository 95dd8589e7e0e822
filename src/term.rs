//! Elixir Term Conversion Utilities
//!
//! Converts search results and failure reasons to Elixir terms.

use rustler::{Encoder, Env, NifResult, Term};
use crate::core::to_offset;
use crate::core::encoding::DecodeError;

// Pre-defined atoms for efficiency - created once at compile time
rustler::atoms! {
    ok,
    error,
    odd_length,
    invalid_utf16,
    mutex_poisoned,
    no_text,
}

/// Convert a search result to an integer term (-1 when not found)
#[inline]
pub fn offset_to_term<'a>(env: Env<'a>, result: Option<usize>) -> Term<'a> {
    to_offset(result).encode(env)
}

/// Convert a batch of search results to a list of integers
pub fn offsets_to_term<'a>(env: Env<'a>, results: Vec<Option<usize>>) -> Term<'a> {
    let mut list = Term::list_new_empty(env);
    for result in results.into_iter().rev() {
        list = list.list_prepend(offset_to_term(env, result));
    }
    list
}

/// Convert match offsets to a list of integers
pub fn indices_to_term<'a>(env: Env<'a>, indices: Vec<usize>) -> Term<'a> {
    let mut list = Term::list_new_empty(env);
    for index in indices.into_iter().rev() {
        list = list.list_prepend(index.encode(env));
    }
    list
}

/// Build `{:error, reason}` for a decode failure
pub fn decode_error<'a>(env: Env<'a>, err: DecodeError) -> Term<'a> {
    let reason = match err {
        DecodeError::OddLength => odd_length(),
        DecodeError::InvalidUtf16 => invalid_utf16(),
    };
    (error(), reason).encode(env)
}

/// Build `{:error, reason}` for a resource access failure
pub fn resource_error<'a>(env: Env<'a>, reason: &str) -> NifResult<Term<'a>> {
    let reason = match reason {
        "mutex_poisoned" => mutex_poisoned(),
        "no_text" => no_text(),
        other => rustler::types::atom::Atom::from_str(env, other)?,
    };
    Ok((error(), reason).encode(env))
}

/// Wrap a value as `{:ok, value}`
pub fn ok_tuple<'a, T: Encoder>(env: Env<'a>, value: T) -> Term<'a> {
    (ok(), value).encode(env)
}
