//! Search Strategy Module
//!
//! - Direct: one search per NIF call over a freshly decoded binary (lib.rs)
//! - Resource: decode once into a TextResource, search many times
//! - Parallel: batch of patterns against one text on the Rayon pool

pub mod parallel;

pub use parallel::{count_many, search_many};
