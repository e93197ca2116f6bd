// ABOUTME: Job posting extraction engine: listing location plus per-field rule cascades.
// ABOUTME: Pure functions over an already parsed DOM; no I/O and no shared mutable state.

//! Extraction engine.
//!
//! Submodules:
//! - `locator`: finds the posting elements of a page.
//! - `rules`: declarative per-field rule tables.
//! - `select`: the generic first-match-wins rule runner.
//! - `fields`: per-field extraction and record assembly.
//! - `page`: the per-page pipeline tying the above together.
//! - `links`: posting URL resolution and company derivation.
//! - `pattern`: compiled element predicates.
//! - `compiled`: process-wide selector cache.

pub mod compiled;
pub mod fields;
pub mod links;
pub mod locator;
pub mod page;
pub mod pattern;
pub mod rules;
pub mod select;
