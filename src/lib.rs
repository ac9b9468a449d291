//! An ordered, duplicate-preserving multiset backed by a probabilistic skiplist.
//!
//! The `skiplist` module holds the core structure: a tower of sorted levels whose nodes live in
//! an `arena` and are linked by handles. `MultiSet` is built purely on the skiplist's public
//! insert, remove, search, and iteration operations.
//!
//! None of the types are synchronized; callers that share a collection between threads must
//! serialize access themselves.

#[macro_use]
extern crate log;
extern crate rand;

pub mod arena;
pub mod multiset;
pub mod skiplist;

pub use crate::multiset::MultiSet;
