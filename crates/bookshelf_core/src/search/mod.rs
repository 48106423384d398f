//! Query entry points over library snapshots.
//!
//! # Responsibility
//! - Keep all search/filter/sort predicates inside core.
//! - Stay stateless: every function reads a borrowed snapshot.

pub mod query;
