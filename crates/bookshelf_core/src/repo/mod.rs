//! Repository layer for the session's book collection.
//!
//! # Responsibility
//! - Hold the authoritative in-memory list of books.
//! - Keep persistence concerns out; saving is the service's job.
//!
//! # Invariants
//! - Repository APIs never validate books; add-time checks are caller-side.
//! - Stale handles surface as `RepoError`, never as panics.

pub mod library;
