//! Domain model for the book collection.
//!
//! # Responsibility
//! - Define the `Book` record shared by every core component.
//!
//! # Invariants
//! - The persisted shape of `Book` has exactly five fields and no version.

pub mod book;
