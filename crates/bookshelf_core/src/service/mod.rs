//! Use-case service layer.
//!
//! # Responsibility
//! - Orchestrate repository mutations and store persistence.
//! - Return explicit outcomes instead of session-level status flags.

pub mod library_service;
