//! Read-only statistics views.

pub mod aggregate;
