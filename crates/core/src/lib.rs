//! Shared domain types for the gaugesync workspace.
//!
//! Pure logic only: entity-id domain handling and reading
//! classification. No I/O lives here.

pub mod entity;
pub mod reading;
