//! `gaugesync-monitor` library crate.
//!
//! Sync engine, supervisor and process setup. The binary entrypoint
//! lives in `main.rs`; the modules are public for integration testing.

pub mod bootstrap;
pub mod config;
pub mod engine;
pub mod error;
pub mod supervisor;
