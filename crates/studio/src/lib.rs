//! `academy-studio` library crate.
//!
//! Re-exports the configuration, CLI definition, and command runners for
//! integration testing. The binary entrypoint lives in `main.rs`.

pub mod cli;
pub mod commands;
pub mod config;
