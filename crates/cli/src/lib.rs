//! Empty-group sweep library.
//!
//! Exposes configuration, shared state, the scan/deletion/reset engine and
//! the command surface so integration tests and the `groupsweep` binary
//! can both access them.

pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod prompt;
pub mod state;
