//! Command-line front end for the pacs.008 toolkit.
//!
//! The binary lives in `main.rs`; the command implementations are exposed
//! here so they can be driven from tests.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
