//! TimeTagger CLI library.
//!
//! This crate provides the command-line interface: argument parsing,
//! configuration, the record store seam and the command handlers.

mod cli;
pub mod clock;
pub mod commands;
mod config;
pub mod error;
pub mod opener;
pub mod render;
pub mod store;

pub use cli::{Cli, Commands};
pub use clock::Now;
pub use config::{Config, ConfigError};
