//! # Eden Common Library
//!
//! Shared code for the Eden music tools that talk to the emotion tag store:
//! - Error types
//! - Configuration loading (CLI → ENV → TOML → default)
//! - SQLite connection setup

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
