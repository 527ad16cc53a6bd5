//! Database connection setup

pub mod init;

pub use init::*;
