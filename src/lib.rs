//! Autofiller command-line front end.
//!
//! Exposes modules for integration testing

pub mod cli;
pub mod config;
pub mod profile_file;

pub use config::Config;
pub use profile_file::FileProfileStore;
