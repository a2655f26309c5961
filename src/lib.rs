//! Gostall - build Go executables under any name you want
//!
//! Compiles a Go program from a local path or a remote module reference and
//! installs the executable under a caller-chosen name and location.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Output planning, strategy selection and build orchestration
//! - [`infra`] - Infrastructure layer (filesystem, signals, processes)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
