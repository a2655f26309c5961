//! Infrastructure layer
//!
//! Handles all I/O operations: filesystem, signals, and external processes.
//! This module is the only place where side effects occur.

pub mod filesystem;
pub mod process;
pub mod signal;
pub mod toolchain;
