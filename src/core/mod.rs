//! Core business logic
//!
//! Output planning, strategy selection and the two build strategies. All
//! process and filesystem effects go through [`crate::infra`].

pub mod install;
pub mod local;
pub mod output;
pub mod remote;
pub mod resolve;
pub mod strategy;
