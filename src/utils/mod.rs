//! Shared utilities for the console

pub mod error;
pub mod validate;
