//! Integration test entry point

mod common;
mod integration;
