//! Integration tests against a mock platform API

mod config_tests;
mod context_tests;
mod manager_tests;
mod oauth_tests;
