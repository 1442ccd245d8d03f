//! Core console functionality
//!
//! Data model, enterprise context, resource managers, the OAuth linking
//! flow, and the dashboard composer.

pub mod context;
pub mod dashboard;
pub mod managers;
pub mod oauth;
pub mod types;
