//! credportal - client core for the diploma credential portal
//!
//! This library exposes modules for use by the binary and integration tests.

pub mod adapters;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod i18n;
pub mod interceptors;
pub mod notify;
pub mod router;
pub mod session;
pub mod traits;
pub mod utils;
