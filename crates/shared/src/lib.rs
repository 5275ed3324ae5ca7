//! # Starport Shared
//!
//! Common types and interfaces used across all Starport packages.

pub mod config;
pub mod error;

// Re-exports
pub use config::*;
pub use error::*;
