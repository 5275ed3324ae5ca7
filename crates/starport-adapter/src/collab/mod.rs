//! Collaborator implementations
//!
//! In-memory stand-ins for the host services behind the domain ports.
//! Useful for development hosts and tests; a real game integration would
//! implement the same traits against its own engine.

pub mod in_memory;
