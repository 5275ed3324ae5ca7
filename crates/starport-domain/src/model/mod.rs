//! Domain Models - The vocabulary of Starport
//!
//! These types match how the rest of the system talks about scheduled work:
//! a Profile is a reusable launch template, a Mission is one due-time-gated
//! unit of deferred work instantiated from it.

pub mod mission;
pub mod profile;
