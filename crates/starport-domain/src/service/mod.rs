//! Domain Services

pub mod schedule;
