//! Persistence codec
//!
//! `node` is the generic ordered hierarchical container and its text form;
//! `state` maps a `MissionSchedule` onto it and back.

pub mod node;
pub mod state;
