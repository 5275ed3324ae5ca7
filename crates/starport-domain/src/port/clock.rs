//! Clock - The host's notion of time
//!
//! The schedule never reads wall time itself; every sweep snapshots `now`
//! from this port exactly once.

/// Absolute sim-clock source, in seconds
pub trait Clock {
    fn now(&self) -> f64;
}
