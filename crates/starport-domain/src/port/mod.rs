//! Collaborator Ports - What the schedule needs from its host
//!
//! These traits are the PORTs of the domain: the schedule decides when and
//! whether to call them, the host decides how they work. Implementations
//! live in the adapter layer (or in the host itself).

pub mod clock;
pub mod notifier;
pub mod session;
pub mod shipyard;
pub mod target;
