//! # Starport Adapter Layer
//!
//! Everything the domain core needs from the outside world, implemented:
//! the persistence codec for the schedule, and in-memory collaborator
//! implementations for hosting, development, and tests.

pub mod codec;
pub mod collab;

pub use codec::node::Node;
pub use codec::state::{decode, encode, load, save, CodecError};
pub use collab::in_memory::{LogShipyard, NoticeLog, SimClock, SimSession, SimTargetService};
