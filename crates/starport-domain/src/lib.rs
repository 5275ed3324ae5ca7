//! # Starport Domain Layer
//!
//! Deferred mission scheduling, pure and dependency-free.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                    │
//! │  ┌────────────────────────────────────────────────────────────┐ │
//! │  │  model/    - Profile, Mission, transfer orders             │ │
//! │  │  registry/ - Uniquely-keyed profile catalog                │ │
//! │  │  port/     - Collaborator traits (not implementations)    │ │
//! │  │  service/  - MissionSchedule and the timer sweep           │ │
//! │  └────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The schedule never constructs or mutates host objects itself; it decides
//! *when* and *whether* to invoke the collaborators behind the ports and what
//! to do with the outcome.

pub mod model;
pub mod port;
pub mod registry;
pub mod service;

// Re-export commonly used types
pub use model::{
    mission::{EntityId, Mission, MissionPayload, OrderError, TransferDirection, TransferOrder},
    profile::{MissionKind, Profile},
};

pub use port::{
    clock::Clock,
    notifier::{Notifier, NullNotifier},
    session::Session,
    shipyard::{BuildError, NoopPostBuild, PostBuildHook, Shipyard},
    target::{TargetEntity, TargetService},
};

pub use registry::ProfileRegistry;

pub use service::schedule::{
    Collaborators, ExecutionError, MissionOutcome, MissionSchedule, SweepEvent, SweepReport,
};
