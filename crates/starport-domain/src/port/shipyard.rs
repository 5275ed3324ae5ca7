//! Shipyard - External builder service
//!
//! Turns a template reference plus placement parameters into a materialized
//! entity. The schedule only decides when to call it; construction details
//! stay on the other side of this port.

use crate::model::mission::EntityId;

/// Failure reported by the builder while materializing a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildError {
    pub reason: String,
}

impl BuildError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl core::fmt::Display for BuildError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Build failed: {}", self.reason)
    }
}

impl std::error::Error for BuildError {}

/// External builder service
pub trait Shipyard {
    fn materialize(
        &mut self,
        template_reference: &str,
        placement_hint: &str,
        new_entity_name: &str,
    ) -> Result<EntityId, BuildError>;
}

/// Hook invoked with each freshly materialized entity.
///
/// Hosts that need to adjust unrelated state after a build (optional
/// third-party attributes, bookkeeping) plug in here instead of patching
/// the sweep.
pub trait PostBuildHook {
    fn after_build(&mut self, entity: &EntityId);
}

/// Default hook that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPostBuild;

impl PostBuildHook for NoopPostBuild {
    fn after_build(&mut self, _entity: &EntityId) {}
}
