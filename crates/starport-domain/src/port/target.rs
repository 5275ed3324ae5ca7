//! TargetService - External target resolution and mutation
//!
//! Lookup-by-id, validity checks, and the resource/crew transfer
//! primitives. Transfers are primitives the host guarantees; validity is
//! checked once per attempt before any of them run.

use crate::model::mission::EntityId;
use crate::model::profile::Profile;

/// Handle to a resolved target entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEntity {
    pub id: EntityId,
    pub name: String,
}

impl TargetEntity {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// External target entity service
pub trait TargetService {
    /// Resolve an entity by id; `None` if it no longer exists.
    fn resolve_by_id(&self, id: &EntityId) -> Option<TargetEntity>;

    /// Whether the entity is still a valid rendezvous target under the
    /// profile's constraints (altitude band, body, docking ports).
    fn is_valid_rendezvous(&self, entity: &TargetEntity, profile: &Profile) -> bool;

    fn transfer_resource(&mut self, entity: &TargetEntity, resource: &str, amount: f64);

    fn collect_crew(&mut self, entity: &TargetEntity, crew_name: &str);

    fn deliver_crew(&mut self, entity: &TargetEntity, crew_name: &str);
}
