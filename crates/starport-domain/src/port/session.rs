//! Session - Host state the sweep must respect

use crate::model::mission::EntityId;

/// A view of the host session used to decide whether an attempt is safe
/// right now. Both checks gate with "not yet" (Deferred), never with
/// failure.
pub trait Session {
    /// True while materializing a new entity is unsafe (an active flight
    /// session, a scene transition, and so on).
    fn construction_blocked(&self) -> bool;

    /// The entity the player currently controls, if any. Transfers against
    /// a live target are deferred.
    fn active_entity(&self) -> Option<EntityId>;
}
