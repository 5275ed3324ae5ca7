//! Mission - One scheduled unit of deferred work
//!
//! A Mission is created once by the factory constructors below, lives in the
//! schedule's list until its due time elapses, and is removed exactly once.
//! It is never mutated after creation (the profile-rename cascade is the one
//! exception, and it only rewrites the foreign key).

use std::collections::BTreeMap;

use super::profile::{MissionKind, Profile};

/// Opaque identifier for an entity managed by the target service
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for EntityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which way a crew member moves during a transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDirection {
    /// Crew boards the target entity
    Deliver,
    /// Crew is recovered from the target entity
    Collect,
}

/// One crew movement requested for a transport mission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOrder {
    pub crew_name: String,
    pub direction: TransferDirection,
}

impl TransferOrder {
    pub fn new(crew_name: impl Into<String>, direction: TransferDirection) -> Self {
        Self {
            crew_name: crew_name.into(),
            direction,
        }
    }

    /// Parse an order from a raw direction tag.
    ///
    /// This is the construction-time boundary where a direction is still a
    /// string; unknown tags fail here, synchronously, never during a sweep.
    pub fn parse(crew_name: &str, direction_tag: &str) -> Result<Self, OrderError> {
        let direction = match direction_tag.to_ascii_uppercase().as_str() {
            "DELIVER" => TransferDirection::Deliver,
            "COLLECT" => TransferDirection::Collect,
            _ => {
                return Err(OrderError::UnknownDirection {
                    tag: direction_tag.to_string(),
                })
            }
        };
        Ok(Self::new(crew_name, direction))
    }
}

/// Errors raised while assembling transfer orders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    UnknownDirection { tag: String },
}

impl core::fmt::Display for OrderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OrderError::UnknownDirection { tag } => {
                write!(f, "Unknown transfer direction: '{}'", tag)
            }
        }
    }
}

impl std::error::Error for OrderError {}

/// Variant-specific mission payload
///
/// For transports, `None` and `Some(empty)` mean different things downstream
/// (display and execution branch on presence), so the factory only ever
/// produces `None` for empty collections and persistence keeps the
/// distinction intact.
#[derive(Debug, Clone, PartialEq)]
pub enum MissionPayload {
    Deploy {
        /// Sanitized template path, safe for the persisted node format
        template_reference: String,
        /// Opaque orbit descriptor handed through to the shipyard
        placement_hint: String,
        new_entity_name: String,
    },
    Transport {
        target: EntityId,
        resources_to_deliver: Option<BTreeMap<String, f64>>,
        crew_to_deliver: Option<Vec<String>>,
        crew_to_collect: Option<Vec<String>>,
    },
    /// Reserved variant; only representable (e.g. loaded from a newer save),
    /// never creatable through the factory, always rejected at execution.
    Construct,
}

impl MissionPayload {
    pub fn kind(&self) -> MissionKind {
        match self {
            MissionPayload::Deploy { .. } => MissionKind::Deploy,
            MissionPayload::Transport { .. } => MissionKind::Transport,
            MissionPayload::Construct => MissionKind::Construct,
        }
    }
}

/// Mission - one due-time-gated unit of deferred work
///
/// Missions carry no identifier of their own; identity is list membership,
/// and cascade operations match on `profile_name`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mission {
    due_time: f64,
    profile_name: String,
    payload: MissionPayload,
}

impl Mission {
    /// Factory: a deployment mission from a stored template.
    ///
    /// Due at `now + profile.mission_duration`. The template reference is
    /// sanitized here so it can never carry the `//` comment marker into the
    /// persisted node format.
    pub fn deployment(
        new_entity_name: impl Into<String>,
        template_reference: &str,
        placement_hint: impl Into<String>,
        profile: &Profile,
        now: f64,
    ) -> Self {
        Self {
            due_time: now + profile.mission_duration,
            profile_name: profile.name.clone(),
            payload: MissionPayload::Deploy {
                template_reference: sanitize_template_reference(template_reference),
                placement_hint: placement_hint.into(),
                new_entity_name: new_entity_name.into(),
            },
        }
    }

    /// Factory: a transport mission against an existing target.
    ///
    /// Resource amounts that are not strictly positive are dropped; a
    /// delivery map left empty after filtering is absent, not empty. Orders
    /// are partitioned by direction, with each sequence absent if no order
    /// points that way.
    pub fn transport(
        target: EntityId,
        profile: &Profile,
        resources: &[(String, f64)],
        orders: &[TransferOrder],
        now: f64,
    ) -> Self {
        let mut deliveries: BTreeMap<String, f64> = BTreeMap::new();
        for (name, amount) in resources {
            if *amount > 0.0 {
                deliveries.insert(name.clone(), *amount);
            }
        }

        let mut crew_to_deliver = Vec::new();
        let mut crew_to_collect = Vec::new();
        for order in orders {
            match order.direction {
                TransferDirection::Deliver => crew_to_deliver.push(order.crew_name.clone()),
                TransferDirection::Collect => crew_to_collect.push(order.crew_name.clone()),
            }
        }

        Self {
            due_time: now + profile.mission_duration,
            profile_name: profile.name.clone(),
            payload: MissionPayload::Transport {
                target,
                resources_to_deliver: if deliveries.is_empty() {
                    None
                } else {
                    Some(deliveries)
                },
                crew_to_deliver: if crew_to_deliver.is_empty() {
                    None
                } else {
                    Some(crew_to_deliver)
                },
                crew_to_collect: if crew_to_collect.is_empty() {
                    None
                } else {
                    Some(crew_to_collect)
                },
            },
        }
    }

    /// Rebuild a mission from persisted parts. The codec is the only
    /// expected caller; saved payloads are trusted as already sanitized.
    pub fn restore(due_time: f64, profile_name: impl Into<String>, payload: MissionPayload) -> Self {
        Self {
            due_time,
            profile_name: profile_name.into(),
            payload,
        }
    }

    pub fn kind(&self) -> MissionKind {
        self.payload.kind()
    }

    pub fn due_time(&self) -> f64 {
        self.due_time
    }

    pub fn is_due(&self, now: f64) -> bool {
        self.due_time <= now
    }

    /// Foreign key into the profile registry; only checked at execution.
    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    pub fn payload(&self) -> &MissionPayload {
        &self.payload
    }

    /// Profile-rename cascade support; not exposed outside the crate.
    pub(crate) fn set_profile_name(&mut self, profile_name: String) {
        self.profile_name = profile_name;
    }
}

/// Collapse backslashes to forward slashes and runs of slashes to a single
/// one. The persisted node format treats `//` as a comment marker, so a raw
/// path must never reach it.
pub fn sanitize_template_reference(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_slash = false;
    for c in raw.chars() {
        let c = if c == '\\' { '/' } else { c };
        if c == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(duration: f64) -> Profile {
        Profile::new("Ferry", MissionKind::Transport).with_duration(duration)
    }

    #[test]
    fn test_sanitize_template_reference() {
        assert_eq!(
            sanitize_template_reference(r"Ships\VAB\Cargo Lifter.craft"),
            "Ships/VAB/Cargo Lifter.craft"
        );
        assert_eq!(
            sanitize_template_reference("Ships//VAB///Probe.craft"),
            "Ships/VAB/Probe.craft"
        );
        assert_eq!(
            sanitize_template_reference(r"Ships\//VAB\Probe.craft"),
            "Ships/VAB/Probe.craft"
        );
    }

    #[test]
    fn test_deployment_due_time_comes_from_profile() {
        let mission = Mission::deployment(
            "Relay 1",
            "Ships/VAB/Relay.craft",
            "80000x80000@0.0",
            &profile(600.0),
            1_000.0,
        );
        assert_eq!(mission.due_time(), 1_600.0);
        assert_eq!(mission.kind(), MissionKind::Deploy);
        assert!(!mission.is_due(1_599.9));
        assert!(mission.is_due(1_600.0));
    }

    #[test]
    fn test_transport_filters_non_positive_resources() {
        let resources = vec![
            ("Food".to_string(), 50.0),
            ("Oxygen".to_string(), 0.0),
            ("Water".to_string(), -3.0),
        ];
        let mission = Mission::transport(
            EntityId::new("station-1"),
            &profile(60.0),
            &resources,
            &[],
            0.0,
        );

        let MissionPayload::Transport {
            resources_to_deliver,
            crew_to_deliver,
            crew_to_collect,
            ..
        } = mission.payload()
        else {
            panic!("expected transport payload");
        };
        let deliveries = resources_to_deliver.as_ref().unwrap();
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries["Food"], 50.0);
        assert!(crew_to_deliver.is_none());
        assert!(crew_to_collect.is_none());
    }

    #[test]
    fn test_transport_with_only_filtered_resources_has_absent_map() {
        let resources = vec![("Ore".to_string(), 0.0)];
        let mission = Mission::transport(
            EntityId::new("station-1"),
            &profile(60.0),
            &resources,
            &[],
            0.0,
        );
        let MissionPayload::Transport {
            resources_to_deliver,
            ..
        } = mission.payload()
        else {
            panic!("expected transport payload");
        };
        assert!(resources_to_deliver.is_none());
    }

    #[test]
    fn test_transport_partitions_crew_orders() {
        let orders = vec![
            TransferOrder::new("Bob", TransferDirection::Deliver),
            TransferOrder::new("Val", TransferDirection::Collect),
            TransferOrder::new("Bill", TransferDirection::Deliver),
        ];
        let mission =
            Mission::transport(EntityId::new("station-1"), &profile(60.0), &[], &orders, 0.0);

        let MissionPayload::Transport {
            crew_to_deliver,
            crew_to_collect,
            resources_to_deliver,
            ..
        } = mission.payload()
        else {
            panic!("expected transport payload");
        };
        assert_eq!(
            crew_to_deliver.as_deref(),
            Some(&["Bob".to_string(), "Bill".to_string()][..])
        );
        assert_eq!(crew_to_collect.as_deref(), Some(&["Val".to_string()][..]));
        assert!(resources_to_deliver.is_none());
    }

    #[test]
    fn test_order_parse_rejects_unknown_direction() {
        let order = TransferOrder::parse("Bob", "deliver").unwrap();
        assert_eq!(order.direction, TransferDirection::Deliver);

        let err = TransferOrder::parse("Bob", "TELEPORT").unwrap_err();
        assert_eq!(
            err,
            OrderError::UnknownDirection {
                tag: "TELEPORT".to_string()
            }
        );
    }
}
