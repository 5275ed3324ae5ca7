//! Schedule persistence - MissionSchedule to Node and back
//!
//! Two top-level sections, `profiles` and `missions`, one child per entry,
//! field names matching the data model. Collections are encoded as child
//! nodes so that "absent" (no child node) and "present but empty" (an empty
//! child node) survive a round-trip; downstream logic branches on presence.
//!
//! Loading fully replaces in-memory state: `decode` builds a complete
//! schedule and the host assigns it over the old one. There is no merge.

use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use shared::StarportError;
use starport_domain::model::mission::{EntityId, Mission, MissionPayload};
use starport_domain::model::profile::{MissionKind, Profile};
use starport_domain::registry::ProfileRegistry;
use starport_domain::service::schedule::MissionSchedule;

use super::node::{Node, NodeParseError};

/// Errors while mapping between a schedule and its node form
#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Parse(#[from] NodeParseError),

    #[error("missing section '{0}'")]
    MissingSection(&'static str),

    #[error("missing field '{field}' in '{node}' node")]
    MissingField {
        node: &'static str,
        field: &'static str,
    },

    #[error("invalid value '{value}' for field '{field}'")]
    InvalidValue { field: &'static str, value: String },

    #[error("unknown mission variant '{0}'")]
    UnknownVariant(String),
}

impl From<CodecError> for StarportError {
    fn from(e: CodecError) -> Self {
        StarportError::Codec(e.to_string())
    }
}

/// Serialize a schedule into its node form.
pub fn encode(schedule: &MissionSchedule) -> Node {
    let mut root = Node::new("root");

    let mut profiles = Node::new("profiles");
    for profile in schedule.profiles().iter() {
        profiles.add_child(encode_profile(profile));
    }
    root.add_child(profiles);

    let mut missions = Node::new("missions");
    for mission in schedule.missions() {
        missions.add_child(encode_mission(mission));
    }
    root.add_child(missions);

    root
}

/// Rebuild a schedule from its node form.
pub fn decode(root: &Node) -> Result<MissionSchedule, CodecError> {
    let profiles_node = root
        .child("profiles")
        .ok_or(CodecError::MissingSection("profiles"))?;
    let mut registry = ProfileRegistry::new();
    for node in profiles_node.children_named("profile") {
        registry.restore(decode_profile(node)?);
    }

    let missions_node = root
        .child("missions")
        .ok_or(CodecError::MissingSection("missions"))?;
    let mut missions = Vec::new();
    for node in missions_node.children_named("mission") {
        missions.push(decode_mission(node)?);
    }

    Ok(MissionSchedule::from_parts(registry, missions))
}

/// Write the schedule to a file in the node text form.
pub fn save(schedule: &MissionSchedule, path: &Path) -> shared::Result<()> {
    let text = encode(schedule).to_text();
    std::fs::write(path, text)?;
    debug!(
        path = %path.display(),
        profiles = schedule.profiles().len(),
        missions = schedule.missions().len(),
        "Schedule saved"
    );
    Ok(())
}

/// Read a schedule back from a file written by `save`.
pub fn load(path: &Path) -> shared::Result<MissionSchedule> {
    let text = std::fs::read_to_string(path)?;
    let root = Node::parse(&text).map_err(CodecError::from)?;
    let schedule = decode(&root)?;
    debug!(
        path = %path.display(),
        profiles = schedule.profiles().len(),
        missions = schedule.missions().len(),
        "Schedule loaded"
    );
    Ok(schedule)
}

fn encode_profile(profile: &Profile) -> Node {
    let mut node = Node::new("profile");
    node.add_value("profileName", &profile.name);
    node.add_value("vesselName", &profile.vessel_name);
    node.add_value("missionVariant", profile.kind.as_str());
    node.add_value("launchCost", profile.launch_cost.to_string());
    node.add_value("launchMass", profile.launch_mass.to_string());
    node.add_value("payloadMass", profile.payload_mass.to_string());
    node.add_value("minAltitude", profile.min_altitude.to_string());
    node.add_value("maxAltitude", profile.max_altitude.to_string());
    node.add_value("bodyName", &profile.body_name);
    node.add_value("missionDuration", profile.mission_duration.to_string());
    node.add_value("oneWayMission", profile.one_way.to_string());
    node.add_value("crewCapacity", profile.crew_capacity.to_string());
    if let Some(types) = &profile.docking_port_types {
        let mut ports = Node::new("dockingPortTypes");
        for port_type in types {
            ports.add_value("portType", port_type);
        }
        node.add_child(ports);
    }
    node
}

fn decode_profile(node: &Node) -> Result<Profile, CodecError> {
    let tag = get(node, "profile", "missionVariant")?;
    let kind = MissionKind::parse(tag).ok_or_else(|| CodecError::UnknownVariant(tag.to_string()))?;

    Ok(Profile {
        name: get(node, "profile", "profileName")?.to_string(),
        vessel_name: get(node, "profile", "vesselName")?.to_string(),
        kind,
        launch_cost: get_f64(node, "profile", "launchCost")?,
        launch_mass: get_f64(node, "profile", "launchMass")?,
        payload_mass: get_f64(node, "profile", "payloadMass")?,
        min_altitude: get_f64(node, "profile", "minAltitude")?,
        max_altitude: get_f64(node, "profile", "maxAltitude")?,
        body_name: get(node, "profile", "bodyName")?.to_string(),
        mission_duration: get_f64(node, "profile", "missionDuration")?,
        one_way: get_bool(node, "profile", "oneWayMission")?,
        crew_capacity: get_u32(node, "profile", "crewCapacity")?,
        docking_port_types: node
            .child("dockingPortTypes")
            .map(|n| n.values_of("portType").map(str::to_string).collect()),
    })
}

fn encode_mission(mission: &Mission) -> Node {
    let mut node = Node::new("mission");
    node.add_value("missionVariant", mission.kind().as_str());
    node.add_value("dueTime", mission.due_time().to_string());
    node.add_value("profileName", mission.profile_name());

    match mission.payload() {
        MissionPayload::Deploy {
            template_reference,
            placement_hint,
            new_entity_name,
        } => {
            node.add_value("templateReference", template_reference);
            node.add_value("placementHint", placement_hint);
            node.add_value("newEntityName", new_entity_name);
        }
        MissionPayload::Transport {
            target,
            resources_to_deliver,
            crew_to_deliver,
            crew_to_collect,
        } => {
            node.add_value("targetEntityId", target.as_str());
            if let Some(resources) = resources_to_deliver {
                let mut child = Node::new("resourcesToDeliver");
                for (resource, amount) in resources {
                    child.add_value(resource, amount.to_string());
                }
                node.add_child(child);
            }
            if let Some(crew) = crew_to_deliver {
                node.add_child(encode_crew("crewToDeliver", crew));
            }
            if let Some(crew) = crew_to_collect {
                node.add_child(encode_crew("crewToCollect", crew));
            }
        }
        MissionPayload::Construct => {}
    }
    node
}

fn encode_crew(name: &str, crew: &[String]) -> Node {
    let mut node = Node::new(name);
    for member in crew {
        node.add_value("crew", member);
    }
    node
}

fn decode_mission(node: &Node) -> Result<Mission, CodecError> {
    let tag = get(node, "mission", "missionVariant")?;
    let kind = MissionKind::parse(tag).ok_or_else(|| CodecError::UnknownVariant(tag.to_string()))?;
    let due_time = get_f64(node, "mission", "dueTime")?;
    let profile_name = get(node, "mission", "profileName")?.to_string();

    let payload = match kind {
        MissionKind::Deploy => MissionPayload::Deploy {
            template_reference: get(node, "mission", "templateReference")?.to_string(),
            placement_hint: get(node, "mission", "placementHint")?.to_string(),
            new_entity_name: get(node, "mission", "newEntityName")?.to_string(),
        },
        MissionKind::Transport => {
            let target = EntityId::new(get(node, "mission", "targetEntityId")?);
            let resources_to_deliver = node
                .child("resourcesToDeliver")
                .map(|n| {
                    let mut map = BTreeMap::new();
                    for (resource, raw) in n.values() {
                        let amount = raw.parse::<f64>().map_err(|_| CodecError::InvalidValue {
                            field: "resourcesToDeliver",
                            value: raw.clone(),
                        })?;
                        map.insert(resource.clone(), amount);
                    }
                    Ok::<_, CodecError>(map)
                })
                .transpose()?;
            MissionPayload::Transport {
                target,
                resources_to_deliver,
                crew_to_deliver: decode_crew(node, "crewToDeliver"),
                crew_to_collect: decode_crew(node, "crewToCollect"),
            }
        }
        MissionKind::Construct => MissionPayload::Construct,
    };

    Ok(Mission::restore(due_time, profile_name, payload))
}

fn decode_crew(node: &Node, name: &str) -> Option<Vec<String>> {
    node.child(name)
        .map(|n| n.values_of("crew").map(str::to_string).collect())
}

fn get<'a>(
    node: &'a Node,
    node_name: &'static str,
    field: &'static str,
) -> Result<&'a str, CodecError> {
    node.value(field).ok_or(CodecError::MissingField {
        node: node_name,
        field,
    })
}

fn get_f64(node: &Node, node_name: &'static str, field: &'static str) -> Result<f64, CodecError> {
    let raw = get(node, node_name, field)?;
    raw.parse().map_err(|_| CodecError::InvalidValue {
        field,
        value: raw.to_string(),
    })
}

fn get_u32(node: &Node, node_name: &'static str, field: &'static str) -> Result<u32, CodecError> {
    let raw = get(node, node_name, field)?;
    raw.parse().map_err(|_| CodecError::InvalidValue {
        field,
        value: raw.to_string(),
    })
}

fn get_bool(node: &Node, node_name: &'static str, field: &'static str) -> Result<bool, CodecError> {
    let raw = get(node, node_name, field)?;
    raw.parse().map_err(|_| CodecError::InvalidValue {
        field,
        value: raw.to_string(),
    })
}
