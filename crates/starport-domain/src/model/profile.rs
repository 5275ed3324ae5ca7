//! Profile - A reusable mission template
//!
//! A Profile captures the parameters of a previously performed or planned
//! launch (cost, mass, duration, constraints) so the same flight can be
//! repeated later without re-recording it.

/// The variant of work a profile or mission is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionKind {
    /// Materialize a new entity from a stored template
    Deploy,
    /// Move resources and crew to an existing target entity
    Transport,
    /// Reserved; not yet supported
    Construct,
}

impl MissionKind {
    /// The persisted tag for this variant
    pub fn as_str(&self) -> &'static str {
        match self {
            MissionKind::Deploy => "DEPLOY",
            MissionKind::Transport => "TRANSPORT",
            MissionKind::Construct => "CONSTRUCT",
        }
    }

    /// Parse a persisted variant tag. Returns `None` for unknown tags;
    /// the codec turns that into its own error at the load boundary.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "DEPLOY" => Some(MissionKind::Deploy),
            "TRANSPORT" => Some(MissionKind::Transport),
            "CONSTRUCT" => Some(MissionKind::Construct),
            _ => None,
        }
    }
}

impl core::fmt::Display for MissionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile - a named, reusable mission template
///
/// `name` is the registry key. On insertion the registry treats whatever is
/// in `name` as a hint and replaces it with a unique key, so constructing a
/// Profile never fails and callers never pick final names themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Registry key (unique once inserted)
    pub name: String,
    /// Name of the vessel the profile was recorded from
    pub vessel_name: String,
    /// Which mission variant this template supports
    pub kind: MissionKind,
    /// Funds spent on the recorded launch
    pub launch_cost: f64,
    /// Total mass at launch
    pub launch_mass: f64,
    /// Deliverable payload mass
    pub payload_mass: f64,
    /// Lowest altitude the recorded flight can service
    pub min_altitude: f64,
    /// Highest altitude the recorded flight can service
    pub max_altitude: f64,
    /// Celestial body the profile applies to
    pub body_name: String,
    /// Seconds between mission creation and its due time
    pub mission_duration: f64,
    /// One-way flights leave the vessel at the destination
    pub one_way: bool,
    /// Seats available for crew transfers
    pub crew_capacity: u32,
    /// Docking port types available for rendezvous, absent if unrecorded
    pub docking_port_types: Option<Vec<String>>,
}

impl Profile {
    /// A minimal profile; callers fill in the recorded numbers they have.
    pub fn new(name_hint: impl Into<String>, kind: MissionKind) -> Self {
        Self {
            name: name_hint.into(),
            vessel_name: String::new(),
            kind,
            launch_cost: 0.0,
            launch_mass: 0.0,
            payload_mass: 0.0,
            min_altitude: 0.0,
            max_altitude: 0.0,
            body_name: String::new(),
            mission_duration: 0.0,
            one_way: false,
            crew_capacity: 0,
            docking_port_types: None,
        }
    }

    pub fn with_vessel_name(mut self, vessel_name: impl Into<String>) -> Self {
        self.vessel_name = vessel_name.into();
        self
    }

    pub fn with_body_name(mut self, body_name: impl Into<String>) -> Self {
        self.body_name = body_name.into();
        self
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.mission_duration = seconds;
        self
    }

    pub fn with_altitude_band(mut self, min: f64, max: f64) -> Self {
        self.min_altitude = min;
        self.max_altitude = max;
        self
    }

    pub fn with_crew_capacity(mut self, seats: u32) -> Self {
        self.crew_capacity = seats;
        self
    }

    pub fn with_docking_port_types(mut self, types: Vec<String>) -> Self {
        self.docking_port_types = Some(types);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags_round_trip() {
        for kind in [
            MissionKind::Deploy,
            MissionKind::Transport,
            MissionKind::Construct,
        ] {
            assert_eq!(MissionKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(MissionKind::parse("SALVAGE"), None);
    }

    #[test]
    fn test_builder_style_construction() {
        let profile = Profile::new("KSTS", MissionKind::Transport)
            .with_vessel_name("Cargo Lifter")
            .with_duration(600.0)
            .with_altitude_band(80_000.0, 120_000.0)
            .with_crew_capacity(3);

        assert_eq!(profile.name, "KSTS");
        assert_eq!(profile.vessel_name, "Cargo Lifter");
        assert_eq!(profile.mission_duration, 600.0);
        assert!(profile.docking_port_types.is_none());
    }
}
