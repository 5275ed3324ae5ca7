//! In-Memory Collaborator Implementations

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use starport_domain::model::mission::EntityId;
use starport_domain::model::profile::Profile;
use starport_domain::port::clock::Clock;
use starport_domain::port::notifier::Notifier;
use starport_domain::port::session::Session;
use starport_domain::port::shipyard::{BuildError, Shipyard};
use starport_domain::port::target::{TargetEntity, TargetService};

/// Settable sim clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SimClock {
    now: f64,
}

impl SimClock {
    pub fn starting_at(now: f64) -> Self {
        Self { now }
    }

    pub fn advance(&mut self, seconds: f64) {
        self.now += seconds;
    }

    pub fn set(&mut self, now: f64) {
        self.now = now;
    }
}

impl Clock for SimClock {
    fn now(&self) -> f64 {
        self.now
    }
}

/// What the shipyard was asked to build
#[derive(Debug, Clone, PartialEq)]
pub struct BuildRecord {
    pub entity: EntityId,
    pub template_reference: String,
    pub placement_hint: String,
    pub new_entity_name: String,
}

/// Shipyard that issues sequential entity ids and records every build.
///
/// `fail_next_with` scripts a one-shot failure, which is how tests and the
/// demo host exercise the BuildFailure path.
#[derive(Debug, Clone, Default)]
pub struct LogShipyard {
    built: Vec<BuildRecord>,
    next_id: u32,
    fail_next: Option<String>,
}

impl LogShipyard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_with(&mut self, reason: impl Into<String>) {
        self.fail_next = Some(reason.into());
    }

    pub fn built(&self) -> &[BuildRecord] {
        &self.built
    }
}

impl Shipyard for LogShipyard {
    fn materialize(
        &mut self,
        template_reference: &str,
        placement_hint: &str,
        new_entity_name: &str,
    ) -> Result<EntityId, BuildError> {
        if let Some(reason) = self.fail_next.take() {
            return Err(BuildError::new(reason));
        }
        self.next_id += 1;
        let entity = EntityId::new(format!("entity-{}", self.next_id));
        debug!(
            entity = entity.as_str(),
            template = template_reference,
            name = new_entity_name,
            "Materialized entity"
        );
        self.built.push(BuildRecord {
            entity: entity.clone(),
            template_reference: template_reference.to_string(),
            placement_hint: placement_hint.to_string(),
            new_entity_name: new_entity_name.to_string(),
        });
        Ok(entity)
    }
}

/// One entity known to the in-memory target service
#[derive(Debug, Clone, Default)]
pub struct SimEntity {
    pub name: String,
    pub valid_rendezvous: bool,
    pub resources: HashMap<String, f64>,
    pub crew: Vec<String>,
}

/// One recorded resource transfer: (entity id, resource, amount)
pub type TransferRecord = (String, String, f64);

/// Target service backed by a map of entities; records every transfer.
#[derive(Debug, Clone, Default)]
pub struct SimTargetService {
    entities: HashMap<String, SimEntity>,
    transfers: Vec<TransferRecord>,
}

impl SimTargetService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entity(&mut self, id: &EntityId, entity: SimEntity) {
        self.entities.insert(id.as_str().to_string(), entity);
    }

    pub fn entity(&self, id: &EntityId) -> Option<&SimEntity> {
        self.entities.get(id.as_str())
    }

    pub fn transfers(&self) -> &[TransferRecord] {
        &self.transfers
    }
}

impl TargetService for SimTargetService {
    fn resolve_by_id(&self, id: &EntityId) -> Option<TargetEntity> {
        self.entities
            .get(id.as_str())
            .map(|e| TargetEntity::new(id.clone(), e.name.clone()))
    }

    fn is_valid_rendezvous(&self, entity: &TargetEntity, _profile: &Profile) -> bool {
        self.entities
            .get(entity.id.as_str())
            .is_some_and(|e| e.valid_rendezvous)
    }

    fn transfer_resource(&mut self, entity: &TargetEntity, resource: &str, amount: f64) {
        if let Some(e) = self.entities.get_mut(entity.id.as_str()) {
            *e.resources.entry(resource.to_string()).or_insert(0.0) += amount;
        }
        self.transfers
            .push((entity.id.as_str().to_string(), resource.to_string(), amount));
    }

    fn collect_crew(&mut self, entity: &TargetEntity, crew_name: &str) {
        if let Some(e) = self.entities.get_mut(entity.id.as_str()) {
            e.crew.retain(|c| c != crew_name);
        }
    }

    fn deliver_crew(&mut self, entity: &TargetEntity, crew_name: &str) {
        if let Some(e) = self.entities.get_mut(entity.id.as_str()) {
            e.crew.push(crew_name.to_string());
        }
    }
}

/// Host session stand-in
#[derive(Debug, Clone, Default)]
pub struct SimSession {
    pub construction_blocked: bool,
    pub active: Option<EntityId>,
}

impl Session for SimSession {
    fn construction_blocked(&self) -> bool {
        self.construction_blocked
    }

    fn active_entity(&self) -> Option<EntityId> {
        self.active.clone()
    }
}

/// One recorded user notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub timestamp: String,
    pub message: String,
}

/// Bounded in-memory notice sink; oldest entries fall off the front.
#[derive(Debug, Clone)]
pub struct NoticeLog {
    notices: VecDeque<Notice>,
    max_entries: usize,
}

impl NoticeLog {
    pub fn new(max_entries: usize) -> Self {
        Self {
            notices: VecDeque::with_capacity(max_entries),
            max_entries,
        }
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

impl Default for NoticeLog {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Notifier for NoticeLog {
    fn post(&mut self, message: &str) {
        if self.notices.len() >= self.max_entries {
            self.notices.pop_front();
        }
        self.notices.push_back(Notice {
            timestamp: chrono::Utc::now().to_rfc3339(),
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_advances() {
        let mut clock = SimClock::starting_at(100.0);
        clock.advance(0.5);
        clock.advance(0.5);
        assert_eq!(clock.now(), 101.0);
    }

    #[test]
    fn test_shipyard_issues_sequential_ids_and_records_builds() {
        let mut yard = LogShipyard::new();
        let a = yard.materialize("Ships/A.craft", "orbit", "Alpha").unwrap();
        let b = yard.materialize("Ships/B.craft", "orbit", "Beta").unwrap();
        assert_eq!(a.as_str(), "entity-1");
        assert_eq!(b.as_str(), "entity-2");
        assert_eq!(yard.built().len(), 2);
        assert_eq!(yard.built()[1].new_entity_name, "Beta");
    }

    #[test]
    fn test_shipyard_scripted_failure_is_one_shot() {
        let mut yard = LogShipyard::new();
        yard.fail_next_with("no launch pad");
        assert!(yard.materialize("t", "p", "n").is_err());
        assert!(yard.materialize("t", "p", "n").is_ok());
    }

    #[test]
    fn test_target_service_applies_transfers() {
        let mut targets = SimTargetService::new();
        let id = EntityId::new("station-1");
        targets.add_entity(
            &id,
            SimEntity {
                name: "Station".to_string(),
                valid_rendezvous: true,
                crew: vec!["Val".to_string()],
                ..SimEntity::default()
            },
        );

        let entity = targets.resolve_by_id(&id).unwrap();
        targets.transfer_resource(&entity, "Food", 50.0);
        targets.transfer_resource(&entity, "Food", 25.0);
        targets.collect_crew(&entity, "Val");
        targets.deliver_crew(&entity, "Bob");

        let state = targets.entity(&id).unwrap();
        assert_eq!(state.resources["Food"], 75.0);
        assert_eq!(state.crew, vec!["Bob".to_string()]);
        assert_eq!(targets.transfers().len(), 2);
    }

    #[test]
    fn test_notice_log_is_bounded() {
        let mut log = NoticeLog::new(2);
        log.post("one");
        log.post("two");
        log.post("three");
        assert_eq!(log.len(), 2);
        let messages: Vec<&str> = log.notices().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }
}
