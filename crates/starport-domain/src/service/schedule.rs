//! MissionSchedule - The scheduler context and its timer sweep
//!
//! One `MissionSchedule` owns the profile registry and the pending mission
//! list for a host session; it is created on session load and replaced
//! wholesale when a save is restored. The host heartbeat calls `sweep` once
//! per tick (nominally every second of sim time).
//!
//! The sweep itself does no I/O and holds no host references; everything it
//! needs arrives through the `Collaborators` bundle, and everything that
//! happened leaves as `SweepEvent` values for the host to log.

use crate::model::mission::{EntityId, Mission, MissionPayload};
use crate::model::profile::{MissionKind, Profile};
use crate::port::clock::Clock;
use crate::port::notifier::Notifier;
use crate::port::session::Session;
use crate::port::shipyard::{PostBuildHook, Shipyard};
use crate::port::target::TargetService;
use crate::registry::ProfileRegistry;

/// Everything a sweep is allowed to touch, borrowed for one call
pub struct Collaborators<'a> {
    pub clock: &'a dyn Clock,
    pub session: &'a dyn Session,
    pub shipyard: &'a mut dyn Shipyard,
    pub post_build: &'a mut dyn PostBuildHook,
    pub targets: &'a mut dyn TargetService,
    pub notifier: &'a mut dyn Notifier,
}

/// Result of attempting one due mission
#[derive(Debug, Clone, PartialEq)]
pub enum MissionOutcome {
    /// Done; remove the mission.
    Completed,
    /// Precondition not currently satisfiable; keep the mission and try
    /// again on the next due tick.
    Deferred,
    /// Unrecoverable; remove the mission rather than fail every tick.
    Failed(ExecutionError),
}

/// Errors that consume a mission at execution time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// The referenced profile no longer exists.
    MissingProfile { name: String },
    /// CONSTRUCT, which this core does not support.
    UnsupportedVariant { kind: MissionKind },
    /// The builder reported a failure while materializing a template.
    BuildFailure { reason: String },
}

impl core::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ExecutionError::MissingProfile { name } => {
                write!(f, "Mission profile '{}' no longer exists", name)
            }
            ExecutionError::UnsupportedVariant { kind } => {
                write!(f, "Mission variant {} is not yet supported", kind)
            }
            ExecutionError::BuildFailure { reason } => {
                write!(f, "Construction failed: {}", reason)
            }
        }
    }
}

impl std::error::Error for ExecutionError {}

/// What happened during a sweep
///
/// The sweep does not act on these; the host logs them, feeds metrics, or
/// updates a UI.
#[derive(Debug, Clone, PartialEq)]
pub enum SweepEvent {
    /// A deployment materialized a new entity.
    DeploymentCompleted {
        profile_name: String,
        new_entity_name: String,
        entity: EntityId,
    },
    /// A transport delivered everything it carried.
    TransportCompleted {
        profile_name: String,
        target: EntityId,
    },
    /// A transport was consumed without running (target gone or invalid).
    TransportAborted {
        profile_name: String,
        target: EntityId,
        reason: String,
    },
    /// A due mission stays in the list for the next tick.
    MissionDeferred {
        kind: MissionKind,
        profile_name: String,
    },
    /// A due mission was removed because execution failed.
    MissionFailed {
        kind: MissionKind,
        profile_name: String,
        error: ExecutionError,
    },
}

impl core::fmt::Display for SweepEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SweepEvent::DeploymentCompleted {
                profile_name,
                new_entity_name,
                entity,
            } => write!(
                f,
                "Deployed '{}' as {} (profile '{}')",
                new_entity_name, entity, profile_name
            ),
            SweepEvent::TransportCompleted {
                profile_name,
                target,
            } => write!(f, "Transport to {} completed (profile '{}')", target, profile_name),
            SweepEvent::TransportAborted {
                profile_name,
                target,
                reason,
            } => write!(
                f,
                "Transport to {} aborted (profile '{}'): {}",
                target, profile_name, reason
            ),
            SweepEvent::MissionDeferred { kind, profile_name } => {
                write!(f, "{} mission deferred (profile '{}')", kind, profile_name)
            }
            SweepEvent::MissionFailed {
                kind,
                profile_name,
                error,
            } => write!(
                f,
                "{} mission failed (profile '{}'): {}",
                kind, profile_name, error
            ),
        }
    }
}

/// Summary of one sweep
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SweepReport {
    /// Clock snapshot the due-set was selected against
    pub now: f64,
    pub completed: usize,
    pub deferred: usize,
    pub failed: usize,
    pub events: Vec<SweepEvent>,
}

impl SweepReport {
    fn new(now: f64) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }
}

/// The scheduler context: profile registry plus pending mission list
///
/// All shared mutable state of the core lives here, behind one owner, so a
/// host that manages profiles from a UI thread has a single thing to
/// serialize access to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MissionSchedule {
    profiles: ProfileRegistry,
    missions: Vec<Mission>,
}

impl MissionSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a schedule from persisted parts; loading replaces state, it
    /// never merges.
    pub fn from_parts(profiles: ProfileRegistry, missions: Vec<Mission>) -> Self {
        Self { profiles, missions }
    }

    pub fn profiles(&self) -> &ProfileRegistry {
        &self.profiles
    }

    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    /// Insert a profile under a unique key (see `ProfileRegistry::add`).
    pub fn create_profile(&mut self, profile: Profile) -> String {
        self.profiles.add(profile)
    }

    /// Delete a profile and cancel every mission that references it.
    ///
    /// Missions are removed first, then the registry entry; the notifier is
    /// told how many missions were cancelled. Returns that count.
    pub fn delete_profile(&mut self, name: &str, notifier: &mut dyn Notifier) -> usize {
        let before = self.missions.len();
        self.missions.retain(|m| m.profile_name() != name);
        let cancelled = before - self.missions.len();

        let existed = self.profiles.remove(name).is_some();
        if existed || cancelled > 0 {
            notifier.post(&format!(
                "Mission profile '{}' deleted, cancelled {} missions",
                name, cancelled
            ));
        }
        cancelled
    }

    /// Rename a profile and cascade the new key into every mission that
    /// referenced the old one. Returns the new key, or `None` if the old
    /// key was absent.
    pub fn rename_profile(&mut self, old_name: &str, new_hint: &str) -> Option<String> {
        let new_name = self.profiles.rename(old_name, new_hint)?;
        for mission in &mut self.missions {
            if mission.profile_name() == old_name {
                mission.set_profile_name(new_name.clone());
            }
        }
        Some(new_name)
    }

    /// Append a mission. Among simultaneously-due missions the sweep keeps
    /// this insertion order.
    pub fn add_mission(&mut self, mission: Mission) {
        self.missions.push(mission);
    }

    /// One timer sweep.
    ///
    /// Snapshots `now`, attempts every due mission in list order, each
    /// inside its own failure boundary, and removes the ones that completed
    /// or failed. Deferred missions stay untouched.
    pub fn sweep(&mut self, collab: &mut Collaborators<'_>) -> SweepReport {
        let now = collab.clock.now();
        let mut report = SweepReport::new(now);

        let pending = std::mem::take(&mut self.missions);
        let mut kept = Vec::with_capacity(pending.len());

        for mission in pending {
            if !mission.is_due(now) {
                kept.push(mission);
                continue;
            }
            match self.attempt(&mission, collab, &mut report) {
                MissionOutcome::Completed => {
                    report.completed += 1;
                }
                MissionOutcome::Deferred => {
                    report.deferred += 1;
                    report.events.push(SweepEvent::MissionDeferred {
                        kind: mission.kind(),
                        profile_name: mission.profile_name().to_string(),
                    });
                    kept.push(mission);
                }
                MissionOutcome::Failed(error) => {
                    report.failed += 1;
                    collab.notifier.post(&format!(
                        "Mission cancelled (profile '{}'): {}",
                        mission.profile_name(),
                        error
                    ));
                    report.events.push(SweepEvent::MissionFailed {
                        kind: mission.kind(),
                        profile_name: mission.profile_name().to_string(),
                        error,
                    });
                }
            }
        }

        self.missions = kept;
        report
    }

    fn attempt(
        &self,
        mission: &Mission,
        collab: &mut Collaborators<'_>,
        report: &mut SweepReport,
    ) -> MissionOutcome {
        match mission.payload() {
            MissionPayload::Deploy {
                template_reference,
                placement_hint,
                new_entity_name,
            } => {
                if collab.session.construction_blocked() {
                    return MissionOutcome::Deferred;
                }
                match collab
                    .shipyard
                    .materialize(template_reference, placement_hint, new_entity_name)
                {
                    Ok(entity) => {
                        collab.post_build.after_build(&entity);
                        report.events.push(SweepEvent::DeploymentCompleted {
                            profile_name: mission.profile_name().to_string(),
                            new_entity_name: new_entity_name.clone(),
                            entity,
                        });
                        MissionOutcome::Completed
                    }
                    Err(e) => MissionOutcome::Failed(ExecutionError::BuildFailure {
                        reason: e.reason,
                    }),
                }
            }

            MissionPayload::Transport {
                target,
                resources_to_deliver,
                crew_to_deliver,
                crew_to_collect,
            } => {
                // Transfers against the entity the player is flying are
                // unsafe; wait for the next tick it is due.
                if collab.session.active_entity().as_ref() == Some(target) {
                    return MissionOutcome::Deferred;
                }

                let Some(profile) = self.profiles.get(mission.profile_name()) else {
                    return MissionOutcome::Failed(ExecutionError::MissingProfile {
                        name: mission.profile_name().to_string(),
                    });
                };

                let entity = match collab.targets.resolve_by_id(target) {
                    Some(entity) => entity,
                    None => {
                        return self.abort_transport(
                            mission,
                            target,
                            "target could not be resolved",
                            collab,
                            report,
                        );
                    }
                };
                if !collab.targets.is_valid_rendezvous(&entity, profile) {
                    return self.abort_transport(
                        mission,
                        target,
                        "target is no longer a valid rendezvous",
                        collab,
                        report,
                    );
                }

                if let Some(resources) = resources_to_deliver {
                    for (resource, amount) in resources {
                        collab.targets.transfer_resource(&entity, resource, *amount);
                    }
                }
                if let Some(crew) = crew_to_collect {
                    for name in crew {
                        collab.targets.collect_crew(&entity, name);
                    }
                }
                if let Some(crew) = crew_to_deliver {
                    for name in crew {
                        collab.targets.deliver_crew(&entity, name);
                    }
                }

                report.events.push(SweepEvent::TransportCompleted {
                    profile_name: mission.profile_name().to_string(),
                    target: target.clone(),
                });
                MissionOutcome::Completed
            }

            MissionPayload::Construct => {
                MissionOutcome::Failed(ExecutionError::UnsupportedVariant {
                    kind: MissionKind::Construct,
                })
            }
        }
    }

    /// An aborted transport is consumed, not retried: post the notice,
    /// record the event, report Completed so the sweep removes it.
    fn abort_transport(
        &self,
        mission: &Mission,
        target: &EntityId,
        reason: &str,
        collab: &mut Collaborators<'_>,
        report: &mut SweepReport,
    ) -> MissionOutcome {
        collab.notifier.post(&format!(
            "Transport to {} aborted: {}",
            target, reason
        ));
        report.events.push(SweepEvent::TransportAborted {
            profile_name: mission.profile_name().to_string(),
            target: target.clone(),
            reason: reason.to_string(),
        });
        MissionOutcome::Completed
    }
}
