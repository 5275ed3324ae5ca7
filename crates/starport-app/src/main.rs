//! # Starport - Deferred mission scheduling demo host
//!
//! This binary wires the domain schedule to the in-memory collaborators and
//! runs a short simulated session: record profiles, queue missions, tick the
//! sweep until everything due has run, then persist and restore the schedule.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  main.rs (this file) - Dependency Injection & Wiring            │
//! │    ├── Creates: SimClock / SimSession / SimTargetService        │
//! │    ├── Creates: LogShipyard / NoticeLog (adapters)              │
//! │    ├── Creates: MissionSchedule (domain)                        │
//! │    └── Runs: the heartbeat loop calling sweep()                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use shared::SessionConfig;
use starport_adapter::codec;
use starport_adapter::{LogShipyard, NoticeLog, SimClock, SimSession, SimTargetService};
use starport_adapter::collab::in_memory::SimEntity;
use starport_domain::{
    Collaborators, EntityId, Mission, MissionKind, MissionSchedule, NoopPostBuild, Profile,
    ProfileRegistry, TransferOrder,
};

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Starport - deferred mission scheduling");

    let config_path = Path::new("starport.json");
    let config = if config_path.exists() {
        SessionConfig::from_file(config_path)?
    } else {
        warn!("No starport.json found, using defaults");
        SessionConfig::default()
    };

    // ========================================
    // Dependency Injection - Wire up the host
    // ========================================

    let mut clock = SimClock::starting_at(0.0);
    let session = SimSession::default();
    let mut shipyard = LogShipyard::new();
    let mut hook = NoopPostBuild;
    let mut targets = SimTargetService::new();
    let mut notices = NoticeLog::default();

    let mut registry = ProfileRegistry::new();
    if let Some(label) = &config.default_profile_name {
        registry = registry.with_default_name(label.clone());
    }
    let mut schedule = MissionSchedule::from_parts(registry, Vec::new());

    // ========================================
    // Record profiles
    // ========================================

    let lifter_key = schedule.create_profile(
        Profile::new("KSTS", MissionKind::Deploy)
            .with_vessel_name("Cargo Lifter")
            .with_body_name("Kerbin")
            .with_duration(3.0)
            .with_altitude_band(80_000.0, 120_000.0),
    );
    // Same hint again; the registry disambiguates.
    let ferry_key = schedule.create_profile(
        Profile::new("KSTS", MissionKind::Transport)
            .with_vessel_name("Crew Ferry")
            .with_body_name("Kerbin")
            .with_duration(5.0)
            .with_crew_capacity(3)
            .with_docking_port_types(vec!["size1".to_string()]),
    );
    info!(
        "Recorded profiles: '{}', '{}' ({} total)",
        lifter_key,
        ferry_key,
        schedule.profiles().len()
    );

    // ========================================
    // Queue missions
    // ========================================

    let station = EntityId::new("station-1");
    targets.add_entity(
        &station,
        SimEntity {
            name: "Harbor Station".to_string(),
            valid_rendezvous: true,
            crew: vec!["Val".to_string()],
            ..SimEntity::default()
        },
    );

    let lifter = schedule.profiles().get(&lifter_key).expect("just created").clone();
    let ferry = schedule.profiles().get(&ferry_key).expect("just created").clone();

    let now = 0.0;
    schedule.add_mission(Mission::deployment(
        "Relay 1",
        r"Ships\VAB\Relay.craft",
        "80000x80000@0.0",
        &lifter,
        now,
    ));
    schedule.add_mission(Mission::transport(
        station.clone(),
        &ferry,
        &[("Food".to_string(), 50.0)],
        &[
            TransferOrder::parse("Bob", "DELIVER")?,
            TransferOrder::parse("Val", "COLLECT")?,
        ],
        now,
    ));
    info!("Queued {} missions", schedule.missions().len());

    // ========================================
    // Heartbeat loop
    // ========================================

    let max_ticks = 60;
    for tick in 0..max_ticks {
        let mut collab = Collaborators {
            clock: &clock,
            session: &session,
            shipyard: &mut shipyard,
            post_build: &mut hook,
            targets: &mut targets,
            notifier: &mut notices,
        };
        let report = schedule.sweep(&mut collab);
        for event in &report.events {
            info!(tick, now = report.now, "{}", event);
        }
        if schedule.missions().is_empty() {
            break;
        }
        clock.advance(config.tick_seconds);
    }

    info!(
        "Session done: built {} entities, {} transfers applied, {} missions pending",
        shipyard.built().len(),
        targets.transfers().len(),
        schedule.missions().len()
    );
    for notice in notices.notices() {
        info!("Notice: {}", notice.message);
    }

    // ========================================
    // Persist and restore
    // ========================================

    let save_path = Path::new(&config.save_path);
    codec::state::save(&schedule, save_path)?;
    let restored = codec::state::load(save_path)?;
    info!(
        "Restored schedule from '{}': {} profiles, {} missions",
        config.save_path,
        restored.profiles().len(),
        restored.missions().len()
    );

    Ok(())
}
