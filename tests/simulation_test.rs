use landing_sim::config::{DelayRange, SimulationConfig};
use landing_sim::control_tower::ControlTowerError;
use landing_sim::events::{ChannelSink, NullSink, SimEvent};
use landing_sim::lifecycle::{LandingSimulation, SimulationError};
use landing_sim::model::{Airport, LandingTrack, TrackId, Vehicle, VehicleId, VehicleKind};
use pool_framework::PoolAccess;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

fn fleet(n: usize) -> Vec<Vehicle> {
    (1..=n)
        .map(|i| Vehicle::new(format!("P{}", i).as_str(), VehicleKind::Plane, 50))
        .collect()
}

fn drain(events: &mut UnboundedReceiver<SimEvent>) -> Vec<SimEvent> {
    let mut all = Vec::new();
    while let Ok(event) = events.try_recv() {
        all.push(event);
    }
    all
}

/// Replays the event log and checks that no track ever had two occupants.
/// Returns the peak number of tracks in use at once.
fn assert_exclusive(events: &[SimEvent]) -> usize {
    let mut holders: HashMap<TrackId, VehicleId> = HashMap::new();
    let mut peak = 0;
    for event in events {
        match event {
            SimEvent::Occupying { vehicle, track } => {
                let previous = holders.insert(track.clone(), vehicle.clone());
                assert!(previous.is_none(), "{} granted to {} while held", track, vehicle);
                peak = peak.max(holders.len());
            }
            SimEvent::Released { vehicle, track } => {
                assert_eq!(holders.remove(track).as_ref(), Some(vehicle));
            }
            _ => {}
        }
    }
    assert!(holders.is_empty(), "tracks still held at the end: {:?}", holders);
    peak
}

#[tokio::test]
async fn test_two_tracks_three_vehicles() {
    let mut config = SimulationConfig::instant(2);
    config.occupancy = DelayRange::fixed(100);
    config.backoff = DelayRange::fixed(10);
    let airport = Airport::new("Test", 2);
    let (sink, mut events) = ChannelSink::new();

    let sim = LandingSimulation::new(&airport, config, Arc::new(sink)).unwrap();
    let report = sim.run(fleet(3)).await.unwrap();

    assert_eq!(report.landed(), 3);
    assert!(report.refusals() >= 1);

    let events = drain(&mut events);
    let first_two: Vec<String> = events
        .iter()
        .filter_map(|e| match e {
            SimEvent::Occupying { track, .. } => Some(track.to_string()),
            _ => None,
        })
        .take(2)
        .collect();
    assert_eq!(first_two, vec!["T1", "T2"]);
    assert!(events.iter().any(|e| matches!(e, SimEvent::Waiting { .. })));

    let released: HashSet<_> = events
        .iter()
        .filter(|e| matches!(e, SimEvent::Released { .. }))
        .map(|e| e.vehicle().clone())
        .collect();
    assert_eq!(released.len(), 3);
    assert_exclusive(&events);

    assert_eq!(sim.tower().free_tracks().await.unwrap().len(), 2);
    sim.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_zero_tracks_never_completes() {
    let airport = Airport::new("Closed", 0);
    let mut config = SimulationConfig::instant(0);
    config.backoff = DelayRange::fixed(5);

    let sim = LandingSimulation::new(&airport, config, Arc::new(NullSink)).unwrap();
    let result = tokio::time::timeout(Duration::from_millis(200), sim.run(fleet(2))).await;
    assert!(result.is_err());
    sim.shutdown().await.unwrap();
}

// Single-threaded on purpose: a release is then always logged before the next grant of
// the same track, so the event log can be replayed in order.
#[tokio::test]
async fn test_many_vehicles_never_share_a_track() {
    let mut config = SimulationConfig::instant(3);
    config.occupancy = DelayRange::new(1, 5);
    config.backoff = DelayRange::new(1, 3);
    config.seed = Some(11);
    let airport = Airport::new("Busy", 3);
    let (sink, mut events) = ChannelSink::new();

    let sim = LandingSimulation::new(&airport, config, Arc::new(sink)).unwrap();
    let report = sim.run(fleet(24)).await.unwrap();
    assert_eq!(report.landed(), 24);

    let peak = assert_exclusive(&drain(&mut events));
    assert!(peak <= 3);

    let per_track = report.landings_per_track();
    assert_eq!(per_track.values().sum::<usize>(), 24);
    assert!(per_track.keys().all(|t| ["T1", "T2", "T3"].contains(&t.0.as_str())));

    assert_eq!(sim.tower().busy_count().await.unwrap(), 0);
    sim.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_busy_count_matches_occupying_vehicles() {
    let mut config = SimulationConfig::instant(2);
    config.occupancy = DelayRange::fixed(300);
    config.backoff = DelayRange::fixed(20);
    let airport = Airport::new("Test", 2);
    let (sink, mut events) = ChannelSink::new();
    let sim = Arc::new(LandingSimulation::new(&airport, config, Arc::new(sink)).unwrap());

    let runner = {
        let sim = sim.clone();
        tokio::spawn(async move { sim.run(fleet(4)).await })
    };

    // Both tracks taken, the other two vehicles refused.
    let mut occupying = 0;
    while occupying < 2 {
        if let Some(SimEvent::Occupying { .. }) = events.recv().await {
            occupying += 1;
        }
    }
    assert_eq!(sim.tower().busy_count().await.unwrap(), 2);
    assert!(sim.tower().free_tracks().await.unwrap().is_empty());

    let report = runner.await.unwrap().unwrap();
    assert_eq!(report.landed(), 4);
    assert_eq!(sim.tower().busy_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_cancel_frees_every_track() {
    let mut config = SimulationConfig::instant(2);
    config.occupancy = DelayRange::fixed(60_000);
    config.backoff = DelayRange::fixed(60_000);
    let airport = Airport::new("Test", 2);
    let (sink, mut events) = ChannelSink::new();
    let sim = Arc::new(LandingSimulation::new(&airport, config, Arc::new(sink)).unwrap());

    let runner = {
        let sim = sim.clone();
        tokio::spawn(async move { sim.run(fleet(3)).await })
    };

    // Wait for both tracks to be taken and the third vehicle to be refused.
    let (mut occupying, mut waiting) = (0, 0);
    while occupying < 2 || waiting < 1 {
        match events.recv().await {
            Some(SimEvent::Occupying { .. }) => occupying += 1,
            Some(SimEvent::Waiting { .. }) => waiting += 1,
            _ => {}
        }
    }

    sim.cancel();
    let result = tokio::time::timeout(Duration::from_secs(5), runner)
        .await
        .expect("cancelled run should finish promptly")
        .unwrap();
    assert!(matches!(result, Err(SimulationError::Cancelled)));

    // Occupying vehicles left early and released.
    let released = drain(&mut events)
        .into_iter()
        .filter(|e| matches!(e, SimEvent::Released { .. }))
        .count();
    assert_eq!(released, 2);
    assert_eq!(sim.tower().busy_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_second_release_rejected() {
    let airport = Airport::new("Test", 2);
    let sim = LandingSimulation::new(&airport, SimulationConfig::instant(2), Arc::new(NullSink))
        .unwrap();
    let tower = sim.tower();

    let lease = tower.request_track().await.unwrap().unwrap();
    let id = lease.id().clone();
    lease.release().await.unwrap();

    let again = tower.release_track(id).await;
    assert_eq!(again, Err(ControlTowerError::TrackAlreadyFree("T1".into())));
    assert!(again.unwrap_err().is_invalid_release());

    let unknown = tower.release_track(TrackId::from("T7")).await;
    assert_eq!(unknown, Err(ControlTowerError::UnknownTrack("T7".into())));
}

#[tokio::test]
async fn test_duplicate_tracks_rejected() {
    let airport = Airport {
        name: "Twin".to_string(),
        tracks: vec![LandingTrack::new("T1"), LandingTrack::new("T1")],
    };
    let result = LandingSimulation::new(&airport, SimulationConfig::instant(2), Arc::new(NullSink));
    assert!(matches!(
        result,
        Err(SimulationError::Tower(ControlTowerError::DuplicateTrack(_)))
    ));
}

#[tokio::test]
async fn test_invalid_config_rejected() {
    let mut config = SimulationConfig::instant(1);
    config.backoff = DelayRange::new(10, 1);
    let result = LandingSimulation::new(&Airport::new("Test", 1), config, Arc::new(NullSink));
    assert!(matches!(result, Err(SimulationError::Config(_))));
}

#[tokio::test]
async fn test_generated_fleet_lands_at_default_airport() {
    let mut config = SimulationConfig::instant(4);
    config.seed = Some(3);
    let mut generator = landing_sim::fleet::FleetGenerator::from_config(&config);
    let airport = generator.airport(&config);
    let vehicles = generator.vehicles();
    let expected = vehicles.len();

    let sim = LandingSimulation::new(&airport, config, Arc::new(NullSink)).unwrap();
    let report = sim.run(vehicles).await.unwrap();
    assert_eq!(report.landed(), expected);
    assert!(report.records.iter().all(|r| r.attempts >= 1));
    sim.shutdown().await.unwrap();
}
