use crate::model::TrackId;
use crate::vehicle_actor::LandingRecord;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// Result of a completed run: one record per vehicle, in the order they finished.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub records: Vec<LandingRecord>,
}

impl RunReport {
    pub fn landed(&self) -> usize {
        self.records.len()
    }

    /// Requests that were refused across the whole fleet.
    pub fn refusals(&self) -> u32 {
        self.records.iter().map(|r| r.attempts.saturating_sub(1)).sum()
    }

    /// How many vehicles used each track.
    pub fn landings_per_track(&self) -> BTreeMap<TrackId, usize> {
        let mut per_track = BTreeMap::new();
        for record in &self.records {
            *per_track.entry(record.track.clone()).or_insert(0) += 1;
        }
        per_track
    }

    pub fn log_summary(&self) {
        for record in &self.records {
            info!(
                vehicle = %record.vehicle,
                track = %record.track,
                attempts = record.attempts,
                "Landing record"
            );
        }
        info!(
            landed = self.landed(),
            refusals = self.refusals(),
            "All vehicles landed and released their tracks"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(vehicle: &str, track: &str, attempts: u32) -> LandingRecord {
        LandingRecord {
            vehicle: vehicle.into(),
            track: track.into(),
            attempts,
        }
    }

    #[test]
    fn test_report_totals() {
        let report = RunReport {
            records: vec![record("H1", "T1", 1), record("P1", "T2", 3), record("P2", "T1", 2)],
        };
        assert_eq!(report.landed(), 3);
        assert_eq!(report.refusals(), 3);

        let per_track = report.landings_per_track();
        assert_eq!(per_track[&TrackId::from("T1")], 2);
        assert_eq!(per_track[&TrackId::from("T2")], 1);
    }

    #[test]
    fn test_report_serializes_records() {
        let report = RunReport {
            records: vec![record("H1", "T1", 1)],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["records"][0]["vehicle"], "H1");
        assert_eq!(json["records"][0]["attempts"], 1);
    }
}
