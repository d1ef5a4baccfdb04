//! A landing track: one exclusive unit of the control tower's pool.
//!
//! # Pool Framework
//! This struct implements [`PoolEntity`](pool_framework::PoolEntity), so a
//! [`PoolActor`](pool_framework::PoolActor) can own a set of tracks and hand them out
//! first-available-wins. The `busy` flag is authoritative only inside the actor; a
//! `LandingTrack` held by a vehicle is a copy taken at reservation time.
use pool_framework::PoolEntity;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for landing tracks (`T1`, `T2`, …).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrackId(pub String);

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandingTrack {
    pub id: TrackId,
    pub busy: bool,
}

impl LandingTrack {
    /// Creates a free track.
    pub fn new(id: impl Into<TrackId>) -> Self {
        Self {
            id: id.into(),
            busy: false,
        }
    }

    /// Tracks `T1..=Tn`, in scan order.
    pub fn numbered(count: usize) -> Vec<Self> {
        (1..=count)
            .map(|i| Self::new(TrackId(format!("T{}", i))))
            .collect()
    }
}

impl PoolEntity for LandingTrack {
    type Id = TrackId;

    fn id(&self) -> &TrackId {
        &self.id
    }

    fn is_busy(&self) -> bool {
        self.busy
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_tracks_start_free_and_ordered() {
        let tracks = LandingTrack::numbered(3);
        let names: Vec<String> = tracks.iter().map(|t| t.id.to_string()).collect();
        assert_eq!(names, vec!["T1", "T2", "T3"]);
        assert!(tracks.iter().all(|t| t.is_free()));
    }
}
