//! The facility whose tracks are contended for.
use crate::model::LandingTrack;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub name: String,
    pub tracks: Vec<LandingTrack>,
}

impl Airport {
    /// An airport with free tracks `T1..=Tn`.
    pub fn new(name: impl Into<String>, track_count: usize) -> Self {
        Self {
            name: name.into(),
            tracks: LandingTrack::numbered(track_count),
        }
    }
}
