//! # Fleet Generation
//!
//! Builds the inputs of a run: the airport with its tracks and a random fleet of
//! helicopters and planes. Generation is seedable so a run can be replayed.
//!
//! Fleet composition:
//! - 1–2 helicopters `H1..`, 2–5 passengers each
//! - 4–7 planes `P1..`, 18–79 passengers each

use crate::config::SimulationConfig;
use crate::model::{Airport, Vehicle, VehicleKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use tracing::debug;

const HELICOPTERS: Range<usize> = 1..3;
const PLANES: Range<usize> = 4..8;
const HELICOPTER_PASSENGERS: Range<u32> = 2..6;
const PLANE_PASSENGERS: Range<u32> = 18..80;

/// Seedable generator for airports and fleets.
pub struct FleetGenerator {
    rng: StdRng,
}

impl FleetGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.seed)
    }

    pub fn airport(&self, config: &SimulationConfig) -> Airport {
        Airport::new(config.airport_name.clone(), config.tracks)
    }

    /// Random fleet, helicopters first, then planes.
    pub fn vehicles(&mut self) -> Vec<Vehicle> {
        let helicopters = self.rng.gen_range(HELICOPTERS);
        let planes = self.rng.gen_range(PLANES);
        debug!(helicopters, planes, "Generating fleet");

        let mut fleet = self.batch(VehicleKind::Helicopter, helicopters, HELICOPTER_PASSENGERS);
        fleet.extend(self.batch(VehicleKind::Plane, planes, PLANE_PASSENGERS));
        fleet
    }

    fn batch(&mut self, kind: VehicleKind, count: usize, passengers: Range<u32>) -> Vec<Vehicle> {
        (1..=count)
            .map(|i| {
                Vehicle::new(
                    format!("{}{}", kind.prefix(), i).as_str(),
                    kind,
                    self.rng.gen_range(passengers.clone()),
                )
            })
            .collect()
    }
}
