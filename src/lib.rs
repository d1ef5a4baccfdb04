//! # Landing Simulator
//!
//! > **Concurrent vehicles contending for a handful of exclusive landing tracks.**
//!
//! A fleet of helicopters and planes approaches an airport with a fixed number of landing
//! tracks. Every vehicle runs in its own Tokio task and asks the control tower for *any*
//! free track. The tower grants the first free one (in track order) or refuses; a refused
//! vehicle backs off and asks again, with no limit on retries. A granted vehicle occupies
//! its track for a while, then releases it.
//!
//! ## Design
//!
//! The tracks are owned by a single actor (a [`pool_framework::PoolActor`]) and every
//! vehicle talks to it through a cloned client. Because the actor handles one message at a
//! time, "find a free track and mark it busy" is indivisible: two vehicles can never be
//! granted the same track, and no lock is shared between tasks.
//!
//! A grant is a [`TrackLease`](control_tower::TrackLease). Releasing it is explicit, but a
//! lease dropped by a cancelled or panicking vehicle hands its track back anyway.
//!
//! ## Module Tour
//!
//! - [`model`]: [`Airport`](model::Airport), [`LandingTrack`](model::LandingTrack),
//!   [`Vehicle`](model::Vehicle) and the vehicle state machine.
//! - [`control_tower`]: the track pool, its client, and the request/release handlers.
//! - [`vehicle_actor`]: the per-vehicle request → wait → occupy → release loop.
//! - [`lifecycle`]: [`LandingSimulation`](lifecycle::LandingSimulation), which fans the
//!   fleet out and joins it, plus cancellation and logging setup.
//! - [`events`]: state transitions as [`SimEvent`](events::SimEvent)s, sent to a pluggable sink.
//! - [`config`] / [`fleet`]: run timings and the random fleet.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=info cargo run -- --tracks 2 --seed 7
//! RUST_LOG=debug cargo run -- --config landing.json
//! ```

pub mod config;
pub mod control_tower;
pub mod events;
pub mod fleet;
pub mod lifecycle;
pub mod model;
pub mod vehicle_actor;
