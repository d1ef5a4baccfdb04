//! # Logging
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Call it once, from the binary.
//!
//! ```bash
//! RUST_LOG=info cargo run            # vehicle transitions and tower grants
//! RUST_LOG=debug cargo run           # plus every request, refusal and state change
//! RUST_LOG=pool_framework=debug,info cargo run
//! ```
//!
//! Every vehicle task runs inside a `vehicle{id=..}` span, so interleaved output from
//! concurrent vehicles stays attributable:
//!
//! ```text
//! INFO vehicle{id=P2}: Requesting a track kind="actor_requested" vehicle=P2
//! INFO Reserved entity_type="LandingTrack" id=T1 busy=1
//! INFO vehicle{id=P2}: Landed kind="actor_occupying" vehicle=P2 track=T1
//! INFO vehicle{id=H1}: No track available kind="actor_waiting" vehicle=H1
//! ```
//!
//! Pool lines carry `entity_type` instead of a module path (`with_target(false)`).

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
