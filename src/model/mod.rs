//! Pure data structures: the facility ([`Airport`]), the contended resource ([`LandingTrack`])
//! and the contenders ([`Vehicle`]).

pub mod airport;
pub mod track;
pub mod vehicle;

pub use airport::*;
pub use track::*;
pub use vehicle::*;
