//! Multi-criteria transit trip-planning core.
//!
//! Answers: "how do I get from here to there by public transit,
//! leaving (or arriving) around this time?" The crate covers the
//! Pareto-optimal path collection and dominance model, destination
//! arrival computation, forward and reverse path reconstruction, and
//! the orchestration driving one routing request end to end. The
//! round-based transit search itself, street routing and transit data
//! loading are consumed as pluggable collaborators.

pub mod domain;
pub mod pareto;
pub mod router;
pub mod search;
pub mod util;
