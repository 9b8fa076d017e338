//! Domain types for the transit routing core.
//!
//! The core immutable model: times, trips, access/egress edges, final
//! paths and the error surface. All types enforce their invariants at
//! construction time, so code that receives them can trust their
//! validity.

mod access_egress;
mod error;
mod path;
mod time;
mod trip;

pub use access_egress::AccessEgress;
pub use error::{DomainError, InputField, RoutingError, RoutingErrorCode, RoutingErrorEntry};
pub use path::{
    AccessLeg, EgressLeg, Path, PathCriteria, PathLeg, TransferLeg, TransitLeg,
};
pub use time::TransitTime;
pub use trip::{StopIndex, TripSchedule};

/// Generalized cost, in centi-seconds of perceived travel time.
///
/// One second of in-vehicle time costs 100; waits, walks and boardings
/// are scaled relative to that by the cost policy of the search engine.
pub type Cost = i64;
