//! Error types for the routing core.
//!
//! Two distinct families: `RoutingError` is the structured surface
//! returned to callers (validation failures, unknown entities),
//! `DomainError` covers construction-time invariant violations in the
//! domain model.

use std::fmt;

use super::trip::StopIndex;

/// Which part of the request a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    FromPlace,
    ToPlace,
    DateTime,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InputField::FromPlace => "fromPlace",
            InputField::ToPlace => "toPlace",
            InputField::DateTime => "dateTime",
        };
        write!(f, "{s}")
    }
}

/// Validation error codes surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingErrorCode {
    /// The requested date falls outside the loaded feed's service period.
    OutsideServicePeriod,
    /// No stops reachable from the given place.
    NoStopsInRange,
    /// The search ran but found no transit connection.
    NoTransitConnection,
}

impl fmt::Display for RoutingErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoutingErrorCode::OutsideServicePeriod => "outside service period",
            RoutingErrorCode::NoStopsInRange => "no stops in range",
            RoutingErrorCode::NoTransitConnection => "no transit connection",
        };
        write!(f, "{s}")
    }
}

/// One `{code, input field}` pair of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingErrorEntry {
    pub code: RoutingErrorCode,
    pub field: InputField,
}

impl fmt::Display for RoutingErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code, self.field)
    }
}

/// Error surface of the router.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RoutingError {
    /// The request failed validation. Carries one or more entries;
    /// empty access *and* egress produce two entries together.
    #[error("route request rejected: {}", format_entries(.0))]
    Validation(Vec<RoutingErrorEntry>),

    /// A referenced stop or station id does not exist in the loaded data.
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    /// The round-based search collaborator failed.
    #[error("transit search failed: {0}")]
    Search(String),
}

impl RoutingError {
    pub fn outside_service_period() -> Self {
        RoutingError::Validation(vec![RoutingErrorEntry {
            code: RoutingErrorCode::OutsideServicePeriod,
            field: InputField::DateTime,
        }])
    }

    pub fn no_stops_in_range(field: InputField) -> Self {
        RoutingError::Validation(vec![RoutingErrorEntry {
            code: RoutingErrorCode::NoStopsInRange,
            field,
        }])
    }

    pub fn no_transit_connection() -> Self {
        RoutingError::Validation(vec![RoutingErrorEntry {
            code: RoutingErrorCode::NoTransitConnection,
            field: InputField::DateTime,
        }])
    }

    /// The validation entries, or an empty slice for non-validation errors.
    pub fn entries(&self) -> &[RoutingErrorEntry] {
        match self {
            RoutingError::Validation(entries) => entries,
            _ => &[],
        }
    }
}

fn format_entries(entries: &[RoutingErrorEntry]) -> String {
    entries
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Invariant violations in the domain model.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// A path must have at least an access and an egress leg.
    #[error("path must have at least an access and an egress leg")]
    EmptyPath,

    /// Consecutive legs do not share a stop.
    #[error("legs at stops {0} and {1} are not connected")]
    LegsNotConnected(StopIndex, StopIndex),

    /// A leg ends before it starts, or overlaps its successor.
    #[error("legs are not in chronological order")]
    LegsOutOfOrder,

    /// A trip schedule violates its timetable invariants.
    #[error("invalid trip: {0}")]
    InvalidTrip(&'static str),

    /// A transit leg's board or alight stop is not on the trip pattern.
    #[error("stop {0} not found on trip pattern of route {1}")]
    StopNotOnTrip(StopIndex, String),

    /// A relax function parameter is out of range.
    #[error("invalid relax function: {0}")]
    InvalidRelax(&'static str),
}
