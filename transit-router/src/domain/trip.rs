//! Scheduled trip timetables.
//!
//! A `TripSchedule` is one vehicle run over a stop pattern, with an
//! arrival and a departure time at every position. Schedules are shared
//! behind `Arc` between stop arrivals, paths and itineraries, so the
//! search never copies timetable data.

use std::fmt;
use std::sync::Arc;

use super::error::DomainError;
use super::time::TransitTime;

/// Index of a stop in the transit data's internal stop table.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct StopIndex(pub usize);

impl fmt::Display for StopIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for StopIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopIndex({})", self.0)
    }
}

/// One scheduled vehicle run: a stop pattern with per-position times.
///
/// # Invariants
///
/// - At least two positions
/// - `departure >= arrival` at every position
/// - Times never decrease along the pattern
#[derive(Debug, Clone)]
pub struct TripSchedule {
    route_name: String,
    pattern: Vec<StopIndex>,
    arrivals: Vec<TransitTime>,
    departures: Vec<TransitTime>,
}

impl TripSchedule {
    /// Construct a schedule, validating the timetable invariants.
    ///
    /// `calls` is the ordered pattern: `(stop, arrival, departure)`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the pattern has fewer than two positions, a
    /// departure precedes its arrival, or times decrease along the run.
    pub fn new(
        route_name: impl Into<String>,
        calls: Vec<(StopIndex, TransitTime, TransitTime)>,
    ) -> Result<Arc<Self>, DomainError> {
        if calls.len() < 2 {
            return Err(DomainError::InvalidTrip(
                "a trip must call at two or more stops",
            ));
        }

        let mut pattern = Vec::with_capacity(calls.len());
        let mut arrivals = Vec::with_capacity(calls.len());
        let mut departures = Vec::with_capacity(calls.len());
        let mut previous_departure: Option<TransitTime> = None;

        for (stop, arrival, departure) in calls {
            if departure < arrival {
                return Err(DomainError::InvalidTrip("departure before arrival"));
            }
            if previous_departure.is_some_and(|prev| arrival < prev) {
                return Err(DomainError::InvalidTrip("times decrease along the trip"));
            }
            previous_departure = Some(departure);
            pattern.push(stop);
            arrivals.push(arrival);
            departures.push(departure);
        }

        Ok(Arc::new(Self {
            route_name: route_name.into(),
            pattern,
            arrivals,
            departures,
        }))
    }

    /// The public-facing route name (e.g. "L11").
    pub fn route_name(&self) -> &str {
        &self.route_name
    }

    /// Number of positions in the stop pattern.
    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    /// True if the pattern is empty (never the case for validated trips).
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Stop at a pattern position.
    pub fn stop_at(&self, position: usize) -> StopIndex {
        self.pattern[position]
    }

    /// Scheduled arrival time at a pattern position.
    pub fn arrival_at(&self, position: usize) -> TransitTime {
        self.arrivals[position]
    }

    /// Scheduled departure time at a pattern position.
    pub fn departure_at(&self, position: usize) -> TransitTime {
        self.departures[position]
    }

    /// First position at or after `from` where the trip calls at `stop`.
    pub fn position_of(&self, stop: StopIndex, from: usize) -> Option<usize> {
        self.pattern[from.min(self.pattern.len())..]
            .iter()
            .position(|s| *s == stop)
            .map(|offset| from + offset)
    }

    /// Last position strictly before `before` where the trip calls at `stop`.
    pub fn last_position_of_before(&self, stop: StopIndex, before: usize) -> Option<usize> {
        self.pattern[..before.min(self.pattern.len())]
            .iter()
            .rposition(|s| *s == stop)
    }
}
