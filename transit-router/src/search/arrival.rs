//! Stop arrivals: the persistent backward-linked search chain.
//!
//! The round-based search produces one `StopArrival` per relaxation
//! step. Arrivals are immutable once published and link to exactly one
//! `previous` arrival behind an `Arc`, so many candidate paths share a
//! common prefix without copying; superseded arrivals disappear when
//! the last chain referencing them is dropped.
//!
//! Time contract, by search direction:
//!
//! - Forward search: a transit arrival's time is the timetable arrival
//!   at the stop *plus* the alight slack.
//! - Reverse search: a transit arrival sits at the *boarding* stop
//!   (chronologically) and its time is the timetable departure there;
//!   all times are latest-feasible values. The board slack is
//!   subtracted downstream to recover the time one must reach the stop.

use std::sync::Arc;

use chrono::Duration;

use crate::domain::{AccessEgress, Cost, StopIndex, TransitTime, TripSchedule};

/// What produced an arrival.
#[derive(Debug, Clone)]
pub enum ArrivalKind {
    /// Reached the stop from the plan origin (round zero).
    Access(AccessEgress),
    /// Alighted a scheduled trip (forward), or boards one (reverse).
    Transit { trip: Arc<TripSchedule> },
    /// Walked from the previous arrival's stop.
    Transfer { duration: Duration },
}

/// One reached stop during the search.
#[derive(Debug, Clone)]
pub struct StopArrival {
    pub round: u8,
    pub stop: StopIndex,
    pub arrival_time: TransitTime,
    pub c1: Cost,
    pub c2: Option<Cost>,
    pub kind: ArrivalKind,
    previous: Option<Arc<StopArrival>>,
}

impl StopArrival {
    /// Round-zero arrival at the first stop, reached via an access edge.
    pub fn access(
        stop: StopIndex,
        arrival_time: TransitTime,
        c1: Cost,
        c2: Option<Cost>,
        access: AccessEgress,
    ) -> Arc<Self> {
        Arc::new(Self {
            round: 0,
            stop,
            arrival_time,
            c1,
            c2,
            kind: ArrivalKind::Access(access),
            previous: None,
        })
    }

    /// Arrival produced by riding `trip` from the previous arrival's stop.
    pub fn transit(
        previous: Arc<StopArrival>,
        round: u8,
        stop: StopIndex,
        arrival_time: TransitTime,
        c1: Cost,
        c2: Option<Cost>,
        trip: Arc<TripSchedule>,
    ) -> Arc<Self> {
        debug_assert!(round > previous.round || matches!(previous.kind, ArrivalKind::Transfer { .. }));
        Arc::new(Self {
            round,
            stop,
            arrival_time,
            c1,
            c2,
            kind: ArrivalKind::Transit { trip },
            previous: Some(previous),
        })
    }

    /// Arrival produced by walking from the previous arrival's stop.
    /// Transfers stay in the round of the ride they follow.
    pub fn transfer(
        previous: Arc<StopArrival>,
        stop: StopIndex,
        arrival_time: TransitTime,
        c1: Cost,
        c2: Option<Cost>,
        duration: Duration,
    ) -> Arc<Self> {
        let round = previous.round;
        Arc::new(Self {
            round,
            stop,
            arrival_time,
            c1,
            c2,
            kind: ArrivalKind::Transfer { duration },
            previous: Some(previous),
        })
    }

    pub fn previous(&self) -> Option<&Arc<StopArrival>> {
        self.previous.as_ref()
    }

    pub fn is_access(&self) -> bool {
        matches!(self.kind, ArrivalKind::Access(_))
    }
}
