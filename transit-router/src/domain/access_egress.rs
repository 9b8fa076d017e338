//! Access and egress edges.
//!
//! An `AccessEgress` connects the plan origin or destination to a stop:
//! a plain walk, a drive, or a flex service that may itself contain
//! rides and deliver the traveller on board a vehicle. Flex edges can
//! carry an opening-hours window; outside it the edge is closed and a
//! candidate using it is silently discarded.

use chrono::Duration;

use super::time::TransitTime;
use super::trip::StopIndex;
use super::Cost;

/// An edge between the plan origin/destination and a stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessEgress {
    stop: StopIndex,
    duration_secs: i64,
    generalized_cost: Cost,
    number_of_rides: u32,
    stop_reached_on_board: bool,
    /// Service window during which the edge can be entered, if bounded.
    opening_hours: Option<(TransitTime, TransitTime)>,
}

impl AccessEgress {
    /// A pure walk (or drive) edge: no rides, arrives at the platform.
    pub fn walk(stop: StopIndex, duration: Duration, generalized_cost: Cost) -> Self {
        Self {
            stop,
            duration_secs: duration.num_seconds(),
            generalized_cost,
            number_of_rides: 0,
            stop_reached_on_board: false,
            opening_hours: None,
        }
    }

    /// A flex edge containing `number_of_rides` rides; `on_board` marks
    /// edges that deliver the traveller on board a vehicle rather than
    /// at the platform.
    pub fn flex(
        stop: StopIndex,
        duration: Duration,
        generalized_cost: Cost,
        number_of_rides: u32,
        on_board: bool,
    ) -> Self {
        Self {
            stop,
            duration_secs: duration.num_seconds(),
            generalized_cost,
            number_of_rides,
            stop_reached_on_board: on_board,
            opening_hours: None,
        }
    }

    /// Restrict the edge to an opening-hours window.
    pub fn with_opening_hours(mut self, opens: TransitTime, closes: TransitTime) -> Self {
        self.opening_hours = Some((opens, closes));
        self
    }

    pub fn stop(&self) -> StopIndex {
        self.stop
    }

    pub fn duration(&self) -> Duration {
        Duration::seconds(self.duration_secs)
    }

    pub fn duration_in_seconds(&self) -> i64 {
        self.duration_secs
    }

    pub fn generalized_cost(&self) -> Cost {
        self.generalized_cost
    }

    /// Replace the generalized cost (used by the penalty decorator).
    pub fn set_generalized_cost(&mut self, cost: Cost) {
        self.generalized_cost = cost;
    }

    pub fn number_of_rides(&self) -> u32 {
        self.number_of_rides
    }

    /// True for flex edges containing at least one ride.
    pub fn has_rides(&self) -> bool {
        self.number_of_rides > 0
    }

    pub fn stop_reached_on_board(&self) -> bool {
        self.stop_reached_on_board
    }

    /// Earliest time the edge can be entered at or after `requested`,
    /// or `None` when the edge is already closed for the day.
    pub fn earliest_departure_time(&self, requested: TransitTime) -> Option<TransitTime> {
        match self.opening_hours {
            None => Some(requested),
            Some((opens, closes)) => {
                if requested > closes {
                    None
                } else {
                    Some(requested.max(opens))
                }
            }
        }
    }

    /// Latest time the edge can be entered at or before `requested` in a
    /// reverse search, or `None` when the edge has not opened yet.
    pub fn latest_departure_time(&self, requested: TransitTime) -> Option<TransitTime> {
        match self.opening_hours {
            None => Some(requested),
            Some((opens, closes)) => {
                if requested < opens {
                    None
                } else {
                    Some(requested.min(closes))
                }
            }
        }
    }
}
