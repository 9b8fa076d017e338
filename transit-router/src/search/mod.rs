//! Destination arrivals and path reconstruction.
//!
//! This is the glue between the round-based search engine and the
//! final `Path` values: the destination-arrival builder combines a
//! reached stop with an egress option, and the forward/reverse mappers
//! rebuild a chronologically ordered, fully annotated itinerary from
//! the stop-arrival chain.

mod arrival;
mod destination;
mod forward_mapper;
mod reverse_mapper;
mod trip_search;
mod window;

pub use arrival::{ArrivalKind, StopArrival};
pub use destination::{DestinationArrival, DestinationPaths};
pub use forward_mapper::map_forward;
pub use reverse_mapper::map_reverse;
pub use trip_search::{find_approximate, find_forward, find_reverse, BoardAndAlight};
pub use window::AdditionalSearchDays;

use chrono::{Duration, NaiveDateTime};

use crate::domain::TransitTime;
use crate::pareto::SearchDirection;

/// Minimum buffer times around boarding and alighting.
#[derive(Debug, Clone, Copy)]
pub struct SlackPolicy {
    pub board_slack_secs: i64,
    pub alight_slack_secs: i64,
    pub transfer_slack_secs: i64,
}

impl SlackPolicy {
    pub fn board_slack(&self) -> Duration {
        Duration::seconds(self.board_slack_secs)
    }

    pub fn alight_slack(&self) -> Duration {
        Duration::seconds(self.alight_slack_secs)
    }

    pub fn transfer_slack(&self) -> Duration {
        Duration::seconds(self.transfer_slack_secs)
    }
}

impl Default for SlackPolicy {
    fn default() -> Self {
        Self {
            board_slack_secs: 0,
            alight_slack_secs: 0,
            transfer_slack_secs: 120,
        }
    }
}

/// Per-iteration context threaded explicitly through every mapper and
/// builder call. One mapper serves many sequential search iterations,
/// so nothing here is ever shared mutable state.
#[derive(Debug, Clone, Copy)]
pub struct SearchContext {
    /// Midnight of the search date; all `TransitTime`s are relative to it.
    pub time_zero: NaiveDateTime,
    /// Departure time of the search iteration currently running.
    pub iteration_departure_time: TransitTime,
    pub direction: SearchDirection,
    pub slack: SlackPolicy,
    /// Skip exact timetable matching during path reconstruction.
    pub use_approximate_trip_search: bool,
}

impl SearchContext {
    pub fn new(
        time_zero: NaiveDateTime,
        iteration_departure_time: TransitTime,
        direction: SearchDirection,
        slack: SlackPolicy,
    ) -> Self {
        Self {
            time_zero,
            iteration_departure_time,
            direction,
            slack,
            use_approximate_trip_search: false,
        }
    }
}
