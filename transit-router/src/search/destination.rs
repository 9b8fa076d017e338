//! Arrivals at the plan destination.
//!
//! When the round-based search reaches a stop that has an egress edge,
//! the stop arrival and the edge are combined into a
//! `DestinationArrival`: the egress is time-shifted past any slack and
//! opening-hours window, wait time is charged to the generalized cost,
//! and the candidate is reconstructed into a `Path` and offered to the
//! Pareto set.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;

use crate::domain::{AccessEgress, Cost, DomainError, Path, PathCriteria, TransitTime};
use crate::pareto::{ParetoPathSet, PathComparator, SearchCriteria, SearchDirection};
use crate::util::LogThrottle;

use super::arrival::StopArrival;
use super::{forward_mapper, reverse_mapper, SearchContext};

const COST_MISMATCH_LOG_PERIOD: StdDuration = StdDuration::from_secs(10);

/// A stop arrival extended to the plan destination by an egress edge.
#[derive(Debug, Clone)]
pub struct DestinationArrival {
    /// Last stop arrival of the transit chain.
    pub previous: Arc<StopArrival>,
    pub egress: AccessEgress,
    /// Time the plan destination is reached (forward), or the latest
    /// departure from the plan origin (reverse).
    pub arrival_time: TransitTime,
    pub number_of_transfers: u32,
    pub c1: Cost,
    pub c2: Option<Cost>,
}

impl DestinationArrival {
    /// Combine a stop arrival with an egress edge.
    ///
    /// Returns `None` when the edge's opening hours make the candidate
    /// infeasible. Wait time introduced by slack or by the opening
    /// hours shift is charged at `wait_cost_per_second`.
    pub fn build(
        context: &SearchContext,
        stop_arrival: Arc<StopArrival>,
        egress: &AccessEgress,
        wait_cost_per_second: Option<Cost>,
    ) -> Option<Self> {
        // Flex egresses boarding at the platform need the transfer and
        // board buffers; on-board handovers and plain walks need none.
        let needs_boarding = egress.has_rides() && !egress.stop_reached_on_board();

        let (arrival_time, wait) = match context.direction {
            SearchDirection::Forward => {
                let slack = if needs_boarding {
                    context.slack.transfer_slack() + context.slack.board_slack()
                } else {
                    Duration::zero()
                };
                let requested = stop_arrival.arrival_time + slack;
                let shifted = egress.earliest_departure_time(requested)?;
                (
                    shifted + egress.duration(),
                    shifted.signed_duration_since(stop_arrival.arrival_time),
                )
            }
            SearchDirection::Reverse => {
                let mut slack = context.slack.board_slack();
                if needs_boarding {
                    slack = slack + context.slack.transfer_slack();
                }
                let requested = stop_arrival.arrival_time - slack;
                let shifted = egress.latest_departure_time(requested)?;
                (
                    shifted - egress.duration(),
                    stop_arrival.arrival_time.signed_duration_since(shifted),
                )
            }
        };
        debug_assert!(wait >= Duration::zero());

        let wait_cost = wait_cost_per_second
            .map(|rate| wait.num_seconds() * rate)
            .unwrap_or(0);
        let c1 = stop_arrival.c1 + wait_cost + egress.generalized_cost();
        let c2 = stop_arrival.c2;
        let number_of_transfers =
            u32::from(stop_arrival.round).saturating_sub(1) + egress.number_of_rides();

        Some(Self {
            previous: stop_arrival,
            egress: egress.clone(),
            arrival_time,
            number_of_transfers,
            c1,
            c2,
        })
    }
}

/// Collector of destination arrivals for one search.
///
/// Paths that survive the time limit are reconstructed and offered to
/// a Pareto set; the set's comparator decides which ones stay.
pub struct DestinationPaths {
    context: SearchContext,
    wait_cost_per_second: Option<Cost>,
    /// Latest acceptable arrival (forward) or earliest acceptable
    /// departure (reverse).
    time_limit: Option<TransitTime>,
    paths: ParetoPathSet,
    reached_current_round: bool,
    cost_mismatch_throttle: LogThrottle,
}

impl DestinationPaths {
    pub fn new(
        context: SearchContext,
        criteria: SearchCriteria,
        wait_cost_per_second: Option<Cost>,
        time_limit: Option<TransitTime>,
    ) -> Self {
        Self {
            context,
            wait_cost_per_second,
            time_limit,
            paths: ParetoPathSet::new(PathComparator::build(criteria)),
            reached_current_round: false,
            cost_mismatch_throttle: LogThrottle::new(COST_MISMATCH_LOG_PERIOD),
        }
    }

    /// Combine a stop arrival with an egress edge and offer the result
    /// to the destination set. Returns `Ok(true)` if a new Pareto
    /// member was accepted.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the arrival chain cannot be reconstructed into
    /// a valid path.
    pub fn add_stop_arrival(
        &mut self,
        stop_arrival: Arc<StopArrival>,
        egress: &AccessEgress,
    ) -> Result<bool, DomainError> {
        let Some(destination) = DestinationArrival::build(
            &self.context,
            stop_arrival,
            egress,
            self.wait_cost_per_second,
        ) else {
            return Ok(false);
        };
        self.add(destination)
    }

    /// Offer an already-built destination arrival to the set.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the arrival chain cannot be reconstructed into
    /// a valid path.
    pub fn add(&mut self, destination: DestinationArrival) -> Result<bool, DomainError> {
        if self.outside_time_limit(destination.arrival_time) {
            tracing::debug!(
                arrival_time = %destination.arrival_time,
                "destination arrival outside the search time limit, dropped"
            );
            return Ok(false);
        }

        let path = match self.context.direction {
            SearchDirection::Forward => forward_mapper::map_forward(&self.context, &destination)?,
            SearchDirection::Reverse => reverse_mapper::map_reverse(&self.context, &destination)?,
        };

        if path.generalized_cost() != destination.c1 && self.cost_mismatch_throttle.allow() {
            tracing::warn!(
                path_cost = path.generalized_cost(),
                arrival_cost = destination.c1,
                "reconstructed path cost disagrees with the search's cost"
            );
        }

        let accepted = self.paths.add(path);
        if accepted {
            self.reached_current_round = true;
        }
        Ok(accepted)
    }

    fn outside_time_limit(&self, arrival_time: TransitTime) -> bool {
        match (self.time_limit, self.context.direction) {
            (Some(limit), SearchDirection::Forward) => arrival_time > limit,
            (Some(limit), SearchDirection::Reverse) => arrival_time < limit,
            (None, _) => false,
        }
    }

    /// Cheap pre-check: would a path with these criteria be accepted?
    pub fn qualify(&self, candidate: &PathCriteria) -> bool {
        self.paths.qualify(candidate)
    }

    /// True if any arrival was accepted since the flag was last cleared.
    pub fn is_reached_current_round(&self) -> bool {
        self.reached_current_round
    }

    /// Clear the per-round flag; called between search rounds.
    pub fn clear_reached_current_round(&mut self) {
        self.reached_current_round = false;
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn into_paths(self) -> Vec<Path> {
        self.paths.into_paths()
    }
}
