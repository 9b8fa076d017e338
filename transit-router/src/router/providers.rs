//! Collaborator contracts of the router.
//!
//! The round-based search engine, the transit data view and the street
//! router are consumed through traits, so the orchestration can be
//! tested against mocks and the heavy collaborators can live in their
//! own crates.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::{AccessEgress, Cost, Path, RoutingError, StopIndex, TransitTime};
use crate::pareto::SearchCriteria;
use crate::search::{AdditionalSearchDays, SlackPolicy};

use super::access::{AccessDirection, TemporaryVertices};
use super::request::{Place, StreetMode};

/// Fully prepared input for one round-based search run.
///
/// Carries the composed dominance criteria, so the struct has no
/// `Debug` or `Clone`; it is built once per request and moved into the
/// engine.
pub struct TransitSearchRequest {
    /// Midnight of the search date; all `TransitTime`s are relative to it.
    pub time_zero: NaiveDateTime,
    /// Earliest departure (forward) or latest arrival (reverse).
    pub anchor_time: TransitTime,
    pub arrive_by: bool,
    pub search_window_secs: Option<i64>,
    /// Latest acceptable arrival (forward) or earliest acceptable
    /// departure (reverse); arrivals beyond it are discarded.
    pub time_limit: TransitTime,
    pub additional_days: AdditionalSearchDays,
    pub access: Vec<AccessEgress>,
    pub egress: Vec<AccessEgress>,
    pub criteria: SearchCriteria,
    pub slack: SlackPolicy,
    /// Cost charged per second of egress wait; `None` when the cost
    /// criterion is inactive.
    pub wait_cost_per_second: Option<Cost>,
    /// Skip exact timetable matching during path reconstruction.
    pub use_approximate_trip_search: bool,
    pub num_itineraries: usize,
    /// Apply realtime updates to the timetable view.
    pub use_realtime: bool,
    pub preferred_routes: Vec<String>,
    pub banned_routes: Vec<String>,
    pub preferred_agencies: Vec<String>,
    pub banned_agencies: Vec<String>,
}

/// The search parameters a run actually used, returned to the caller
/// so a follow-up request can page past them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParamsUsed {
    pub search_date_time: NaiveDateTime,
    /// `None` when the engine could not establish a valid window.
    pub search_window_secs: Option<i64>,
    pub num_itineraries: usize,
}

/// Output of one round-based search run.
#[derive(Debug, Clone)]
pub struct TransitSearchResponse {
    pub paths: Vec<Path>,
    pub params_used: SearchParamsUsed,
    /// Paths the engine found but could not reconstruct.
    pub unknown_path_count: usize,
}

impl TransitSearchResponse {
    /// True when the run produced nothing and no window could be
    /// established, meaning paging further would not help.
    pub fn no_connection_found(&self) -> bool {
        self.paths.is_empty() && self.params_used.search_window_secs.is_none()
    }

    pub fn contains_unknown_paths(&self) -> bool {
        self.unknown_path_count > 0
    }
}

/// The round-based search engine, consumed as a black box that yields
/// reconstructed paths.
pub trait RoundBasedSearchService<D: TransitDataProvider> {
    fn route(
        &self,
        request: TransitSearchRequest,
        data: &D,
    ) -> Result<TransitSearchResponse, RoutingError>;
}

/// View of the loaded transit data.
pub trait TransitDataProvider {
    /// First and last date the loaded feeds cover, inclusive.
    fn service_period(&self) -> (NaiveDate, NaiveDate);

    /// Resolve an external stop or station id.
    ///
    /// # Errors
    ///
    /// Returns `RoutingError::EntityNotFound` for unknown ids.
    fn stop_index(&self, id: &str) -> Result<StopIndex, RoutingError>;

    fn stop_name(&self, stop: StopIndex) -> String {
        format!("stop {stop}")
    }

    /// True when the loaded data carries realtime updates.
    fn supports_realtime(&self) -> bool {
        false
    }
}

/// Street and flex router producing access and egress edge sets.
pub trait AccessEgressRouter {
    /// Resolve the stops reachable from `place` within `max_duration`.
    async fn street_search(
        &self,
        place: &Place,
        direction: AccessDirection,
        mode: StreetMode,
        max_duration: chrono::Duration,
    ) -> Result<Vec<AccessEgress>, RoutingError>;

    /// Connect off-graph endpoints to the street network. The returned
    /// guard removes the temporary vertices when dropped.
    ///
    /// # Errors
    ///
    /// Returns `Err` when an endpoint cannot be linked to the network.
    fn connect_endpoints(&self, from: &Place, to: &Place)
        -> Result<TemporaryVertices, RoutingError>;
}

/// Optional post-pass that re-selects equivalent transfer points
/// within existing paths without changing their cost or times.
pub trait TransferOptimizationService {
    fn optimize(&self, paths: Vec<Path>) -> Vec<Path>;
}

/// Identity pass for deployments without transfer optimization.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTransferOptimization;

impl TransferOptimizationService for NoTransferOptimization {
    fn optimize(&self, paths: Vec<Path>) -> Vec<Path> {
        paths
    }
}
