//! Router orchestration.
//!
//! `TransitRouter` drives one routing request end to end: request
//! validation, search-window sizing, concurrent access/egress
//! gathering, the round-based transit search, the optional transfer
//! optimization pass, and the mapping of result paths into user-facing
//! itineraries. It terminates on the first failure; temporary
//! street-network vertices are removed unconditionally through a scope
//! guard.

pub mod access;
pub mod itinerary;
pub mod providers;
pub mod request;

pub use access::{AccessDirection, TemporaryVertices};
pub use itinerary::{map_itinerary, Itinerary, ItineraryLeg, LegMode, RoutingResponse};
pub use providers::{
    AccessEgressRouter, NoTransferOptimization, RoundBasedSearchService, SearchParamsUsed,
    TransferOptimizationService, TransitDataProvider, TransitSearchRequest, TransitSearchResponse,
};
pub use request::{Place, RouteRequest, RouterConfig, StreetMode};

use chrono::NaiveTime;

use crate::domain::{RoutingError, TransitTime};
use crate::pareto::{SearchCriteria, SearchDirection};
use crate::search::AdditionalSearchDays;

/// End-to-end router over pluggable collaborators.
pub struct TransitRouter<'a, S, D, A, T = NoTransferOptimization> {
    search: &'a S,
    data: &'a D,
    street: &'a A,
    transfer_optimization: Option<&'a T>,
    config: RouterConfig,
}

impl<'a, S, D, A> TransitRouter<'a, S, D, A, NoTransferOptimization> {
    pub fn new(search: &'a S, data: &'a D, street: &'a A, config: RouterConfig) -> Self {
        Self {
            search,
            data,
            street,
            transfer_optimization: None,
            config,
        }
    }
}

impl<'a, S, D, A, T> TransitRouter<'a, S, D, A, T> {
    /// Enable a transfer-optimization pass over the result paths.
    pub fn with_transfer_optimization<U>(self, service: &'a U) -> TransitRouter<'a, S, D, A, U> {
        TransitRouter {
            search: self.search,
            data: self.data,
            street: self.street,
            transfer_optimization: Some(service),
            config: self.config,
        }
    }
}

impl<S, D, A, T> TransitRouter<'_, S, D, A, T>
where
    S: RoundBasedSearchService<D>,
    D: TransitDataProvider,
    A: AccessEgressRouter,
    T: TransferOptimizationService,
{
    /// Run one routing request.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error when the date falls outside the
    /// service period, when an endpoint has no stops in range, or when
    /// no transit connection exists; `EntityNotFound` when a place
    /// references an unknown stop id. A disabled transit search is an
    /// empty `Ok`, not an error.
    pub async fn route(&self, request: &RouteRequest) -> Result<RoutingResponse, RoutingError> {
        let params_requested = SearchParamsUsed {
            search_date_time: request.date_time,
            search_window_secs: request.search_window_secs,
            num_itineraries: request.num_itineraries,
        };

        if !request.transit_enabled {
            tracing::debug!("transit search disabled, returning an empty plan");
            return Ok(RoutingResponse::empty(params_requested));
        }

        let (first_date, last_date) = self.data.service_period();
        let date = request.date_time.date();
        if date < first_date || date > last_date {
            return Err(RoutingError::outside_service_period());
        }

        let additional_days = AdditionalSearchDays::compute(
            request.arrive_by,
            request.date_time,
            request.search_window(),
            self.config.max_search_window(),
            self.config.max_journey_duration(),
        );

        let mut prepared = request.clone();
        prepared.from = self.resolved(&request.from)?;
        prepared.to = self.resolved(&request.to)?;

        // Held until return: temporary street vertices are removed on
        // every exit path, including errors below.
        let _temporary = self.street.connect_endpoints(&prepared.from, &prepared.to)?;

        let (access_edges, egress_edges) =
            access::gather(self.street, &prepared, &self.config).await?;

        // No direct mode and no cursor: synthesize a walk comparison so
        // a downstream filter can drop itineraries a plain walk beats.
        let remove_walk_all_the_way =
            request.direct_mode.is_none() && request.page_cursor.is_none();
        let direct_mode = request.direct_mode.unwrap_or(StreetMode::Walk);

        let direction = if request.arrive_by {
            SearchDirection::Reverse
        } else {
            SearchDirection::Forward
        };
        let criteria = SearchCriteria {
            include_c1: true,
            include_timetable_view: request.search_window().is_some() && !request.arrive_by,
            prefer_latest_departure: request.arrive_by,
            direction,
            relax_c1: self.config.relax_c1,
            c2_comparator: None,
        };

        let time_zero = date.and_time(NaiveTime::MIN);
        let anchor_time = TransitTime::from_seconds(
            request
                .date_time
                .signed_duration_since(time_zero)
                .num_seconds(),
        );

        // A journey can depart anywhere inside the window and then run
        // for at most the maximum journey duration; nothing beyond that
        // span can belong to the result.
        let reach = request
            .search_window()
            .unwrap_or_else(|| self.config.max_search_window())
            + self.config.max_journey_duration();
        let time_limit = match direction {
            SearchDirection::Forward => anchor_time + reach,
            SearchDirection::Reverse => anchor_time - reach,
        };

        let search_request = TransitSearchRequest {
            time_zero,
            anchor_time,
            arrive_by: request.arrive_by,
            search_window_secs: request.search_window_secs,
            time_limit,
            additional_days,
            access: access_edges,
            egress: egress_edges,
            wait_cost_per_second: criteria
                .include_c1
                .then_some(self.config.wait_cost_per_second),
            criteria,
            slack: self.config.slack,
            use_approximate_trip_search: self.config.use_approximate_trip_search,
            num_itineraries: request.num_itineraries,
            use_realtime: !request.ignore_realtime_updates && self.data.supports_realtime(),
            preferred_routes: request.preferred_routes.clone(),
            banned_routes: request.banned_routes.clone(),
            preferred_agencies: request.preferred_agencies.clone(),
            banned_agencies: request.banned_agencies.clone(),
        };

        let response = self.search.route(search_request, self.data)?;
        if response.contains_unknown_paths() {
            tracing::debug!(
                unknown = response.unknown_path_count,
                "search produced paths it could not reconstruct"
            );
        }
        if response.no_connection_found() {
            return Err(RoutingError::no_transit_connection());
        }

        let mut paths = response.paths;
        if let Some(optimizer) = self.transfer_optimization {
            paths = optimizer.optimize(paths);
        }

        let itineraries = paths
            .iter()
            .map(|path| {
                itinerary::map_itinerary(
                    path,
                    time_zero,
                    self.data,
                    &request.from.name,
                    &request.to.name,
                )
            })
            .collect();

        Ok(RoutingResponse {
            itineraries,
            search_params_used: response.params_used,
            remove_walk_all_the_way,
            direct_mode,
        })
    }

    /// Resolve a place given only by id against the loaded stop table.
    fn resolved(&self, place: &Place) -> Result<Place, RoutingError> {
        if place.stop.is_some() || place.coordinate.is_some() {
            return Ok(place.clone());
        }
        let stop = self.data.stop_index(&place.name)?;
        Ok(Place {
            name: place.name.clone(),
            stop: Some(stop),
            coordinate: None,
        })
    }
}
