//! User-facing itinerary output.
//!
//! Paths are search-internal: their times are seconds past time-zero
//! and their stops are internal indices. The itinerary mapping turns
//! them into calendar datetimes and display names for the caller.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::{Cost, Path, PathLeg};

use super::providers::{SearchParamsUsed, TransitDataProvider};
use super::request::StreetMode;

/// Travel mode of one itinerary leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegMode {
    Walk,
    Transit,
    Flex,
}

/// One leg of a user-facing itinerary.
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryLeg {
    pub mode: LegMode,
    /// Route name for transit legs.
    pub route: Option<String>,
    pub from: String,
    pub to: String,
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
    pub duration_secs: i64,
    pub generalized_cost: Cost,
}

/// One complete user-facing itinerary.
#[derive(Debug, Clone, Serialize)]
pub struct Itinerary {
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
    pub duration_secs: i64,
    pub transfers: u32,
    pub generalized_cost: Cost,
    pub legs: Vec<ItineraryLeg>,
}

/// Response of one routing request.
#[derive(Debug, Clone, Serialize)]
pub struct RoutingResponse {
    pub itineraries: Vec<Itinerary>,
    /// What the search actually used; input for cursor-based paging.
    pub search_params_used: SearchParamsUsed,
    /// Downstream filters must drop itineraries not strictly better
    /// than the synthesized walk-all-the-way baseline.
    pub remove_walk_all_the_way: bool,
    /// Street mode resolved for the transit-free comparison search.
    pub direct_mode: StreetMode,
}

impl RoutingResponse {
    /// Response of a request that ran no transit search.
    pub fn empty(search_params_used: SearchParamsUsed) -> Self {
        Self {
            itineraries: Vec::new(),
            search_params_used,
            remove_walk_all_the_way: false,
            direct_mode: StreetMode::Walk,
        }
    }
}

/// Map a path into a user-facing itinerary.
pub fn map_itinerary<D: TransitDataProvider>(
    path: &Path,
    time_zero: NaiveDateTime,
    data: &D,
    from_name: &str,
    to_name: &str,
) -> Itinerary {
    let legs = path
        .legs()
        .iter()
        .map(|leg| {
            let (mode, route, from, to) = match leg {
                PathLeg::Access(access) => (
                    street_mode(access.access.has_rides()),
                    None,
                    from_name.to_string(),
                    data.stop_name(access.access.stop()),
                ),
                PathLeg::Transit(transit) => (
                    LegMode::Transit,
                    Some(transit.trip.route_name().to_string()),
                    data.stop_name(transit.board_stop),
                    data.stop_name(transit.alight_stop),
                ),
                PathLeg::Transfer(transfer) => (
                    LegMode::Walk,
                    None,
                    data.stop_name(transfer.from_stop),
                    data.stop_name(transfer.to_stop),
                ),
                PathLeg::Egress(egress) => (
                    street_mode(egress.egress.has_rides()),
                    None,
                    data.stop_name(egress.egress.stop()),
                    to_name.to_string(),
                ),
            };
            ItineraryLeg {
                mode,
                route,
                from,
                to,
                departure: leg.from_time().to_datetime(time_zero),
                arrival: leg.to_time().to_datetime(time_zero),
                duration_secs: leg.duration().num_seconds(),
                generalized_cost: leg.cost(),
            }
        })
        .collect();

    Itinerary {
        departure: path.departure_time().to_datetime(time_zero),
        arrival: path.arrival_time().to_datetime(time_zero),
        duration_secs: path.duration().num_seconds(),
        transfers: path.number_of_transfers(),
        generalized_cost: path.generalized_cost(),
        legs,
    }
}

fn street_mode(has_rides: bool) -> LegMode {
    if has_rides {
        LegMode::Flex
    } else {
        LegMode::Walk
    }
}
