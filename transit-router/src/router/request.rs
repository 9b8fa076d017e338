//! Route request and router configuration.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::{Cost, StopIndex};
use crate::pareto::RelaxFunction;
use crate::search::SlackPolicy;

/// Origin or destination of a plan.
///
/// Either a known stop or a free coordinate that the street router
/// connects to the graph through temporary vertices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    /// Set when the place is a stop in the loaded data.
    pub stop: Option<StopIndex>,
    /// Longitude and latitude, for off-graph places.
    pub coordinate: Option<(f64, f64)>,
}

impl Place {
    pub fn stop(name: impl Into<String>, stop: StopIndex) -> Self {
        Self {
            name: name.into(),
            stop: Some(stop),
            coordinate: None,
        }
    }

    pub fn coordinate(name: impl Into<String>, lon: f64, lat: f64) -> Self {
        Self {
            name: name.into(),
            stop: None,
            coordinate: Some((lon, lat)),
        }
    }
}

/// Street mode used for access, egress or the direct leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreetMode {
    Walk,
    Bike,
    Car,
    Flex,
}

/// One trip-planning request.
///
/// Durations are carried in whole seconds with `Duration` accessors,
/// keeping the struct serde-friendly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    pub from: Place,
    pub to: Place,
    pub date_time: NaiveDateTime,
    /// Interpret `date_time` as the latest arrival instead of the
    /// earliest departure.
    pub arrive_by: bool,
    pub search_window_secs: Option<i64>,
    pub access_mode: StreetMode,
    pub egress_mode: StreetMode,
    /// Street mode for a transit-free trip; when `None` a walk direct
    /// search is synthesized for post-hoc filtering.
    pub direct_mode: Option<StreetMode>,
    pub max_access_duration_secs: i64,
    pub max_egress_duration_secs: i64,
    pub max_direct_duration_secs: i64,
    pub num_itineraries: usize,
    /// Opaque paging cursor from a previous response.
    pub page_cursor: Option<String>,
    pub ignore_realtime_updates: bool,
    pub transit_enabled: bool,
    pub preferred_routes: Vec<String>,
    pub banned_routes: Vec<String>,
    pub preferred_agencies: Vec<String>,
    pub banned_agencies: Vec<String>,
}

impl RouteRequest {
    pub fn new(from: Place, to: Place, date_time: NaiveDateTime) -> Self {
        Self {
            from,
            to,
            date_time,
            arrive_by: false,
            search_window_secs: None,
            access_mode: StreetMode::Walk,
            egress_mode: StreetMode::Walk,
            direct_mode: None,
            max_access_duration_secs: 45 * 60,
            max_egress_duration_secs: 45 * 60,
            max_direct_duration_secs: 4 * 3600,
            num_itineraries: 3,
            page_cursor: None,
            ignore_realtime_updates: false,
            transit_enabled: true,
            preferred_routes: Vec::new(),
            banned_routes: Vec::new(),
            preferred_agencies: Vec::new(),
            banned_agencies: Vec::new(),
        }
    }

    pub fn search_window(&self) -> Option<Duration> {
        self.search_window_secs.map(Duration::seconds)
    }

    pub fn max_access_duration(&self) -> Duration {
        Duration::seconds(self.max_access_duration_secs)
    }

    pub fn max_egress_duration(&self) -> Duration {
        Duration::seconds(self.max_egress_duration_secs)
    }

    pub fn max_direct_duration(&self) -> Duration {
        Duration::seconds(self.max_direct_duration_secs)
    }
}

/// Configuration parameters for the router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Widest search window a request may ask for (minutes); also the
    /// fallback when a request gives none.
    pub max_search_window_mins: i64,

    /// Longest journey worth considering (minutes). Bounds the
    /// calendar-day sizing of the timetable slice.
    pub max_journey_duration_mins: i64,

    /// Cost floor applied to street edges, per second of street travel.
    /// Keeps access and egress from undercutting an equivalent
    /// all-transit alternative.
    pub street_cost_floor_per_second: Cost,

    /// Cost charged per second spent waiting before an egress departs.
    pub wait_cost_per_second: Cost,

    pub slack: SlackPolicy,

    /// Skip exact timetable matching during path reconstruction.
    pub use_approximate_trip_search: bool,

    /// Widen the cost acceptance bound to keep near-optimal alternatives.
    pub relax_c1: Option<RelaxFunction>,
}

impl RouterConfig {
    pub fn max_search_window(&self) -> Duration {
        Duration::minutes(self.max_search_window_mins)
    }

    pub fn max_journey_duration(&self) -> Duration {
        Duration::minutes(self.max_journey_duration_mins)
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_search_window_mins: 24 * 60,
            max_journey_duration_mins: 24 * 60,
            street_cost_floor_per_second: 100,
            wait_cost_per_second: 100,
            slack: SlackPolicy::default(),
            use_approximate_trip_search: false,
            relax_c1: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request() -> RouteRequest {
        RouteRequest::new(
            Place::stop("Origin", StopIndex(1)),
            Place::coordinate("Destination", 13.40, 52.52),
            NaiveDate::from_ymd_opt(2026, 3, 15)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn defaults() {
        let request = request();
        assert!(!request.arrive_by);
        assert!(request.transit_enabled);
        assert_eq!(request.access_mode, StreetMode::Walk);
        assert_eq!(request.search_window(), None);
        assert_eq!(request.max_access_duration(), Duration::minutes(45));
    }

    #[test]
    fn duration_accessors() {
        let mut request = request();
        request.search_window_secs = Some(6 * 3600);
        assert_eq!(request.search_window(), Some(Duration::hours(6)));

        let config = RouterConfig::default();
        assert_eq!(config.max_search_window(), Duration::hours(24));
        assert_eq!(config.max_journey_duration(), Duration::hours(24));
    }

    #[test]
    fn request_round_trips_through_json() {
        let request = request();
        let json = serde_json::to_string(&request).unwrap();
        let back: RouteRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.from.name, "Origin");
        assert_eq!(back.date_time, request.date_time);
        assert_eq!(back.direct_mode, None);
    }
}
