//! Final itinerary paths.
//!
//! A `Path` is a fully time-stamped, leg-by-leg itinerary produced by
//! the path reconstructors: an access leg, any number of transit and
//! transfer legs, and an egress leg. Paths are immutable once built and
//! validated at construction, so everything downstream (the Pareto set,
//! transfer optimization, itinerary mapping) can trust their shape.

use chrono::Duration;
use std::sync::Arc;

use super::access_egress::AccessEgress;
use super::error::DomainError;
use super::time::TransitTime;
use super::trip::{StopIndex, TripSchedule};
use super::Cost;

/// Street leg from the plan origin to the first stop.
#[derive(Debug, Clone)]
pub struct AccessLeg {
    pub access: AccessEgress,
    pub from_time: TransitTime,
    pub to_time: TransitTime,
    pub cost: Cost,
}

/// One ride on a scheduled trip.
#[derive(Debug, Clone)]
pub struct TransitLeg {
    pub trip: Arc<TripSchedule>,
    pub board_stop: StopIndex,
    pub alight_stop: StopIndex,
    pub board_time: TransitTime,
    pub alight_time: TransitTime,
    pub cost: Cost,
}

/// Walk between two stops, between rides.
#[derive(Debug, Clone)]
pub struct TransferLeg {
    pub from_stop: StopIndex,
    pub to_stop: StopIndex,
    pub from_time: TransitTime,
    pub to_time: TransitTime,
    pub cost: Cost,
}

/// Street leg from the last stop to the plan destination.
#[derive(Debug, Clone)]
pub struct EgressLeg {
    pub egress: AccessEgress,
    pub from_time: TransitTime,
    pub to_time: TransitTime,
    pub cost: Cost,
}

/// One leg of a path.
#[derive(Debug, Clone)]
pub enum PathLeg {
    Access(AccessLeg),
    Transit(TransitLeg),
    Transfer(TransferLeg),
    Egress(EgressLeg),
}

impl PathLeg {
    pub fn from_time(&self) -> TransitTime {
        match self {
            PathLeg::Access(leg) => leg.from_time,
            PathLeg::Transit(leg) => leg.board_time,
            PathLeg::Transfer(leg) => leg.from_time,
            PathLeg::Egress(leg) => leg.from_time,
        }
    }

    pub fn to_time(&self) -> TransitTime {
        match self {
            PathLeg::Access(leg) => leg.to_time,
            PathLeg::Transit(leg) => leg.alight_time,
            PathLeg::Transfer(leg) => leg.to_time,
            PathLeg::Egress(leg) => leg.to_time,
        }
    }

    pub fn cost(&self) -> Cost {
        match self {
            PathLeg::Access(leg) => leg.cost,
            PathLeg::Transit(leg) => leg.cost,
            PathLeg::Transfer(leg) => leg.cost,
            PathLeg::Egress(leg) => leg.cost,
        }
    }

    pub fn duration(&self) -> Duration {
        self.to_time().signed_duration_since(self.from_time())
    }

    /// Stop where the leg starts; `None` for the access leg, which
    /// starts at the plan origin.
    pub fn from_stop(&self) -> Option<StopIndex> {
        match self {
            PathLeg::Access(_) => None,
            PathLeg::Transit(leg) => Some(leg.board_stop),
            PathLeg::Transfer(leg) => Some(leg.from_stop),
            PathLeg::Egress(leg) => Some(leg.egress.stop()),
        }
    }

    /// Stop where the leg ends; `None` for the egress leg, which ends
    /// at the plan destination.
    pub fn to_stop(&self) -> Option<StopIndex> {
        match self {
            PathLeg::Access(leg) => Some(leg.access.stop()),
            PathLeg::Transit(leg) => Some(leg.alight_stop),
            PathLeg::Transfer(leg) => Some(leg.to_stop),
            PathLeg::Egress(_) => None,
        }
    }

    pub fn is_transit(&self) -> bool {
        matches!(self, PathLeg::Transit(_))
    }

    pub fn as_transit(&self) -> Option<&TransitLeg> {
        match self {
            PathLeg::Transit(leg) => Some(leg),
            _ => None,
        }
    }
}

/// The criteria vector the dominance model compares paths by.
///
/// Cheap to build and `Copy`, so comparators and the Pareto set's
/// `qualify` pre-check never touch the full leg list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathCriteria {
    pub iteration_departure_time: TransitTime,
    pub departure_time: TransitTime,
    pub arrival_time: TransitTime,
    pub num_transfers: u32,
    pub c1: Cost,
    pub c2: Option<Cost>,
}

impl PathCriteria {
    pub fn duration(&self) -> Duration {
        self.arrival_time.signed_duration_since(self.departure_time)
    }
}

/// A complete, chronologically ordered itinerary.
///
/// # Invariants
///
/// - First leg is an access leg, last leg is an egress leg
/// - Legs never overlap in time and consecutive legs share a stop
#[derive(Debug, Clone)]
pub struct Path {
    legs: Vec<PathLeg>,
    iteration_departure_time: TransitTime,
    c2: Option<Cost>,
}

impl Path {
    /// Construct a path, validating ordering and connectivity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the leg list is empty, does not start with an
    /// access leg and end with an egress leg, is not chronological, or
    /// consecutive legs do not share a stop.
    pub fn new(
        legs: Vec<PathLeg>,
        iteration_departure_time: TransitTime,
        c2: Option<Cost>,
    ) -> Result<Self, DomainError> {
        if legs.len() < 2 {
            return Err(DomainError::EmptyPath);
        }
        if !matches!(legs.first(), Some(PathLeg::Access(_)))
            || !matches!(legs.last(), Some(PathLeg::Egress(_)))
        {
            return Err(DomainError::EmptyPath);
        }

        for window in legs.windows(2) {
            if window[0].to_time() > window[1].from_time()
                || window[0].from_time() > window[0].to_time()
            {
                return Err(DomainError::LegsOutOfOrder);
            }
            // from_stop/to_stop are None only at the path ends, never here.
            let (Some(prev), Some(next)) = (window[0].to_stop(), window[1].from_stop()) else {
                return Err(DomainError::EmptyPath);
            };
            if prev != next {
                return Err(DomainError::LegsNotConnected(prev, next));
            }
        }

        Ok(Self {
            legs,
            iteration_departure_time,
            c2,
        })
    }

    pub fn legs(&self) -> &[PathLeg] {
        &self.legs
    }

    pub fn transit_legs(&self) -> impl Iterator<Item = &TransitLeg> {
        self.legs.iter().filter_map(|leg| leg.as_transit())
    }

    pub fn access_leg(&self) -> &AccessLeg {
        match self.legs.first() {
            Some(PathLeg::Access(leg)) => leg,
            // Validated at construction.
            _ => unreachable!("path starts with an access leg"),
        }
    }

    pub fn egress_leg(&self) -> &EgressLeg {
        match self.legs.last() {
            Some(PathLeg::Egress(leg)) => leg,
            // Validated at construction.
            _ => unreachable!("path ends with an egress leg"),
        }
    }

    pub fn departure_time(&self) -> TransitTime {
        self.access_leg().from_time
    }

    pub fn arrival_time(&self) -> TransitTime {
        self.egress_leg().to_time
    }

    pub fn duration(&self) -> Duration {
        self.arrival_time().signed_duration_since(self.departure_time())
    }

    /// Transfers: rides minus one, where flex access/egress rides count.
    pub fn number_of_transfers(&self) -> u32 {
        let rides = self.transit_legs().count() as u32
            + self.access_leg().access.number_of_rides()
            + self.egress_leg().egress.number_of_rides();
        rides.saturating_sub(1)
    }

    /// Total generalized cost: the sum over all legs.
    pub fn generalized_cost(&self) -> Cost {
        self.legs.iter().map(|leg| leg.cost()).sum()
    }

    pub fn c2(&self) -> Option<Cost> {
        self.c2
    }

    /// The iteration departure time of the search iteration that
    /// produced this path (timetable-view criterion input).
    pub fn iteration_departure_time(&self) -> TransitTime {
        self.iteration_departure_time
    }

    pub fn criteria(&self) -> PathCriteria {
        PathCriteria {
            iteration_departure_time: self.iteration_departure_time,
            departure_time: self.departure_time(),
            arrival_time: self.arrival_time(),
            num_transfers: self.number_of_transfers(),
            c1: self.generalized_cost(),
            c2: self.c2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: i64, m: i64) -> TransitTime {
        TransitTime::hms(h, m, 0)
    }

    fn trip(route: &str, calls: &[(usize, (i64, i64), (i64, i64))]) -> Arc<TripSchedule> {
        TripSchedule::new(
            route,
            calls
                .iter()
                .map(|(stop, (ah, am), (dh, dm))| {
                    (StopIndex(*stop), t(*ah, *am), t(*dh, *dm))
                })
                .collect(),
        )
        .unwrap()
    }

    fn simple_path() -> Path {
        let l11 = trip("L11", &[(1, (9, 55), (10, 4)), (2, (10, 35), (10, 36))]);
        Path::new(
            vec![
                PathLeg::Access(AccessLeg {
                    access: AccessEgress::walk(StopIndex(1), Duration::minutes(3), 360),
                    from_time: t(10, 0),
                    to_time: t(10, 3),
                    cost: 360,
                }),
                PathLeg::Transit(TransitLeg {
                    trip: l11,
                    board_stop: StopIndex(1),
                    alight_stop: StopIndex(2),
                    board_time: t(10, 4),
                    alight_time: t(10, 35),
                    cost: 1_860,
                }),
                PathLeg::Egress(EgressLeg {
                    egress: AccessEgress::walk(StopIndex(2), Duration::minutes(8), 960),
                    from_time: t(10, 35),
                    to_time: t(10, 43),
                    cost: 960,
                }),
            ],
            t(10, 0),
            None,
        )
        .unwrap()
    }

    #[test]
    fn aggregates() {
        let path = simple_path();
        assert_eq!(path.departure_time(), t(10, 0));
        assert_eq!(path.arrival_time(), t(10, 43));
        assert_eq!(path.duration(), Duration::minutes(43));
        assert_eq!(path.number_of_transfers(), 0);
        assert_eq!(path.generalized_cost(), 360 + 1_860 + 960);
        assert_eq!(path.transit_legs().count(), 1);
    }

    #[test]
    fn criteria_vector() {
        let path = simple_path();
        let c = path.criteria();
        assert_eq!(c.departure_time, t(10, 0));
        assert_eq!(c.arrival_time, t(10, 43));
        assert_eq!(c.num_transfers, 0);
        assert_eq!(c.c1, path.generalized_cost());
        assert_eq!(c.c2, None);
        assert_eq!(c.duration(), Duration::minutes(43));
    }

    #[test]
    fn flex_rides_count_as_transfers() {
        let l11 = trip("L11", &[(1, (9, 55), (10, 4)), (2, (10, 35), (10, 36))]);
        let path = Path::new(
            vec![
                PathLeg::Access(AccessLeg {
                    access: AccessEgress::flex(StopIndex(1), Duration::minutes(10), 600, 1, false),
                    from_time: t(9, 50),
                    to_time: t(10, 0),
                    cost: 600,
                }),
                PathLeg::Transit(TransitLeg {
                    trip: l11,
                    board_stop: StopIndex(1),
                    alight_stop: StopIndex(2),
                    board_time: t(10, 4),
                    alight_time: t(10, 35),
                    cost: 1_860,
                }),
                PathLeg::Egress(EgressLeg {
                    egress: AccessEgress::walk(StopIndex(2), Duration::minutes(8), 960),
                    from_time: t(10, 35),
                    to_time: t(10, 43),
                    cost: 960,
                }),
            ],
            t(9, 50),
            None,
        )
        .unwrap();

        // One flex ride + one transit ride = one transfer.
        assert_eq!(path.number_of_transfers(), 1);
    }

    #[test]
    fn rejects_disconnected_legs() {
        let l11 = trip("L11", &[(5, (9, 55), (10, 4)), (2, (10, 35), (10, 36))]);
        let result = Path::new(
            vec![
                PathLeg::Access(AccessLeg {
                    access: AccessEgress::walk(StopIndex(1), Duration::minutes(3), 360),
                    from_time: t(10, 0),
                    to_time: t(10, 3),
                    cost: 360,
                }),
                PathLeg::Transit(TransitLeg {
                    trip: l11,
                    board_stop: StopIndex(5),
                    alight_stop: StopIndex(2),
                    board_time: t(10, 4),
                    alight_time: t(10, 35),
                    cost: 1_860,
                }),
                PathLeg::Egress(EgressLeg {
                    egress: AccessEgress::walk(StopIndex(2), Duration::minutes(8), 960),
                    from_time: t(10, 35),
                    to_time: t(10, 43),
                    cost: 960,
                }),
            ],
            t(10, 0),
            None,
        );
        assert!(matches!(result, Err(DomainError::LegsNotConnected(_, _))));
    }

    #[test]
    fn rejects_overlapping_legs() {
        let l11 = trip("L11", &[(1, (9, 55), (10, 0)), (2, (10, 35), (10, 36))]);
        let result = Path::new(
            vec![
                PathLeg::Access(AccessLeg {
                    access: AccessEgress::walk(StopIndex(1), Duration::minutes(3), 360),
                    from_time: t(10, 0),
                    to_time: t(10, 3),
                    cost: 360,
                }),
                // Boards before the access leg arrives.
                PathLeg::Transit(TransitLeg {
                    trip: l11,
                    board_stop: StopIndex(1),
                    alight_stop: StopIndex(2),
                    board_time: t(10, 0),
                    alight_time: t(10, 35),
                    cost: 1_860,
                }),
                PathLeg::Egress(EgressLeg {
                    egress: AccessEgress::walk(StopIndex(2), Duration::minutes(8), 960),
                    from_time: t(10, 35),
                    to_time: t(10, 43),
                    cost: 960,
                }),
            ],
            t(10, 0),
            None,
        );
        assert!(matches!(result, Err(DomainError::LegsOutOfOrder)));
    }

    #[test]
    fn rejects_empty_or_malformed() {
        assert!(matches!(
            Path::new(vec![], t(10, 0), None),
            Err(DomainError::EmptyPath)
        ));
    }
}
