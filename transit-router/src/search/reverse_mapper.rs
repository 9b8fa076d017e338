//! Reverse path reconstruction.
//!
//! A reverse search explores from the plan destination toward the
//! origin, so its chain is already in chronological itinerary order
//! when walked from the destination arrival: the destination arrival's
//! egress edge is really the itinerary's access leg, and the chain's
//! round-zero record is the itinerary's egress leg. Chain times are
//! latest-feasible, with transit records sitting at the boarding stop
//! holding the timetable departure there.

use crate::domain::{
    AccessLeg, DomainError, EgressLeg, Path, PathLeg, TransferLeg, TransitLeg,
};
use crate::search::arrival::ArrivalKind;

use super::destination::DestinationArrival;
use super::{trip_search, SearchContext};

/// Rebuild the chronologically ordered path for a reverse search.
///
/// # Errors
///
/// Returns `Err` if a ride cannot be located on its trip's pattern or
/// the resulting legs do not form a valid path.
pub fn map_reverse(
    context: &SearchContext,
    destination: &DestinationArrival,
) -> Result<Path, DomainError> {
    let mut legs: Vec<PathLeg> = Vec::new();

    // The search ran from the traveller's destination, so the edge that
    // closed the search is the itinerary's first street leg.
    legs.push(PathLeg::Access(AccessLeg {
        access: destination.egress.clone(),
        from_time: destination.arrival_time,
        to_time: destination.arrival_time + destination.egress.duration(),
        cost: (destination.c1 - destination.previous.c1).max(0),
    }));

    let mut cursor = Some(&destination.previous);
    while let Some(arrival) = cursor {
        match &arrival.kind {
            ArrivalKind::Transit { trip } => {
                let alight_at = arrival
                    .previous()
                    .ok_or(DomainError::LegsOutOfOrder)?;
                let ride = if context.use_approximate_trip_search {
                    trip_search::find_approximate(trip, arrival.stop, alight_at.stop)
                } else {
                    trip_search::find_reverse(
                        trip,
                        arrival.stop,
                        alight_at.stop,
                        arrival.arrival_time,
                    )
                }
                .ok_or_else(|| {
                    DomainError::StopNotOnTrip(arrival.stop, trip.route_name().to_string())
                })?;

                legs.push(PathLeg::Transit(TransitLeg {
                    trip: trip.clone(),
                    board_stop: arrival.stop,
                    alight_stop: alight_at.stop,
                    board_time: ride.board_time,
                    alight_time: ride.alight_time,
                    cost: (arrival.c1 - alight_at.c1).max(0),
                }));
            }
            ArrivalKind::Transfer { duration } => {
                let walked_to = arrival
                    .previous()
                    .ok_or(DomainError::LegsOutOfOrder)?;
                legs.push(PathLeg::Transfer(TransferLeg {
                    from_stop: arrival.stop,
                    to_stop: walked_to.stop,
                    from_time: arrival.arrival_time,
                    to_time: arrival.arrival_time + *duration,
                    cost: (arrival.c1 - walked_to.c1).max(0),
                }));
            }
            ArrivalKind::Access(egress) => {
                // Round zero of a reverse search touched the traveller's
                // destination, so this edge closes the itinerary.
                legs.push(PathLeg::Egress(EgressLeg {
                    egress: egress.clone(),
                    from_time: arrival.arrival_time,
                    to_time: arrival.arrival_time + egress.duration(),
                    cost: arrival.c1.max(0),
                }));
            }
        }
        cursor = arrival.previous();
    }

    Path::new(legs, context.iteration_departure_time, destination.c2)
}
