//! Forward path reconstruction.
//!
//! Walks a destination arrival's chain backward (egress toward the
//! true origin), builds one leg per arrival, and reverses the result
//! into departure-to-arrival order. Transit board and alight positions
//! are recovered from the trip timetable; per-leg costs are the cost
//! deltas along the chain, clamped at zero, so a sick chain shows up as
//! a total-cost mismatch at the caller rather than a negative leg.

use crate::domain::{
    AccessLeg, DomainError, EgressLeg, Path, PathLeg, TransferLeg, TransitLeg,
};
use crate::search::arrival::ArrivalKind;

use super::destination::DestinationArrival;
use super::{trip_search, SearchContext};

/// Rebuild the chronologically ordered path for a forward search.
///
/// # Errors
///
/// Returns `Err` if a ride cannot be located on its trip's pattern or
/// the resulting legs do not form a valid path.
pub fn map_forward(
    context: &SearchContext,
    destination: &DestinationArrival,
) -> Result<Path, DomainError> {
    let alight_slack = context.slack.alight_slack();
    let mut legs_reversed: Vec<PathLeg> = Vec::new();

    legs_reversed.push(PathLeg::Egress(EgressLeg {
        egress: destination.egress.clone(),
        from_time: destination.arrival_time - destination.egress.duration(),
        to_time: destination.arrival_time,
        cost: (destination.c1 - destination.previous.c1).max(0),
    }));

    let mut cursor = Some(&destination.previous);
    while let Some(arrival) = cursor {
        match &arrival.kind {
            ArrivalKind::Transit { trip } => {
                // A ride always follows an earlier arrival.
                let boarded_from = arrival
                    .previous()
                    .ok_or(DomainError::LegsOutOfOrder)?;
                let timetable_alight = arrival.arrival_time - alight_slack;
                let ride = if context.use_approximate_trip_search {
                    trip_search::find_approximate(trip, boarded_from.stop, arrival.stop)
                } else {
                    trip_search::find_forward(
                        trip,
                        boarded_from.stop,
                        arrival.stop,
                        timetable_alight,
                    )
                }
                .ok_or_else(|| {
                    DomainError::StopNotOnTrip(arrival.stop, trip.route_name().to_string())
                })?;

                legs_reversed.push(PathLeg::Transit(TransitLeg {
                    trip: trip.clone(),
                    board_stop: boarded_from.stop,
                    alight_stop: arrival.stop,
                    board_time: ride.board_time,
                    alight_time: ride.alight_time,
                    cost: (arrival.c1 - boarded_from.c1).max(0),
                }));
            }
            ArrivalKind::Transfer { duration } => {
                let walked_from = arrival
                    .previous()
                    .ok_or(DomainError::LegsOutOfOrder)?;
                legs_reversed.push(PathLeg::Transfer(TransferLeg {
                    from_stop: walked_from.stop,
                    to_stop: arrival.stop,
                    from_time: arrival.arrival_time - *duration,
                    to_time: arrival.arrival_time,
                    cost: (arrival.c1 - walked_from.c1).max(0),
                }));
            }
            ArrivalKind::Access(access) => {
                legs_reversed.push(PathLeg::Access(AccessLeg {
                    access: access.clone(),
                    from_time: arrival.arrival_time - access.duration(),
                    to_time: arrival.arrival_time,
                    cost: arrival.c1.max(0),
                }));
            }
        }
        cursor = arrival.previous();
    }

    legs_reversed.reverse();
    Path::new(
        legs_reversed,
        context.iteration_departure_time,
        destination.c2,
    )
}
