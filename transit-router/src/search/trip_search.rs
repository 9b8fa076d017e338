//! Board-and-alight resolution on a trip's stop pattern.
//!
//! The search chain records which trip was ridden and where it was
//! left, but not the exact pattern positions. The path reconstructors
//! recover them here: the exact searches match timetable times, the
//! approximate variants only match stops and are used when exact
//! timetable lookup is disabled for performance (or the timetable has
//! been patched since the search ran).

use crate::domain::{StopIndex, TransitTime, TripSchedule};

/// Resolved board and alight pattern positions of one ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardAndAlight {
    pub board_position: usize,
    pub alight_position: usize,
    pub board_time: TransitTime,
    pub alight_time: TransitTime,
}

fn resolved(trip: &TripSchedule, board: usize, alight: usize) -> BoardAndAlight {
    BoardAndAlight {
        board_position: board,
        alight_position: alight,
        board_time: trip.departure_at(board),
        alight_time: trip.arrival_at(alight),
    }
}

/// Exact forward resolution: the alight position must match both the
/// stop and the timetable arrival time; the board position is the last
/// call at the board stop before it. Handles loop patterns calling at
/// the same stop twice.
pub fn find_forward(
    trip: &TripSchedule,
    board_stop: StopIndex,
    alight_stop: StopIndex,
    alight_time: TransitTime,
) -> Option<BoardAndAlight> {
    let mut from = 0;
    while let Some(alight) = trip.position_of(alight_stop, from) {
        if trip.arrival_at(alight) == alight_time {
            if let Some(board) = trip.last_position_of_before(board_stop, alight) {
                return Some(resolved(trip, board, alight));
            }
        }
        from = alight + 1;
    }
    None
}

/// Exact reverse resolution: the board position must match both the
/// stop and the timetable departure time; the alight position is the
/// first call at the alight stop after it.
pub fn find_reverse(
    trip: &TripSchedule,
    board_stop: StopIndex,
    alight_stop: StopIndex,
    board_time: TransitTime,
) -> Option<BoardAndAlight> {
    let mut from = 0;
    while let Some(board) = trip.position_of(board_stop, from) {
        if trip.departure_at(board) == board_time {
            if let Some(alight) = trip.position_of(alight_stop, board + 1) {
                return Some(resolved(trip, board, alight));
            }
        }
        from = board + 1;
    }
    None
}

/// Approximate resolution: first call at the board stop, then the first
/// call at the alight stop after it. Ignores times entirely.
pub fn find_approximate(
    trip: &TripSchedule,
    board_stop: StopIndex,
    alight_stop: StopIndex,
) -> Option<BoardAndAlight> {
    let board = trip.position_of(board_stop, 0)?;
    let alight = trip.position_of(alight_stop, board + 1)?;
    Some(resolved(trip, board, alight))
}
