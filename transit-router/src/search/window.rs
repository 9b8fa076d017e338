//! Calendar-day sizing of the timetable slice a search needs.
//!
//! The timetable is loaded per service day. A search anchored near
//! midnight, or with a long window, can spill over onto neighbouring
//! days; this computes how many extra days to load on each side.

use chrono::{Duration, NaiveDateTime};

/// Extra service days to load around the search date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdditionalSearchDays {
    pub days_in_past: u32,
    pub days_in_future: u32,
}

impl AdditionalSearchDays {
    /// Size the slice from the search anchor, the search window and the
    /// longest journey worth considering.
    ///
    /// A depart-after search only spills forward in time; an arrive-by
    /// search only spills backward. The spill is measured in calendar
    /// days, so an anchor at 23:50 with a six hour window already needs
    /// the next day.
    pub fn compute(
        arrive_by: bool,
        search_date_time: NaiveDateTime,
        search_window: Option<Duration>,
        max_window: Duration,
        max_journey_duration: Duration,
    ) -> Self {
        let window = search_window.unwrap_or(max_window);
        let span = window + max_journey_duration;

        if arrive_by {
            let earliest_departure = search_date_time - span;
            Self {
                days_in_past: calendar_days_between(earliest_departure, search_date_time),
                days_in_future: 0,
            }
        } else {
            let latest_arrival = search_date_time + span;
            Self {
                days_in_past: 0,
                days_in_future: calendar_days_between(search_date_time, latest_arrival),
            }
        }
    }
}

fn calendar_days_between(from: NaiveDateTime, to: NaiveDateTime) -> u32 {
    let days = to.date().signed_duration_since(from.date()).num_days();
    days.max(0) as u32
}
