use chrono::{TimeDelta, Timelike};

use crate::types::Timestamp;

/// An optional pair of date boundaries as supplied by a caller.
///
/// Callers normally send calendar dates rather than instants. A boundary whose time of day is
/// midnight is read as "the whole day", which [`DateRange::normalize`] turns into an explicit
/// inclusive instant range in the boundary's own offset.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct DateRange {
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>
}

impl DateRange {
    pub fn new(start: Option<Timestamp>, end: Option<Timestamp>) -> Self {
        Self { start, end }
    }

    /// Expands day-precision boundaries.
    ///
    /// - A midnight start with no end covers that single day.
    /// - A midnight end is extended to the last nanosecond of its day.
    /// - Any other boundary is used exactly as given.
    pub fn normalize(self) -> Self {
        let mut start = self.start;
        let mut end = self.end;

        if let Some(boundary) = start {
            if is_day_precision(boundary) {
                let start_of_day = start_of_day(boundary);
                start = Some(start_of_day);

                if end.is_none() {
                    end = Some(end_of_day(start_of_day));
                }
            }
        }

        if let Some(boundary) = end {
            if is_day_precision(boundary) {
                end = Some(end_of_day(start_of_day(boundary)));
            }
        }

        Self { start, end }
    }
}

//NOTE: Sub-second digits are ignored, a boundary at 00:00:00.5 still reads as a calendar date
fn is_day_precision(boundary: Timestamp) -> bool {
    boundary.hour() == 0 && boundary.minute() == 0 && boundary.second() == 0
}

fn start_of_day(boundary: Timestamp) -> Timestamp {
    boundary.with_nanosecond(0).unwrap_or(boundary)
}

fn end_of_day(start_of_day: Timestamp) -> Timestamp {
    let last_instant = TimeDelta::days(1) - TimeDelta::nanoseconds(1);

    start_of_day.checked_add_signed(last_instant).unwrap_or(start_of_day)
}
