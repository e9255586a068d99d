//! A single timetable event.

use super::{Station, StopKind, WallClock};

/// One station visit of one train.
///
/// Rows are ordered by their original position within the train, which is
/// the physical route order; it is the only ordering signal available,
/// since `pass` rows may carry no timestamps at all.
///
/// # Time Semantics
///
/// - `begin` rows carry only a departure
/// - `end` rows carry only an arrival
/// - intermediate rows may carry both, either, or neither
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableRow {
    /// Station visited
    pub station: Station,
    /// Arrival time, if recorded and parseable
    pub arrival: Option<WallClock>,
    /// Departure time, if recorded and parseable
    pub departure: Option<WallClock>,
    /// Stop classification
    pub stop_kind: StopKind,
}

impl TimetableRow {
    /// Creates a row with no times.
    pub fn new(station: Station, stop_kind: StopKind) -> Self {
        Self {
            station,
            arrival: None,
            departure: None,
            stop_kind,
        }
    }

    /// Creates a row with the given times.
    pub fn with_times(
        station: Station,
        stop_kind: StopKind,
        arrival: Option<WallClock>,
        departure: Option<WallClock>,
    ) -> Self {
        Self {
            station,
            arrival,
            departure,
            stop_kind,
        }
    }
}
