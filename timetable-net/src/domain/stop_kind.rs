//! Stop classification of a timetable row.

use std::fmt;

/// Classification of a timetable row.
///
/// Determines whether the row counts as a routing event under a given
/// space abstraction: `pass` and `service_stop` rows only appear in the
/// space of stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopKind {
    /// First calling point of the train (departure only).
    Begin,
    /// The train passes without calling.
    Pass,
    /// A passenger stop.
    Stop,
    /// Last calling point of the train (arrival only).
    End,
    /// A stop for operational purposes, not open to passengers.
    ServiceStop,
}

impl StopKind {
    /// Parse a stop classification, case-insensitively.
    ///
    /// Returns `None` for unknown values; such rows can never match any
    /// abstraction's allowed set.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "begin" => Some(StopKind::Begin),
            "pass" => Some(StopKind::Pass),
            "stop" => Some(StopKind::Stop),
            "end" => Some(StopKind::End),
            "service_stop" => Some(StopKind::ServiceStop),
            _ => None,
        }
    }

    /// Canonical lowercase name, as written in timetable files.
    pub fn as_str(&self) -> &'static str {
        match self {
            StopKind::Begin => "begin",
            StopKind::Pass => "pass",
            StopKind::Stop => "stop",
            StopKind::End => "end",
            StopKind::ServiceStop => "service_stop",
        }
    }
}

impl fmt::Display for StopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
