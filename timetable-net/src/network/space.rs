//! Space abstractions over a timetable.

use std::fmt;

use crate::domain::StopKind;

/// Error returned for an unrecognized space name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown space {name:?} (expected stations, stops or changes)")]
pub struct UnknownSpace {
    name: String,
}

/// How a filtered route turns into directed edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStrategy {
    /// One edge per consecutive pair of surviving rows.
    Consecutive,
    /// One edge per ordered pair of deduplicated stops, earlier to later.
    Clique,
}

/// A "transportation space" abstraction of the timetable.
///
/// Each space fixes which stop kinds count as routing events and how a
/// train's filtered route becomes directed edges.
///
/// # Examples
///
/// ```
/// use timetable_net::network::{EdgeStrategy, SpaceKind};
///
/// let space = SpaceKind::parse("changes").unwrap();
/// assert_eq!(space, SpaceKind::Changes);
/// assert_eq!(space.strategy(), EdgeStrategy::Clique);
///
/// assert!(SpaceKind::parse("tracks").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpaceKind {
    /// Every visited station is an event, edges between consecutive visits.
    Stations,
    /// Only passenger calls are events, edges between consecutive calls.
    Stops,
    /// Passenger calls, with an edge for every ordered pair of distinct
    /// stops a passenger could travel between without changing trains.
    Changes,
}

impl SpaceKind {
    /// All spaces, in output order.
    pub const ALL: [SpaceKind; 3] = [SpaceKind::Stations, SpaceKind::Stops, SpaceKind::Changes];

    /// Parse a space name, case-insensitively.
    pub fn parse(s: &str) -> Result<Self, UnknownSpace> {
        match s.to_ascii_lowercase().as_str() {
            "stations" => Ok(SpaceKind::Stations),
            "stops" => Ok(SpaceKind::Stops),
            "changes" => Ok(SpaceKind::Changes),
            _ => Err(UnknownSpace { name: s.to_owned() }),
        }
    }

    /// Does a row of this kind count as a routing event in this space?
    pub fn allows(self, kind: StopKind) -> bool {
        match self {
            SpaceKind::Stations => true,
            SpaceKind::Stops | SpaceKind::Changes => {
                matches!(kind, StopKind::Begin | StopKind::Stop | StopKind::End)
            }
        }
    }

    /// The edge-generation strategy of this space.
    pub fn strategy(self) -> EdgeStrategy {
        match self {
            SpaceKind::Stations | SpaceKind::Stops => EdgeStrategy::Consecutive,
            SpaceKind::Changes => EdgeStrategy::Clique,
        }
    }

    /// Lowercase name, as accepted by [`parse`](SpaceKind::parse).
    pub fn name(self) -> &'static str {
        match self {
            SpaceKind::Stations => "stations",
            SpaceKind::Stops => "stops",
            SpaceKind::Changes => "changes",
        }
    }

    /// Capitalized name, used in output file names.
    pub fn title(self) -> &'static str {
        match self {
            SpaceKind::Stations => "Stations",
            SpaceKind::Stops => "Stops",
            SpaceKind::Changes => "Changes",
        }
    }
}

impl fmt::Display for SpaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
