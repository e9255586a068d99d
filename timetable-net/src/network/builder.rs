//! Network construction from a timetable.
//!
//! For each train: filter its rows down to the space's routing events, then
//! turn the filtered route into directed station pairs (consecutive pairs,
//! or the full ordered clique over deduplicated stops), accumulating each
//! pair into shared per-edge statistics. The accumulation is a commutative
//! fold: the final statistics do not depend on train iteration order.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use tracing::debug;

use super::edge::EdgeStats;
use super::space::{EdgeStrategy, SpaceKind};
use crate::domain::{Station, TimetableRow};
use crate::timetable::{Timetable, Train};

/// Directed edge key: (source, target), distinct from its reverse.
pub type EdgeKey = (Station, Station);

/// A directed weighted network built from one timetable under one space.
///
/// Both collections iterate in sorted order, which gives the writer its
/// deterministic vertex numbering and arc order.
#[derive(Debug, Clone, Default)]
pub struct Network {
    /// All stations surviving the space's filter, keyed by trimmed code
    pub vertices: BTreeSet<Station>,
    /// Aggregated statistics per directed edge
    pub edges: BTreeMap<EdgeKey, EdgeStats>,
}

impl Network {
    /// Creates an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the statistics for a directed edge.
    pub fn edge(&self, source: &str, target: &str) -> Option<&EdgeStats> {
        self.edges
            .get(&(Station::new(source), Station::new(target)))
    }
}

/// Reduce a train's rows to the space's routing events, order preserved.
pub fn filter_route(train: &Train, space: SpaceKind) -> Vec<&TimetableRow> {
    train
        .rows
        .iter()
        .filter(|row| space.allows(row.stop_kind))
        .collect()
}

/// Build the directed network for one space over the whole timetable.
pub fn build_network(timetable: &Timetable, space: SpaceKind) -> Network {
    let mut network = Network::new();

    for train in timetable.trains() {
        let route = filter_route(train, space);
        match space.strategy() {
            EdgeStrategy::Consecutive => add_consecutive(&mut network, &route),
            EdgeStrategy::Clique => add_clique(&mut network, &route),
        }
    }

    debug!(
        space = space.name(),
        vertices = network.vertices.len(),
        edges = network.edges.len(),
        "network built"
    );
    network
}

/// Consecutive strategy: every surviving station is a vertex, one edge per
/// adjacent pair in filtered order. A route shorter than 2 rows yields no
/// edges but still contributes its stations.
fn add_consecutive(network: &mut Network, route: &[&TimetableRow]) {
    for row in route {
        network.vertices.insert(row.station.clone());
    }
    for pair in route.windows(2) {
        record_pair(network, pair[0], pair[1]);
    }
}

/// Clique strategy: deduplicate the route by normalized station key (first
/// occurrence wins, original order kept), then connect every ordered pair
/// (i, j) with i < j. Direction is strictly earlier stop to later stop;
/// the reverse edge is never added.
fn add_clique(network: &mut Network, route: &[&TimetableRow]) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique: Vec<&TimetableRow> = Vec::new();
    for row in route {
        if seen.insert(row.station.normalized()) {
            unique.push(row);
        }
    }

    for row in &unique {
        network.vertices.insert(row.station.clone());
    }

    for i in 0..unique.len() {
        for j in (i + 1)..unique.len() {
            record_pair(network, unique[i], unique[j]);
        }
    }
}

/// Accumulate one (source, target) occurrence. The travel-time sample needs
/// the source departure and target arrival to both be present; a negative
/// difference (arrival numerically before departure, e.g. across midnight)
/// is discarded as invalid.
fn record_pair(network: &mut Network, source: &TimetableRow, target: &TimetableRow) {
    let key = (source.station.clone(), target.station.clone());
    let stats = network.edges.entry(key).or_default();
    stats.record_occurrence();

    if let (Some(departure), Some(arrival)) = (source.departure, target.arrival) {
        let seconds = arrival.signed_seconds_since(departure);
        if seconds >= 0 {
            stats.record_travel_time(seconds as f64);
        }
    }
}
