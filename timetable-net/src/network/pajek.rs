//! Pajek arc-list serialization.
//!
//! Vertex identifiers are assigned 1..|V| in ascending lexicographic order
//! of station code, so a given input always produces the same numbering no
//! matter how the network was assembled. The arc count in the header is the
//! number of distinct directed edges, not the sum of their occurrence
//! counts.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::builder::Network;
use super::space::SpaceKind;
use crate::domain::Station;

/// Which aggregated statistic becomes the arc weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightMode {
    /// Raw occurrence count (integer weight).
    Dsn,
    /// Reciprocal of mean travel time in minutes (2-decimal weight);
    /// zero when no valid sample exists.
    Dtn,
}

impl WeightMode {
    /// Both modes, in output order.
    pub const ALL: [WeightMode; 2] = [WeightMode::Dsn, WeightMode::Dtn];

    /// Uppercase label used in output file names.
    pub fn label(self) -> &'static str {
        match self {
            WeightMode::Dsn => "DSN",
            WeightMode::Dtn => "DTN",
        }
    }
}

/// Conventional output file name for one space under one weight mode,
/// e.g. `DSN_SpaceStations.net`.
pub fn output_file_name(space: SpaceKind, mode: WeightMode) -> String {
    format!("{}_Space{}.net", mode.label(), space.title())
}

/// Write a network in Pajek arc-list form.
///
/// ```text
/// *Vertices <count>
/// <id> "<station_code>"
/// *Arcs <edge_count>
/// <src_id> <dst_id> <weight>
/// ```
pub fn write_network<W: Write>(network: &Network, mode: WeightMode, out: &mut W) -> io::Result<()> {
    writeln!(out, "*Vertices {}", network.vertices.len())?;

    let mut ids: HashMap<&Station, usize> = HashMap::with_capacity(network.vertices.len());
    for (i, station) in network.vertices.iter().enumerate() {
        let id = i + 1;
        ids.insert(station, id);
        writeln!(out, "{id} \"{station}\"")?;
    }

    writeln!(out, "*Arcs {}", network.edges.len())?;
    for ((source, target), stats) in &network.edges {
        let src = ids[source];
        let dst = ids[target];
        match mode {
            WeightMode::Dsn => writeln!(out, "{src} {dst} {}", stats.dsn)?,
            WeightMode::Dtn => {
                let weight = match stats.mean_travel_minutes() {
                    Some(mean) if mean > 0.0 => 1.0 / mean,
                    _ => 0.0,
                };
                writeln!(out, "{src} {dst} {weight:.2}")?;
            }
        }
    }

    Ok(())
}

/// Write a network to a file path.
pub fn write_network_file<P: AsRef<Path>>(
    network: &Network,
    mode: WeightMode,
    path: P,
) -> io::Result<()> {
    let file = File::create(path.as_ref())?;
    let mut out = BufWriter::new(file);
    write_network(network, mode, &mut out)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StopKind, TimetableRow, WallClock};
    use crate::network::builder::build_network;
    use crate::timetable::Timetable;

    fn render(network: &Network, mode: WeightMode) -> String {
        let mut buf = Vec::new();
        write_network(network, mode, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn time(s: &str) -> Option<WallClock> {
        Some(WallClock::parse_hms(s).unwrap())
    }

    fn push_leg(tt: &mut Timetable, id: &str, from: &str, dep: &str, to: &str, arr: &str) {
        tt.push_row(
            id,
            TimetableRow::with_times(Station::new(from), StopKind::Begin, None, time(dep)),
        );
        tt.push_row(
            id,
            TimetableRow::with_times(Station::new(to), StopKind::End, time(arr), None),
        );
    }

    #[test]
    fn empty_network_is_well_formed() {
        let network = Network::new();
        assert_eq!(render(&network, WeightMode::Dsn), "*Vertices 0\n*Arcs 0\n");
        assert_eq!(render(&network, WeightMode::Dtn), "*Vertices 0\n*Arcs 0\n");
    }

    #[test]
    fn vertex_ids_ascend_lexicographically() {
        let mut network = Network::new();
        for code in ["ZZZ", "AAA", "MMM"] {
            network.vertices.insert(Station::new(code));
        }

        assert_eq!(
            render(&network, WeightMode::Dsn),
            "*Vertices 3\n\
             1 \"AAA\"\n\
             2 \"MMM\"\n\
             3 \"ZZZ\"\n\
             *Arcs 0\n"
        );
    }

    #[test]
    fn dsn_weight_is_the_raw_count() {
        let mut tt = Timetable::new();
        push_leg(&mut tt, "A", "X", "05:00:00", "Y", "05:10:00");
        push_leg(&mut tt, "B", "X", "06:00:00", "Y", "06:15:00");
        let network = build_network(&tt, SpaceKind::Stops);

        assert_eq!(
            render(&network, WeightMode::Dsn),
            "*Vertices 2\n\
             1 \"X\"\n\
             2 \"Y\"\n\
             *Arcs 1\n\
             1 2 2\n"
        );
    }

    #[test]
    fn dtn_weight_is_reciprocal_mean_minutes() {
        // Two samples of 90s and 30s: mean 60s = 1 minute, weight 1.00
        let mut tt = Timetable::new();
        push_leg(&mut tt, "A", "X", "05:00:00", "Y", "05:01:30");
        push_leg(&mut tt, "B", "X", "06:00:00", "Y", "06:00:30");
        let network = build_network(&tt, SpaceKind::Stops);

        let text = render(&network, WeightMode::Dtn);
        assert!(text.ends_with("1 2 1.00\n"), "unexpected output: {text}");
    }

    #[test]
    fn dtn_weight_without_samples_is_zero() {
        let mut tt = Timetable::new();
        tt.push_row("A", TimetableRow::new(Station::new("X"), StopKind::Begin));
        tt.push_row("A", TimetableRow::new(Station::new("Y"), StopKind::End));
        let network = build_network(&tt, SpaceKind::Stops);

        let text = render(&network, WeightMode::Dtn);
        assert!(text.ends_with("1 2 0.00\n"), "unexpected output: {text}");
    }

    #[test]
    fn arc_count_is_distinct_edges_not_occurrences() {
        let mut tt = Timetable::new();
        push_leg(&mut tt, "A", "X", "05:00:00", "Y", "05:10:00");
        push_leg(&mut tt, "B", "X", "06:00:00", "Y", "06:10:00");
        push_leg(&mut tt, "C", "Y", "07:00:00", "X", "07:10:00");
        let network = build_network(&tt, SpaceKind::Stops);

        let text = render(&network, WeightMode::Dsn);
        assert!(text.contains("*Arcs 2\n"), "unexpected output: {text}");
    }

    #[test]
    fn output_is_deterministic() {
        let mut tt = Timetable::new();
        push_leg(&mut tt, "A", "QQQ", "05:00:00", "BBB", "05:10:00");
        push_leg(&mut tt, "B", "BBB", "06:00:00", "AAA", "06:10:00");

        let first = build_network(&tt, SpaceKind::Stops);
        let second = build_network(&tt, SpaceKind::Stops);
        assert_eq!(
            render(&first, WeightMode::Dtn),
            render(&second, WeightMode::Dtn)
        );
    }

    #[test]
    fn writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(output_file_name(SpaceKind::Stops, WeightMode::Dsn));

        let mut tt = Timetable::new();
        push_leg(&mut tt, "A", "X", "05:00:00", "Y", "05:10:00");
        let network = build_network(&tt, SpaceKind::Stops);

        write_network_file(&network, WeightMode::Dsn, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "*Vertices 2\n\
             1 \"X\"\n\
             2 \"Y\"\n\
             *Arcs 1\n\
             1 2 1\n"
        );
    }

    #[test]
    fn file_names() {
        assert_eq!(
            output_file_name(SpaceKind::Stations, WeightMode::Dsn),
            "DSN_SpaceStations.net"
        );
        assert_eq!(
            output_file_name(SpaceKind::Changes, WeightMode::Dtn),
            "DTN_SpaceChanges.net"
        );
    }
}
