//! Randomized fixture generation.
//!
//! Produces random station coordinate tables, unique train codes and a
//! random timetable conforming to the input schema. Every function takes
//! `&mut impl Rng`, so callers inject a seeded generator (the CLI uses
//! `ChaCha8Rng`) and identical seeds produce identical fixtures.

use std::collections::HashSet;
use std::fs::File;
use std::io;
use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::domain::{Station, StopKind, TimetableRow, WallClock};
use crate::timetable::Timetable;

/// Tunables for fixture generation.
///
/// The departure window plus the maximum travel duration must stay within
/// one day; generated times wrap around midnight without carrying a date.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of stations to generate.
    pub num_stations: usize,
    /// Number of trains to generate.
    pub num_trains: usize,
    /// Window the first departure of each train is drawn from.
    pub departure_window: (WallClock, WallClock),
    /// Half-open range of total journey durations, in minutes.
    pub travel_minutes: (i64, i64),
    /// Probability that an intermediate visit is a stop rather than a pass.
    pub stop_probability: f64,
    /// Inclusive range of dwell times at intermediate stops, in minutes.
    pub dwell_minutes: (i64, i64),
    /// Latitude range, degrees.
    pub lat_range: (f64, f64),
    /// Longitude range, degrees.
    pub lon_range: (f64, f64),
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_stations: 10,
            num_trains: 5,
            departure_window: (
                WallClock::MIDNIGHT.wrapping_add_minutes(5 * 60),
                WallClock::MIDNIGHT.wrapping_add_minutes(12 * 60),
            ),
            travel_minutes: (60, 120),
            stop_probability: 0.7,
            dwell_minutes: (1, 3),
            lat_range: (10.0, 50.0),
            lon_range: (10.0, 50.0),
        }
    }
}

/// One generated station with its coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationRecord {
    /// Randomly permuted identifier
    #[serde(rename = "Station ID")]
    pub id: usize,
    /// Unique 3-letter code
    #[serde(rename = "Station Code")]
    pub code: String,
    /// Display name (equals the code)
    #[serde(rename = "Station Name")]
    pub name: String,
    #[serde(rename = "Longitude (degrees)")]
    pub longitude: f64,
    #[serde(rename = "Latitude (degrees)")]
    pub latitude: f64,
}

/// One generated train with its overall journey span.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainPlan {
    /// Unique code: `R` or `E` followed by two digits
    pub code: String,
    /// Departure from the first station
    pub first_departure: WallClock,
    /// Arrival at the last station
    pub last_arrival: WallClock,
}

/// Generate a unique 3-letter station code, recording it in `existing`.
pub fn generate_station_code(rng: &mut impl Rng, existing: &mut HashSet<String>) -> String {
    loop {
        let code: String = (0..3)
            .map(|_| rng.gen_range(b'A'..=b'Z') as char)
            .collect();
        if existing.insert(code.clone()) {
            return code;
        }
    }
}

/// Generate `num_stations` stations with uniform coordinates and randomly
/// permuted identifiers.
pub fn generate_stations(rng: &mut impl Rng, config: &GeneratorConfig) -> Vec<StationRecord> {
    let mut existing = HashSet::new();
    let codes: Vec<String> = (0..config.num_stations)
        .map(|_| generate_station_code(rng, &mut existing))
        .collect();

    let mut ids: Vec<usize> = (0..config.num_stations).collect();
    ids.shuffle(rng);

    codes
        .into_iter()
        .zip(ids)
        .map(|(code, id)| StationRecord {
            id,
            name: code.clone(),
            code,
            longitude: rng.gen_range(config.lon_range.0..config.lon_range.1),
            latitude: rng.gen_range(config.lat_range.0..config.lat_range.1),
        })
        .collect()
}

/// Generate a unique train code: `R` or `E` followed by two digits.
///
/// The code space has only 200 values, so callers keep `num_trains` well
/// below that.
pub fn generate_train_code(rng: &mut impl Rng, existing: &mut HashSet<String>) -> String {
    loop {
        let prefix = if rng.gen_bool(0.5) { 'R' } else { 'E' };
        let code = format!("{prefix}{:02}", rng.gen_range(0..100));
        if existing.insert(code.clone()) {
            return code;
        }
    }
}

/// Generate `num_trains` trains, each departing uniformly within the
/// configured window with a journey duration drawn from `travel_minutes`.
pub fn generate_trains(rng: &mut impl Rng, config: &GeneratorConfig) -> Vec<TrainPlan> {
    let (window_start, window_end) = config.departure_window;
    let window_minutes = window_end.signed_seconds_since(window_start) / 60;

    let mut existing = HashSet::new();
    (0..config.num_trains)
        .map(|_| {
            let code = generate_train_code(rng, &mut existing);
            let first_departure =
                window_start.wrapping_add_minutes(rng.gen_range(0..window_minutes));
            let travel = rng.gen_range(config.travel_minutes.0..config.travel_minutes.1);
            TrainPlan {
                code,
                first_departure,
                last_arrival: first_departure.wrapping_add_minutes(travel),
            }
        })
        .collect()
}

/// Generate a timetable: every train visits a random subset (at least 2)
/// of the stations in random order, with intermediate visit times uniform
/// in the journey span. Intermediate visits are stops (with a dwell) with
/// probability `stop_probability`, otherwise passes.
pub fn generate_timetable(
    rng: &mut impl Rng,
    stations: &[StationRecord],
    trains: &[TrainPlan],
    config: &GeneratorConfig,
) -> Timetable {
    assert!(
        stations.len() >= 2,
        "route generation needs at least 2 stations"
    );

    let mut timetable = Timetable::new();

    for plan in trains {
        let total_seconds = plan.last_arrival.signed_seconds_since(plan.first_departure);

        let num_visits = rng.gen_range(2..=stations.len());
        let mut route: Vec<&StationRecord> =
            stations.choose_multiple(rng, num_visits).collect();
        route.shuffle(rng);

        // Visit offsets from the first departure, in seconds: fixed at the
        // endpoints, uniform (sorted) in between.
        let mut offsets = vec![0.0];
        if num_visits > 2 {
            let mut intermediate: Vec<f64> = (0..num_visits - 2)
                .map(|_| rng.gen_range(0.0..total_seconds as f64))
                .collect();
            intermediate.sort_by(f64::total_cmp);
            offsets.extend(intermediate);
        }
        offsets.push(total_seconds as f64);

        timetable.push_row(
            &plan.code,
            TimetableRow::with_times(
                Station::new(&route[0].code),
                StopKind::Begin,
                None,
                Some(plan.first_departure),
            ),
        );

        for (record, offset) in route.iter().zip(&offsets).skip(1).take(num_visits - 2) {
            let arrival = plan.first_departure.wrapping_add_seconds(*offset as i64);
            let (stop_kind, departure) = if rng.gen_bool(config.stop_probability) {
                let dwell = rng.gen_range(config.dwell_minutes.0..=config.dwell_minutes.1);
                (StopKind::Stop, arrival.wrapping_add_minutes(dwell))
            } else {
                (StopKind::Pass, arrival)
            };
            timetable.push_row(
                &plan.code,
                TimetableRow::with_times(
                    Station::new(&record.code),
                    stop_kind,
                    Some(arrival),
                    Some(departure),
                ),
            );
        }

        timetable.push_row(
            &plan.code,
            TimetableRow::with_times(
                Station::new(&route[num_visits - 1].code),
                StopKind::End,
                Some(plan.last_arrival),
                None,
            ),
        );
    }

    timetable
}

/// Write station records as a semicolon-delimited table.
pub fn write_stations<W: io::Write>(stations: &[StationRecord], out: W) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);
    for record in stations {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write station records to a file path.
pub fn write_stations_file<P: AsRef<Path>>(
    stations: &[StationRecord],
    path: P,
) -> Result<(), csv::Error> {
    let file = File::create(path.as_ref())?;
    write_stations(stations, io::BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn station_codes_are_unique_uppercase_triples() {
        let mut r = rng(1);
        let stations = generate_stations(&mut r, &GeneratorConfig::default());

        assert_eq!(stations.len(), 10);
        let codes: HashSet<&str> = stations.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes.len(), 10);
        for station in &stations {
            assert_eq!(station.code.len(), 3);
            assert!(station.code.bytes().all(|b| b.is_ascii_uppercase()));
            assert_eq!(station.name, station.code);
        }
    }

    #[test]
    fn station_ids_are_a_permutation() {
        let mut r = rng(2);
        let stations = generate_stations(&mut r, &GeneratorConfig::default());

        let mut ids: Vec<usize> = stations.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn coordinates_stay_in_range() {
        let mut r = rng(3);
        let config = GeneratorConfig::default();
        for station in generate_stations(&mut r, &config) {
            assert!(station.latitude >= config.lat_range.0);
            assert!(station.latitude < config.lat_range.1);
            assert!(station.longitude >= config.lon_range.0);
            assert!(station.longitude < config.lon_range.1);
        }
    }

    #[test]
    fn train_codes_match_the_pattern() {
        let mut r = rng(4);
        let trains = generate_trains(&mut r, &GeneratorConfig::default());

        assert_eq!(trains.len(), 5);
        let codes: HashSet<&str> = trains.iter().map(|t| t.code.as_str()).collect();
        assert_eq!(codes.len(), 5);
        for train in &trains {
            let bytes = train.code.as_bytes();
            assert_eq!(bytes.len(), 3);
            assert!(bytes[0] == b'R' || bytes[0] == b'E');
            assert!(bytes[1].is_ascii_digit() && bytes[2].is_ascii_digit());
        }
    }

    #[test]
    fn journeys_span_the_configured_duration() {
        let mut r = rng(5);
        let config = GeneratorConfig::default();
        for train in generate_trains(&mut r, &config) {
            let minutes = train.last_arrival.signed_seconds_since(train.first_departure) / 60;
            assert!(minutes >= config.travel_minutes.0);
            assert!(minutes < config.travel_minutes.1);
        }
    }

    #[test]
    fn timetable_rows_are_well_formed() {
        let mut r = rng(6);
        let config = GeneratorConfig::default();
        let stations = generate_stations(&mut r, &config);
        let trains = generate_trains(&mut r, &config);
        let timetable = generate_timetable(&mut r, &stations, &trains, &config);

        assert_eq!(timetable.train_count(), trains.len());
        for (train, plan) in timetable.trains().iter().zip(&trains) {
            assert_eq!(train.id, plan.code);
            assert!(train.rows.len() >= 2);

            let first = &train.rows[0];
            assert_eq!(first.stop_kind, StopKind::Begin);
            assert!(first.arrival.is_none());
            assert_eq!(first.departure, Some(plan.first_departure));

            let last = train.rows.last().unwrap();
            assert_eq!(last.stop_kind, StopKind::End);
            assert_eq!(last.arrival, Some(plan.last_arrival));
            assert!(last.departure.is_none());

            for row in &train.rows[1..train.rows.len() - 1] {
                match row.stop_kind {
                    StopKind::Stop => assert!(row.departure > row.arrival),
                    StopKind::Pass => assert_eq!(row.departure, row.arrival),
                    other => panic!("unexpected intermediate stop kind {other}"),
                }
            }

            // Routes never revisit a station
            let visited: HashSet<&str> =
                train.rows.iter().map(|r| r.station.as_str()).collect();
            assert_eq!(visited.len(), train.rows.len());
        }
    }

    #[test]
    fn same_seed_reproduces_the_fixture() {
        let config = GeneratorConfig::default();

        let build = |seed| {
            let mut r = rng(seed);
            let stations = generate_stations(&mut r, &config);
            let trains = generate_trains(&mut r, &config);
            let timetable = generate_timetable(&mut r, &stations, &trains, &config);
            (stations, trains, timetable)
        };

        let (stations_a, trains_a, tt_a) = build(42);
        let (stations_b, trains_b, tt_b) = build(42);
        assert_eq!(stations_a, stations_b);
        assert_eq!(trains_a, trains_b);
        assert_eq!(tt_a.trains(), tt_b.trains());

        let (stations_c, _, _) = build(43);
        assert_ne!(stations_a, stations_c);
    }

    #[test]
    fn generated_timetable_roundtrips_through_the_reader() {
        let mut r = rng(7);
        let config = GeneratorConfig::default();
        let stations = generate_stations(&mut r, &config);
        let trains = generate_trains(&mut r, &config);
        let timetable = generate_timetable(&mut r, &stations, &trains, &config);

        let mut buf = Vec::new();
        crate::timetable::write_timetable(&timetable, &mut buf).unwrap();
        let reread = crate::timetable::read_timetable(buf.as_slice()).unwrap();

        assert_eq!(reread.trains(), timetable.trains());
    }

    #[test]
    fn stations_csv_has_the_expected_header() {
        let mut r = rng(8);
        let stations = generate_stations(&mut r, &GeneratorConfig::default());

        let mut buf = Vec::new();
        write_stations(&stations, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "Station ID;Station Code;Station Name;Longitude (degrees);Latitude (degrees)"
        );
        assert_eq!(text.lines().count(), 11);
    }
}
