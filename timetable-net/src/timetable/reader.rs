//! CSV ingestion for timetables.
//!
//! Input is a semicolon-delimited table with columns `Train number`,
//! `Station`, `Arrival time`, `Departure time` and `Stop type`. The column
//! set is validated before any row is processed; individual malformed
//! fields are tolerated per the rules in the crate docs.

use std::fs::File;
use std::io;
use std::path::Path;

use tracing::debug;

use super::Timetable;
use crate::domain::{Station, StopKind, TimetableRow, WallClock};

/// Column headers the input table must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "Train number",
    "Station",
    "Arrival time",
    "Departure time",
    "Stop type",
];

/// Errors from timetable ingestion.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// Could not open or read the input.
    #[error("failed to read timetable: {0}")]
    Io(#[from] io::Error),

    /// The CSV layer failed (malformed quoting, inconsistent records).
    #[error("failed to parse timetable: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("missing required column {name:?}")]
    MissingColumn { name: &'static str },
}

/// Positions of the required columns within the header row.
struct ColumnIndices {
    train: usize,
    station: usize,
    arrival: usize,
    departure: usize,
    stop_type: usize,
}

impl ColumnIndices {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, ReadError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(ReadError::MissingColumn { name })
        };
        Ok(Self {
            train: find(REQUIRED_COLUMNS[0])?,
            station: find(REQUIRED_COLUMNS[1])?,
            arrival: find(REQUIRED_COLUMNS[2])?,
            departure: find(REQUIRED_COLUMNS[3])?,
            stop_type: find(REQUIRED_COLUMNS[4])?,
        })
    }
}

/// Read a timetable from any reader.
///
/// The header row is validated up front: a missing required column fails
/// with [`ReadError::MissingColumn`] before any row is processed. Per row,
/// an empty or unparseable time field becomes an absent time, and a row
/// with an unknown stop type is skipped; both are logged at debug level.
pub fn read_timetable<R: io::Read>(input: R) -> Result<Timetable, ReadError> {
    let mut reader = csv::ReaderBuilder::new().delimiter(b';').from_reader(input);

    let columns = ColumnIndices::from_headers(reader.headers()?)?;

    let mut timetable = Timetable::new();
    let mut record = csv::StringRecord::new();

    while reader.read_record(&mut record)? {
        let line = reader.position().line();
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let stop_type = field(columns.stop_type);
        let Some(stop_kind) = StopKind::parse(stop_type) else {
            debug!(line, stop_type, "unknown stop type, skipping row");
            continue;
        };

        let row = TimetableRow::with_times(
            Station::new(field(columns.station)),
            stop_kind,
            parse_optional_time(field(columns.arrival), line, "arrival"),
            parse_optional_time(field(columns.departure), line, "departure"),
        );
        timetable.push_row(field(columns.train), row);
    }

    Ok(timetable)
}

/// Read a timetable from a file path.
pub fn read_timetable_file<P: AsRef<Path>>(path: P) -> Result<Timetable, ReadError> {
    let file = File::open(path.as_ref())?;
    read_timetable(io::BufReader::new(file))
}

/// Empty fields are absent; unparseable fields are absent too, so the
/// occurrence is still counted downstream while its travel-time sample
/// is dropped.
fn parse_optional_time(s: &str, line: u64, which: &'static str) -> Option<WallClock> {
    if s.is_empty() {
        return None;
    }
    match WallClock::parse_hms(s) {
        Ok(t) => Some(t),
        Err(err) => {
            debug!(line, which, value = s, %err, "unparseable time, dropping sample");
            None
        }
    }
}
