//! CSV emission for timetables, mirroring the reader's schema.

use std::fs::File;
use std::io;
use std::path::Path;

use super::{Timetable, reader::REQUIRED_COLUMNS};
use crate::domain::WallClock;

/// Write a timetable as a semicolon-delimited table in the input schema.
pub fn write_timetable<W: io::Write>(timetable: &Timetable, out: W) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    writer.write_record(REQUIRED_COLUMNS)?;
    for train in timetable.trains() {
        for row in &train.rows {
            let arrival = format_optional_time(row.arrival);
            let departure = format_optional_time(row.departure);
            writer.write_record([
                train.id.as_str(),
                row.station.as_str(),
                arrival.as_str(),
                departure.as_str(),
                row.stop_kind.as_str(),
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Write a timetable to a file path.
pub fn write_timetable_file<P: AsRef<Path>>(
    timetable: &Timetable,
    path: P,
) -> Result<(), csv::Error> {
    let file = File::create(path.as_ref())?;
    write_timetable(timetable, io::BufWriter::new(file))
}

fn format_optional_time(time: Option<WallClock>) -> String {
    time.map(|t| t.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Station, StopKind, TimetableRow};
    use crate::timetable::read_timetable;

    fn sample() -> Timetable {
        let mut tt = Timetable::new();
        tt.push_row(
            "R01",
            TimetableRow::with_times(
                Station::new("AAA"),
                StopKind::Begin,
                None,
                WallClock::parse_hms("05:00:00").ok(),
            ),
        );
        tt.push_row(
            "R01",
            TimetableRow::with_times(
                Station::new("BBB"),
                StopKind::End,
                WallClock::parse_hms("05:30:00").ok(),
                None,
            ),
        );
        tt
    }

    #[test]
    fn writes_header_and_rows() {
        let mut buf = Vec::new();
        write_timetable(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(
            text,
            "Train number;Station;Arrival time;Departure time;Stop type\n\
             R01;AAA;;05:00:00;begin\n\
             R01;BBB;05:30:00;;end\n"
        );
    }

    #[test]
    fn roundtrips_through_reader() {
        let mut buf = Vec::new();
        write_timetable(&sample(), &mut buf).unwrap();

        let reread = read_timetable(buf.as_slice()).unwrap();
        assert_eq!(reread.train_count(), 1);
        assert_eq!(reread.trains()[0].rows, sample().trains()[0].rows);
    }
}
