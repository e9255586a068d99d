//! Station code type.

use std::fmt;

/// A station code, trimmed of surrounding whitespace at construction.
///
/// Codes are compared and ordered exactly as written (after trimming);
/// two codes differing only in case are distinct stations in the vertex
/// set. The [`normalized`](Station::normalized) key exists solely for
/// within-train deduplication under the clique strategy.
///
/// # Examples
///
/// ```
/// use timetable_net::domain::Station;
///
/// let s = Station::new("  ABC ");
/// assert_eq!(s.as_str(), "ABC");
///
/// // Case is preserved and significant
/// assert_ne!(Station::new("abc"), Station::new("ABC"));
///
/// // The normalized key folds case
/// assert_eq!(Station::new("abc").normalized(), Station::new("ABC").normalized());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Station(String);

impl Station {
    /// Create a station code, trimming surrounding whitespace.
    pub fn new(code: impl AsRef<str>) -> Self {
        Station(code.as_ref().trim().to_owned())
    }

    /// Returns the trimmed station code.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Normalized deduplication key: trimmed and ASCII-uppercased.
    pub fn normalized(&self) -> String {
        self.0.to_ascii_uppercase()
    }
}

impl fmt::Debug for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Station({})", self.0)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
