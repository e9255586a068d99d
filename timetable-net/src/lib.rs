//! Timetable-to-network transform.
//!
//! Converts an event-level train timetable (per-train station visits with
//! arrival/departure times and a stop classification) into directed,
//! weighted graphs under three "transportation space" abstractions, and
//! writes each graph in Pajek arc-list form for downstream network
//! analysis. A seeded fixture generator produces random timetables in the
//! input schema.

pub mod domain;
pub mod generate;
pub mod network;
pub mod timetable;
