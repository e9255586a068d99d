//! Network construction and serialization.
//!
//! Turns a [`Timetable`](crate::timetable::Timetable) into a directed
//! weighted [`Network`] under one of three space abstractions, and writes
//! the result in Pajek arc-list form under either weighting scheme.

pub mod builder;
pub mod edge;
pub mod pajek;
pub mod space;

pub use builder::{EdgeKey, Network, build_network, filter_route};
pub use edge::EdgeStats;
pub use pajek::{WeightMode, output_file_name, write_network, write_network_file};
pub use space::{EdgeStrategy, SpaceKind, UnknownSpace};
