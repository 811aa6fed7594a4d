//! The station network as seen by one query.
//!
//! Which stations exist depends on the query's start time, so the open
//! station set, its lookups, and the adjacency structure are all rebuilt
//! for every query from the station master list.

mod error;
mod graph;
mod loader;
mod lookup;

pub use error::{GraphError, LoadError};
pub use graph::NetworkGraph;
pub use loader::{StationMaster, StationRecord, parse_opening_date};
pub use lookup::StationLookup;
