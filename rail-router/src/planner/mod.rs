//! Fastest-route planning over a time-dependent network.
//!
//! Edge costs depend on the time of day at which a hop is made, so the
//! search is a Dijkstra variant that prices each edge at the simulated
//! arrival time at its start. The selector runs the search for every
//! candidate pair of stations behind a source and destination name.

mod cost;
mod route;
mod search;
mod select;

pub use cost::{CostError, CostKey, CostModel, CostTable, Interval, LINE_CHANGE};
pub use route::Route;
pub use search::{SearchError, SearchTree, ShortestPathEngine};
pub use select::RouteSelector;
