//! Choosing the best route across candidate stations.
//!
//! A display name can refer to several physical stations (one per line at an
//! interchange), so a query names a set of candidate sources and a set of
//! candidate destinations.

use chrono::NaiveDateTime;
use tracing::debug;

use super::route::Route;
use super::search::{SearchError, ShortestPathEngine};
use crate::domain::StationId;

/// Runs the search for every (source, destination) pair and keeps the best.
pub struct RouteSelector<'a> {
    engine: ShortestPathEngine<'a>,
}

impl<'a> RouteSelector<'a> {
    /// Create a selector over an engine.
    pub fn new(engine: ShortestPathEngine<'a>) -> Self {
        Self { engine }
    }

    /// Find the fastest route from any of `sources` to any of `destinations`.
    ///
    /// Pairs are considered sources-major, destinations-minor. The first pair
    /// sets the initial best even if it has no route; a later pair replaces
    /// the best when it has a route taking no longer than the current best.
    /// Among equally fast routes the last pair considered therefore wins.
    pub fn select_best(
        &self,
        sources: &[StationId],
        destinations: &[StationId],
        start: NaiveDateTime,
    ) -> Result<Option<Route>, SearchError> {
        let graph = self.engine.graph();
        let mut best: Option<Route> = None;

        for &source in sources {
            // The tree from one source serves every destination.
            let tree = self.engine.search(source, start)?;

            for &destination in destinations {
                let candidate = Route::assemble(destination, start, &tree, graph);
                debug!(
                    source = ?source,
                    destination = ?destination,
                    minutes = candidate.as_ref().map(Route::minutes),
                    "candidate pair"
                );

                let replace = match (&best, &candidate) {
                    (None, _) => true,
                    (Some(current), Some(new)) => new.minutes() <= current.minutes(),
                    (Some(_), None) => false,
                };
                if replace {
                    best = candidate;
                }
            }
        }

        Ok(best)
    }
}
