//! Time-dependent shortest path search.
//!
//! A Dijkstra variant in which the cost of an edge depends on the time it is
//! entered: each hop is priced at the service interval in force at the
//! simulated arrival time at its start, so a journey that runs into peak
//! hours pays peak intervals from that point on.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use chrono::NaiveDateTime;
use tracing::{debug, trace};

use super::cost::{CostError, CostModel};
use crate::domain::StationId;
use crate::network::NetworkGraph;

/// Error from a shortest path search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The source is not a station of the graph
    #[error("station {0:?} is not in the network")]
    UnknownStation(StationId),

    /// The cost table is missing an entry the network needs
    #[error(transparent)]
    Cost(#[from] CostError),

    /// An arrival time fell outside the representable range
    #[error("arrival time out of range")]
    TimeOverflow,
}

/// Priority queue entry: a station and its best known arrival time when the
/// entry was pushed.
///
/// Ordered solely by arrival time, earliest first when used in a
/// [`BinaryHeap`]. Entries with equal arrival times pop in an unspecified
/// order.
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    station: StationId,
    arrival: NaiveDateTime,
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other.arrival.cmp(&self.arrival)
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.arrival == other.arrival
    }
}

impl Eq for SearchNode {}

/// Earliest arrival times and predecessors from one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTree {
    source: StationId,
    start: NaiveDateTime,
    arrival: Vec<Option<NaiveDateTime>>,
    predecessor: Vec<Option<StationId>>,
}

impl SearchTree {
    /// The station the search started from.
    pub fn source(&self) -> StationId {
        self.source
    }

    /// The departure time from the source.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Earliest arrival at `station`, or `None` if it cannot be reached.
    pub fn arrival(&self, station: StationId) -> Option<NaiveDateTime> {
        self.arrival.get(station.0).copied().flatten()
    }

    /// The station before `station` on its fastest path.
    ///
    /// `None` for the source and for unreachable stations.
    pub fn predecessor(&self, station: StationId) -> Option<StationId> {
        self.predecessor.get(station.0).copied().flatten()
    }

    /// Whether `station` can be reached at all.
    pub fn is_reachable(&self, station: StationId) -> bool {
        self.arrival(station).is_some()
    }

    /// Number of stations covered.
    pub fn len(&self) -> usize {
        self.arrival.len()
    }

    /// Returns true if the tree covers no stations.
    pub fn is_empty(&self) -> bool {
        self.arrival.is_empty()
    }
}

/// Single-source time-dependent Dijkstra over a [`NetworkGraph`].
pub struct ShortestPathEngine<'a> {
    graph: &'a NetworkGraph,
    costs: &'a CostModel,
}

impl<'a> ShortestPathEngine<'a> {
    /// Create an engine over a graph and cost model.
    pub fn new(graph: &'a NetworkGraph, costs: &'a CostModel) -> Self {
        Self { graph, costs }
    }

    /// The graph being searched.
    pub fn graph(&self) -> &'a NetworkGraph {
        self.graph
    }

    /// Find the earliest arrival at every station when leaving `source` at
    /// `start`.
    ///
    /// Stations are finalized in arrival order. Neighbours are re-queued
    /// after every relaxation, improved or not, instead of decreasing keys in
    /// place; stale entries for finalized stations are skipped on pop.
    pub fn search(
        &self,
        source: StationId,
        start: NaiveDateTime,
    ) -> Result<SearchTree, SearchError> {
        let n = self.graph.len();
        if source.0 >= n {
            return Err(SearchError::UnknownStation(source));
        }

        let mut arrival: Vec<Option<NaiveDateTime>> = vec![None; n];
        let mut predecessor: Vec<Option<StationId>> = vec![None; n];
        let mut finalized = vec![false; n];
        let mut finalized_count = 0;
        let mut pushes = 1;

        let mut queue = BinaryHeap::with_capacity(n);
        arrival[source.0] = Some(start);
        queue.push(SearchNode {
            station: source,
            arrival: start,
        });

        while finalized_count < n {
            let Some(node) = queue.pop() else {
                break;
            };
            let current = node.station;
            if finalized[current.0] {
                continue;
            }
            finalized[current.0] = true;
            finalized_count += 1;

            let (Some(current_arrival), Some(current_station)) =
                (arrival[current.0], self.graph.station(current))
            else {
                continue;
            };
            trace!(station = %current_station, arrival = %current_arrival, "finalized");

            for &next in self.graph.neighbours(current) {
                if finalized[next.0] {
                    continue;
                }
                let Some(next_station) = self.graph.station(next) else {
                    continue;
                };

                let interval = self.costs.edge_cost(
                    current_station.line(),
                    next_station.line(),
                    current_arrival,
                )?;

                if let Some(hop) = interval.duration() {
                    let candidate = current_arrival
                        .checked_add_signed(hop)
                        .ok_or(SearchError::TimeOverflow)?;
                    if arrival[next.0].is_none_or(|best| candidate < best) {
                        arrival[next.0] = Some(candidate);
                        predecessor[next.0] = Some(current);
                    }
                }

                if let Some(best) = arrival[next.0] {
                    queue.push(SearchNode {
                        station: next,
                        arrival: best,
                    });
                    pushes += 1;
                }
            }
        }

        debug!(
            source = ?source,
            finalized = finalized_count,
            stations = n,
            pushes,
            "search complete"
        );

        Ok(SearchTree {
            source,
            start,
            arrival,
            predecessor,
        })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{LineCode, Station, StationCode, TimeOfDay};
    use crate::network::StationLookup;
    use crate::planner::cost::{CostTable, Interval};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    const LINES: [&str; 3] = ["AA", "BB", "CC"];
    const NAMES: [&str; 5] = ["P", "Q", "R", "S", "T"];

    /// Saturday 10:00: every hop in these small networks stays non-peak.
    fn saturday_morning() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 1, 30)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn network() -> impl Strategy<Value = (Vec<(usize, usize)>, [u32; 3], u32)> {
        (
            prop::collection::vec((0..LINES.len(), 0..NAMES.len()), 1..9),
            [1u32..15, 1u32..15, 1u32..15],
            1u32..15,
        )
    }

    proptest! {
        /// With a fixed bucket, arrival times equal static shortest paths
        /// computed by Bellman-Ford over the same edges.
        #[test]
        fn matches_static_shortest_paths((layout, intervals, change) in network()) {
            let start = saturday_morning();
            let stations: Vec<Station> = layout
                .iter()
                .enumerate()
                .map(|(i, &(l, n))| {
                    let code = StationCode::parse(&format!("{}{}", LINES[l], i + 1)).unwrap();
                    Station::new(StationId(i), code, NAMES[n], start - chrono::Duration::days(1))
                })
                .collect();
            let lookup = StationLookup::new(&stations);
            let g = NetworkGraph::build(stations, &lookup).unwrap();

            let mut table = CostTable::new();
            for time_of_day in TimeOfDay::ALL {
                for (l, mins) in LINES.iter().zip(intervals) {
                    table = table.with_line(time_of_day, LineCode::parse(l).unwrap(), Interval::Minutes(mins));
                }
                table = table.with_line_change(time_of_day, Interval::Minutes(change));
            }
            let costs = CostModel::new(table);

            let weight = |a: StationId, b: StationId| -> i64 {
                let (sa, sb) = (g.station(a).unwrap(), g.station(b).unwrap());
                if sa.line() == sb.line() {
                    let idx = LINES.iter().position(|l| *l == sa.line().as_str()).unwrap();
                    i64::from(intervals[idx])
                } else {
                    i64::from(change)
                }
            };

            let n = g.len();
            let mut dist: Vec<Option<i64>> = vec![None; n];
            dist[0] = Some(0);
            for _ in 0..n {
                for a in 0..n {
                    let Some(da) = dist[a] else { continue };
                    for &b in g.neighbours(StationId(a)) {
                        let candidate = da + weight(StationId(a), b);
                        if dist[b.0].is_none_or(|db| candidate < db) {
                            dist[b.0] = Some(candidate);
                        }
                    }
                }
            }

            let tree = ShortestPathEngine::new(&g, &costs).search(StationId(0), start).unwrap();
            for (i, expected) in dist.iter().enumerate() {
                let got = tree
                    .arrival(StationId(i))
                    .map(|a| a.signed_duration_since(start).num_minutes());
                prop_assert_eq!(got, *expected, "station {}", i);
            }

            // Predecessor chains lead back to the source and are consistent
            // with the arrival times.
            for i in 0..n {
                if let Some(p) = tree.predecessor(StationId(i)) {
                    let hop = weight(p, StationId(i));
                    let before = tree.arrival(p).unwrap();
                    prop_assert_eq!(before + chrono::Duration::minutes(hop), tree.arrival(StationId(i)).unwrap());
                }
            }
        }
    }
}
