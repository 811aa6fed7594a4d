//! Adjacency structure over one query's open stations.

use tracing::trace;

use super::error::GraphError;
use super::lookup::StationLookup;
use crate::domain::{Station, StationId};

/// Undirected station graph.
///
/// Consecutive stations on a line are adjacent, and so are stations sharing
/// a display name on different lines (interchanges). The graph owns the
/// stations it was built from; `StationId(i)` is the `i`th station.
#[derive(Debug, Clone)]
pub struct NetworkGraph {
    stations: Vec<Station>,
    adjacency: Vec<Vec<StationId>>,
}

impl NetworkGraph {
    /// Build the graph from the open stations and their lookups.
    ///
    /// Fails if station ids are not exactly `0..stations.len()` in order, or
    /// if the lookup refers to a station outside that range.
    pub fn build(stations: Vec<Station>, lookup: &StationLookup) -> Result<Self, GraphError> {
        for (position, station) in stations.iter().enumerate() {
            if station.id.0 != position {
                return Err(GraphError::NonContiguousIds {
                    position,
                    id: station.id,
                });
            }
        }

        let count = stations.len();
        let mut referenced = lookup
            .lines()
            .flat_map(|(_, ids)| ids)
            .chain(lookup.names().flatten());
        if let Some(&id) = referenced.find(|id| id.0 >= count) {
            return Err(GraphError::UnknownStation { id, count });
        }

        let mut graph = Self {
            adjacency: vec![Vec::new(); stations.len()],
            stations,
        };

        for (_, on_line) in lookup.lines() {
            for pair in on_line.windows(2) {
                graph.connect(pair[0], pair[1]);
            }
        }

        for same_name in lookup.names() {
            for (i, &a) in same_name.iter().enumerate() {
                for &b in &same_name[i + 1..] {
                    graph.connect(a, b);
                }
            }
        }

        trace!(
            stations = graph.len(),
            edges = graph.edge_count(),
            "built network graph"
        );
        Ok(graph)
    }

    /// Add an undirected edge, ignoring duplicates. Both ids are in range.
    fn connect(&mut self, a: StationId, b: StationId) {
        if a == b {
            return;
        }
        if !self.adjacency[a.0].contains(&b) {
            self.adjacency[a.0].push(b);
        }
        if !self.adjacency[b.0].contains(&a) {
            self.adjacency[b.0].push(a);
        }
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Returns true if the graph has no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// All stations, indexed by id.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Look up a station by id.
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id.0)
    }

    /// Neighbours of a station, in insertion order.
    ///
    /// Unknown ids have no neighbours.
    pub fn neighbours(&self, id: StationId) -> &[StationId] {
        self.adjacency.get(id.0).map(Vec::as_slice).unwrap_or(&[])
    }
}
