//! Route reconstruction from a search tree.

use chrono::NaiveDateTime;

use super::search::SearchTree;
use crate::domain::{Station, StationId, TimeOfDay};
use crate::network::NetworkGraph;

/// A fastest route between two stations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    minutes: i64,
    stations: Vec<Station>,
    time_of_day: TimeOfDay,
}

impl Route {
    /// Create a route.
    pub fn new(minutes: i64, stations: Vec<Station>, time_of_day: TimeOfDay) -> Self {
        Self {
            minutes,
            stations,
            time_of_day,
        }
    }

    /// Build the route to `destination` from a search tree.
    ///
    /// Returns `None` if the destination was not reached. The time of day is
    /// that of `start`, not of arrival.
    pub fn assemble(
        destination: StationId,
        start: NaiveDateTime,
        tree: &SearchTree,
        graph: &NetworkGraph,
    ) -> Option<Self> {
        let arrival = tree.arrival(destination)?;
        let minutes = arrival.signed_duration_since(start).num_minutes();

        let mut stations = Vec::new();
        let mut current = Some(destination);
        while let Some(id) = current {
            // Predecessor chains are acyclic, so this is only a guard against
            // a tree built for a different graph.
            if stations.len() > graph.len() {
                return None;
            }
            stations.push(graph.station(id)?.clone());
            current = tree.predecessor(id);
        }
        stations.reverse();

        Some(Self {
            minutes,
            stations,
            time_of_day: TimeOfDay::classify(start),
        })
    }

    /// Total journey time in whole minutes.
    pub fn minutes(&self) -> i64 {
        self.minutes
    }

    /// Stations from source to destination.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Time of day at departure.
    pub fn time_of_day(&self) -> TimeOfDay {
        self.time_of_day
    }

    /// First station.
    pub fn source(&self) -> Option<&Station> {
        self.stations.first()
    }

    /// Last station.
    pub fn destination(&self) -> Option<&Station> {
        self.stations.last()
    }

    /// Number of line changes along the route.
    pub fn change_count(&self) -> usize {
        self.stations
            .windows(2)
            .filter(|pair| pair[0].is_interchange_with(&pair[1]))
            .count()
    }
}
