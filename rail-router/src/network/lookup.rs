//! Name and line lookups over one query's open stations.

use std::collections::BTreeMap;

use crate::domain::{LineCode, Station, StationId, name_key};

/// Name → stations and line → stations lookups.
///
/// Names are matched case-insensitively. Stations on a line are ordered by
/// sequence number.
#[derive(Debug, Clone, Default)]
pub struct StationLookup {
    by_name: BTreeMap<String, Vec<StationId>>,
    by_line: BTreeMap<LineCode, Vec<StationId>>,
}

impl StationLookup {
    /// Build the lookups for a set of open stations.
    pub fn new(stations: &[Station]) -> Self {
        let mut by_name: BTreeMap<String, Vec<StationId>> = BTreeMap::new();
        let mut by_line: BTreeMap<LineCode, Vec<&Station>> = BTreeMap::new();

        for station in stations {
            by_name
                .entry(station.name_key())
                .or_default()
                .push(station.id);
            by_line.entry(station.line()).or_default().push(station);
        }

        let by_line = by_line
            .into_iter()
            .map(|(line, mut on_line)| {
                on_line.sort_by_key(|s| s.number());
                (line, on_line.into_iter().map(|s| s.id).collect())
            })
            .collect();

        Self { by_name, by_line }
    }

    /// Stations with the given display name, in list order.
    ///
    /// Returns an empty slice if no open station has that name.
    pub fn named(&self, name: &str) -> &[StationId] {
        self.by_name
            .get(&name_key(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Stations on a line, ordered by sequence number.
    pub fn on_line(&self, line: &LineCode) -> &[StationId] {
        self.by_line.get(line).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every line with at least one open station, in code order.
    pub fn lines(&self) -> impl Iterator<Item = (&LineCode, &[StationId])> {
        self.by_line.iter().map(|(line, ids)| (line, ids.as_slice()))
    }

    /// Every distinct name's stations, in name order.
    pub fn names(&self) -> impl Iterator<Item = &[StationId]> {
        self.by_name.values().map(Vec::as_slice)
    }
}
