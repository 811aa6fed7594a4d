//! Router configuration.

use std::path::PathBuf;

use crate::planner::{CostError, CostTable};

/// Default location of the station master list.
pub const DEFAULT_STATIONS_PATH: &str = "data/StationMap.csv";

/// Where the router gets its data from.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Path to the station master list CSV.
    pub stations_path: PathBuf,

    /// Optional JSON cost table replacing the built-in frequencies.
    pub costs_path: Option<PathBuf>,
}

impl RouterConfig {
    /// Create a configuration reading stations from `stations_path` and
    /// using the built-in cost table.
    pub fn new(stations_path: impl Into<PathBuf>) -> Self {
        Self {
            stations_path: stations_path.into(),
            costs_path: None,
        }
    }

    /// Use a cost table loaded from a JSON file.
    pub fn with_costs_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.costs_path = Some(path.into());
        self
    }

    /// Load the configured cost table.
    pub fn cost_table(&self) -> Result<CostTable, CostError> {
        match &self.costs_path {
            Some(path) => CostTable::from_json_file(path),
            None => Ok(CostTable::default()),
        }
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STATIONS_PATH)
    }
}
