//! Query handling: from names and a start time to a route.

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::config::RouterConfig;
use crate::network::{GraphError, LoadError, NetworkGraph, StationLookup, StationMaster};
use crate::planner::{CostError, CostModel, Route, RouteSelector, SearchError, ShortestPathEngine};
use crate::response;

/// Accepted start time format, e.g. "2021-01-28T07:00".
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Shown when the start time does not parse.
pub const INVALID_DATE_TIME_MESSAGE: &str = "Invalid date time entered.";
/// Shown when a station name matches no open station.
pub const INVALID_STATION_MESSAGE: &str =
    "Source or destination station(s) does not exist at this point in time";
/// Shown when no route connects the stations.
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "No route found";

/// Errors from answering a query.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The start time could not be parsed
    #[error("invalid date time {0:?}")]
    InvalidDateTime(String),

    /// No open station has this name at the start time
    #[error("no open station named {name:?}")]
    UnknownStation { name: String },

    /// No route connects any source to any destination
    #[error("no route from {from:?} to {to:?}")]
    RouteNotFound { from: String, to: String },

    /// The open station set is inconsistent
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The search failed
    #[error(transparent)]
    Search(#[from] SearchError),

    /// The cost table does not cover the open network
    #[error(transparent)]
    Cost(#[from] CostError),
}

impl QueryError {
    /// The message shown to the user for expected outcomes.
    ///
    /// Returns `None` for configuration and data defects, which should be
    /// treated as fatal.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            QueryError::InvalidDateTime(_) => Some(INVALID_DATE_TIME_MESSAGE),
            QueryError::UnknownStation { .. } => Some(INVALID_STATION_MESSAGE),
            QueryError::RouteNotFound { .. } => Some(ROUTE_NOT_FOUND_MESSAGE),
            QueryError::Graph(_) | QueryError::Search(_) | QueryError::Cost(_) => None,
        }
    }
}

/// Errors from setting up a router.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Cost(#[from] CostError),
}

/// Answers fastest-route queries against a station master list.
#[derive(Debug, Clone)]
pub struct Router {
    master: StationMaster,
    costs: CostModel,
}

impl Router {
    /// Create a router.
    pub fn new(master: StationMaster, costs: CostModel) -> Self {
        Self { master, costs }
    }

    /// Load stations and costs as configured.
    pub fn from_config(config: &RouterConfig) -> Result<Self, SetupError> {
        let master = StationMaster::from_path(&config.stations_path)?;
        let costs = CostModel::new(config.cost_table()?);
        Ok(Self::new(master, costs))
    }

    /// The station master list.
    pub fn master(&self) -> &StationMaster {
        &self.master
    }

    /// Find the fastest route between two station names, leaving at `start`.
    ///
    /// Only stations open before `start` take part. Names are matched
    /// case-insensitively and may stand for several stations at an
    /// interchange.
    pub fn find_best_route(
        &self,
        source: &str,
        destination: &str,
        start: NaiveDateTime,
    ) -> Result<Route, QueryError> {
        let stations = self.master.open_at(start);
        let lookup = StationLookup::new(&stations);

        let sources = lookup.named(source).to_vec();
        let destinations = lookup.named(destination).to_vec();
        for (name, candidates) in [(source, &sources), (destination, &destinations)] {
            if candidates.is_empty() {
                info!(name, %start, "station not open");
                return Err(QueryError::UnknownStation {
                    name: name.to_string(),
                });
            }
        }

        self.costs
            .table()
            .check_covers(lookup.lines().map(|(line, _)| line))?;

        let graph = NetworkGraph::build(stations, &lookup)?;
        debug!(
            stations = graph.len(),
            edges = graph.edge_count(),
            sources = sources.len(),
            destinations = destinations.len(),
            "network ready"
        );

        let selector = RouteSelector::new(ShortestPathEngine::new(&graph, &self.costs));
        match selector.select_best(&sources, &destinations, start)? {
            Some(route) => Ok(route),
            None => {
                info!(source, destination, %start, "route not found");
                Err(QueryError::RouteNotFound {
                    from: source.to_string(),
                    to: destination.to_string(),
                })
            }
        }
    }

    /// Answer a query given as text, returning the rendered route.
    pub fn handle_query(
        &self,
        source: &str,
        destination: &str,
        start: &str,
    ) -> Result<String, QueryError> {
        let start = parse_start(start)?;
        let route = self.find_best_route(source, destination, start)?;
        Ok(response::render(&route))
    }

    /// Like [`Router::handle_query`], but expected failures become their user
    /// message. Only defects are returned as errors.
    pub fn respond(
        &self,
        source: &str,
        destination: &str,
        start: &str,
    ) -> Result<String, QueryError> {
        match self.handle_query(source, destination, start) {
            Ok(text) => Ok(text),
            Err(err) => match err.user_message() {
                Some(message) => Ok(message.to_string()),
                None => Err(err),
            },
        }
    }
}

/// Parse a start time such as "2021-01-28T07:00".
pub fn parse_start(s: &str) -> Result<NaiveDateTime, QueryError> {
    NaiveDateTime::parse_from_str(s.trim(), DATE_TIME_FORMAT).map_err(|_| {
        info!(input = s, "start date time cannot be parsed");
        QueryError::InvalidDateTime(s.to_string())
    })
}
