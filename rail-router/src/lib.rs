//! Fastest-route planner for a rail network.
//!
//! Answers: "what is the fastest way from station A to station B if I leave
//! at time T?" Travel costs depend on the time of day, and which stations
//! exist depends on the date, so every query builds its own network.

pub mod config;
pub mod domain;
pub mod network;
pub mod planner;
pub mod query;
pub mod response;

pub use config::RouterConfig;
pub use query::{QueryError, Router, SetupError};
