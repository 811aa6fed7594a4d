//! Network loading and construction errors.

use crate::domain::{InvalidStationCode, StationId};

/// Errors that can occur while reading the station master list.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be opened or read
    #[error("failed to read station list: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV itself is malformed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row carries a station code that does not parse
    #[error("row {row}: {source}")]
    InvalidCode {
        row: usize,
        #[source]
        source: InvalidStationCode,
    },
}

/// Errors from building the adjacency structure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Station ids must be exactly 0..N-1 in list order
    #[error("station at position {position} has id {id:?}; ids must be contiguous from zero")]
    NonContiguousIds { position: usize, id: StationId },

    /// The lookup refers to a station outside the station list
    #[error("lookup refers to {id:?} but only {count} stations were given")]
    UnknownStation { id: StationId, count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GraphError::NonContiguousIds {
            position: 2,
            id: StationId(5),
        };
        assert_eq!(
            err.to_string(),
            "station at position 2 has id StationId(5); ids must be contiguous from zero"
        );

        let err = GraphError::UnknownStation {
            id: StationId(7),
            count: 3,
        };
        assert_eq!(
            err.to_string(),
            "lookup refers to StationId(7) but only 3 stations were given"
        );

        let source = crate::domain::StationCode::parse("N3").unwrap_err();
        let err = LoadError::InvalidCode { row: 4, source };
        assert!(err.to_string().starts_with("row 4: invalid station code"));
    }
}
