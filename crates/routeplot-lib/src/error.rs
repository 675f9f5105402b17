use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the routeplot library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Location or edge data could not be loaded; the graph must not be used.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The caller supplied a request that cannot be planned.
    #[error(transparent)]
    Input(#[from] InputError),

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the data directory")]
    ProjectDirsUnavailable,

    /// Raised when a route summary could not be serialised.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error happened while loading data (fatal to startup).
    pub fn is_load_error(&self) -> bool {
        matches!(self, Error::Load(_))
    }

    /// Whether this error was caused by the request rather than the data.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::Input(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Load(LoadError::Io(err))
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Load(LoadError::Csv(err))
    }
}

/// Malformed or unreadable location/edge data.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A data file was not present at the resolved path.
    #[error("data file not found at {path}")]
    FileNotFound { path: PathBuf },

    /// A line in a whitespace-separated data file could not be parsed.
    #[error("{path}:{line}: {message}")]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Edge references an identifier outside `1..=location_count`.
    #[error("edge record {record} references location {id}, but only {location_count} locations exist")]
    EdgeOutOfRange {
        record: u32,
        id: u32,
        location_count: usize,
    },

    /// Edge connects a location to itself.
    #[error("edge record {record} connects location {id} to itself")]
    SelfLoop { record: u32, id: u32 },

    /// Edge weight is zero, negative, or not finite.
    #[error("edge record {record} has invalid weight {weight}; weights must be positive and finite")]
    InvalidWeight { record: u32, weight: f64 },

    /// Location identifiers are 1-based.
    #[error("location identifier must be positive (found 0 for {name:?})")]
    ZeroLocationId { name: String },

    /// Two location records share an identifier.
    #[error("duplicate location identifier {id}")]
    DuplicateLocation { id: u32 },

    /// Identifiers do not form a contiguous `1..=N` range.
    #[error("location identifier {id} is missing; identifiers must be contiguous from 1 to {max}")]
    MissingLocation { id: u32, max: u32 },

    /// Location name is empty or longer than the allowed bound.
    #[error("location {id} has an invalid name {name:?}; names must be 1 to {max} characters")]
    InvalidName { id: u32, name: String, max: usize },

    /// Location coordinate is NaN or infinite.
    #[error("location {id} has a non-finite coordinate")]
    InvalidCoordinate { id: u32 },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Requests rejected before any computation happens.
#[derive(Debug, Error)]
pub enum InputError {
    /// A route needs a start and at least one further waypoint.
    #[error("at least 2 waypoints are required to plan a route (got {count})")]
    NotEnoughWaypoints { count: usize },

    /// A waypoint identifier does not exist in the graph.
    #[error("location id {id} is out of range; the graph has {location_count} locations")]
    UnknownLocationId { id: usize, location_count: usize },

    /// A location name could not be found in the registry.
    #[error("unknown location name: {name}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        name: String,
        suggestions: Vec<String>,
    },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_location_lists_suggestions() {
        let err = InputError::UnknownLocation {
            name: "Budapst".to_string(),
            suggestions: vec!["Budapest".to_string(), "Budaors".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown location name: Budapst. Did you mean one of: 'Budapest', 'Budaors'?"
        );
    }

    #[test]
    fn unknown_location_without_suggestions_is_plain() {
        let err = InputError::UnknownLocation {
            name: "Nowhere".to_string(),
            suggestions: Vec::new(),
        };
        assert_eq!(err.to_string(), "unknown location name: Nowhere");
    }

    #[test]
    fn categories_are_distinguishable() {
        let load: Error = LoadError::SelfLoop { record: 1, id: 2 }.into();
        let input: Error = InputError::NotEnoughWaypoints { count: 1 }.into();
        assert!(load.is_load_error());
        assert!(!load.is_input_error());
        assert!(input.is_input_error());
        assert!(!input.is_load_error());
    }
}
