use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the ecoroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A required API credential was absent or blank in the environment.
    #[error("missing required API credential: set {variable}")]
    MissingCredential { variable: &'static str },

    /// Raised when a vehicle's cargo capacity cannot be used as a load ratio divisor.
    #[error("vehicle {vehicle_id} has invalid cargo capacity {capacity}; expected a finite value > 0")]
    InvalidCargoCapacity { vehicle_id: String, capacity: f64 },

    /// Raised when the fuel type has no emission factor and the policy rejects it.
    #[error("vehicle {vehicle_id} uses unknown fuel type '{fuel_type}'")]
    UnknownFuelType {
        vehicle_id: String,
        fuel_type: String,
    },

    /// Raised when a segment distance is negative or not finite.
    #[error("segment distance must be finite and non-negative, got {distance}")]
    InvalidDistance { distance: f64 },

    /// Raised when a location carries non-finite coordinates.
    #[error("invalid coordinates for '{address}': lat={lat}, lon={lon}")]
    InvalidLocation { address: String, lat: f64, lon: f64 },

    /// Raised when a route would contain no segments.
    #[error("route must contain at least one segment")]
    EmptyRoute,

    /// A provider answered with a payload that does not match the expected shape.
    #[error("malformed {provider} response: {message}")]
    DataFormat {
        provider: &'static str,
        message: String,
    },

    /// An input file could not be found.
    #[error("{kind} file not found: {path}")]
    FileNotFound { kind: &'static str, path: PathBuf },

    /// An input file did not contain the expected JSON document.
    #[error("invalid JSON format in {kind} file {path}: {source}")]
    InvalidJson {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Raised when the locations file does not name a starting point.
    #[error("locations file {path} must contain at least a starting location")]
    MissingStartLocation { path: PathBuf },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Wrapper for JSON serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn data_format(provider: &'static str, message: impl Into<String>) -> Self {
        Error::DataFormat {
            provider,
            message: message.into(),
        }
    }

    /// Whether the error stems from configuration rather than data or I/O.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::MissingCredential { .. }
                | Error::InvalidCargoCapacity { .. }
                | Error::UnknownFuelType { .. }
        )
    }
}
