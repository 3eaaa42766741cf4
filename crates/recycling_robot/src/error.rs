//! Error types for the recycling robot simulation.

/// A specialized `Result` type for simulation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The primary error enum for all fallible operations within the crate.
///
/// Only construction and reconfiguration can fail. Once a reward model,
/// dynamics and agent exist, stepping and learning are infallible.
#[derive(Debug)]
pub enum Error {
    /// A reward model, transition parameter or training setting violates its invariant.
    InvalidConfiguration(String),
    /// A result file or config file could not be read or written.
    Io(std::io::Error),
    /// A CSV row could not be written.
    Csv(String),
    /// A config file could not be parsed.
    Serialization(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidConfiguration(s) => write!(f, "Invalid configuration: {}", s),
            Error::Io(e) => write!(f, "IO error: {}", e),
            Error::Csv(s) => write!(f, "CSV error: {}", s),
            Error::Serialization(s) => write!(f, "Serialization error: {}", s),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl Error {
    /// Helper to create an `InvalidConfiguration` error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidConfiguration(msg.into())
    }

    /// Returns `true` for errors raised by invariant checks.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Error::InvalidConfiguration(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Csv(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
