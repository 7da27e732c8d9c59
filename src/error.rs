//! Error types for reachability monitoring.

use std::fmt;

/// Errors surfaced during monitor construction and subscription.
///
/// Once a monitor is constructed, no further operation fails: the classifier
/// is total, so even a malformed flag set still produces a defined status.
#[derive(Debug, Clone)]
pub enum ReachabilityError {
    /// A hostname could not be resolved, so no monitor was produced.
    Resolution {
        /// The hostname that failed to resolve.
        hostname: String,
        /// Resolver error detail.
        message: String,
    },
    /// The platform change watcher could not be established.
    Watch(String),
}

impl fmt::Display for ReachabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolution { hostname, message } => {
                write!(f, "Failed to resolve '{hostname}': {message}")
            }
            Self::Watch(msg) => write!(f, "Failed to watch for network changes: {msg}"),
        }
    }
}

impl std::error::Error for ReachabilityError {}

/// A specialized Result type for reachability operations.
pub type Result<T> = std::result::Result<T, ReachabilityError>;
