//! Error category classification.
//!
//! Groups failures for logging and for picking the generic message shown
//! when a backend gives nothing more specific.

use std::fmt;

/// High-level categorization of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The server could not be reached (connection, DNS, timeout).
    Network,

    /// The session is missing or expired (HTTP 401).
    Auth,

    /// The request was rejected (HTTP 400, 404, 422).
    Client,

    /// The backend failed (HTTP 500).
    Server,

    /// Anything the portal has no specific handling for.
    Unclassified,
}

impl ErrorCategory {
    /// Classify an HTTP status code.
    pub fn for_status(status: u16) -> Self {
        match status {
            401 => ErrorCategory::Auth,
            400 | 404 | 422 => ErrorCategory::Client,
            500 => ErrorCategory::Server,
            _ => ErrorCategory::Unclassified,
        }
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Client => "client",
            ErrorCategory::Server => "server",
            ErrorCategory::Unclassified => "unclassified",
        }
    }

    /// Returns a user-friendly description of the category.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Network connectivity issue",
            ErrorCategory::Auth => "Session expired or missing",
            ErrorCategory::Client => "Request rejected by the server",
            ErrorCategory::Server => "Server-side issue",
            ErrorCategory::Unclassified => "Unexpected response",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
