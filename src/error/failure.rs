//! The value passed down the interceptor chain.

use thiserror::Error;

use super::body::ErrorBody;
use super::category::ErrorCategory;
use crate::traits::{HttpError, Response};

/// Low-level code reported by the transport when no response arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportCode {
    /// Server unreachable: connection refused, DNS, timeout, broken body.
    Network,
    /// The request could not be built (bad URL).
    InvalidRequest,
    /// The request was cancelled.
    Cancelled,
    /// Anything else.
    Other,
}

impl TransportCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportCode::Network => "ERR_NETWORK",
            TransportCode::InvalidRequest => "ERR_INVALID_URL",
            TransportCode::Cancelled => "ERR_CANCELED",
            TransportCode::Other => "ERR_UNKNOWN",
        }
    }
}

impl std::fmt::Display for TransportCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&HttpError> for TransportCode {
    fn from(err: &HttpError) -> Self {
        match err {
            e if e.is_network() => TransportCode::Network,
            HttpError::InvalidUrl(_) => TransportCode::InvalidRequest,
            HttpError::Cancelled => TransportCode::Cancelled,
            _ => TransportCode::Other,
        }
    }
}

/// A failed request.
///
/// Either nothing came back (`Network`) or the server answered with a
/// non-2xx status (`Http`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpFailure {
    #[error("Request failed without a response ({code}): {message}")]
    Network { code: TransportCode, message: String },

    #[error("Request failed with HTTP status {status}")]
    Http { status: u16, body: ErrorBody },
}

impl HttpFailure {
    /// The failure returned when an authenticated call has no session token.
    pub fn unauthorized() -> Self {
        HttpFailure::Http {
            status: 401,
            body: ErrorBody::Empty,
        }
    }

    pub fn from_transport(err: &HttpError) -> Self {
        HttpFailure::Network {
            code: TransportCode::from(err),
            message: err.to_string(),
        }
    }

    pub fn from_response(response: &Response) -> Self {
        HttpFailure::Http {
            status: response.status,
            body: ErrorBody::from_bytes(&response.body),
        }
    }

    /// Status code, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpFailure::Http { status, .. } => Some(*status),
            HttpFailure::Network { .. } => None,
        }
    }

    pub fn body(&self) -> Option<&ErrorBody> {
        match self {
            HttpFailure::Http { body, .. } => Some(body),
            HttpFailure::Network { .. } => None,
        }
    }

    /// No response and the transport says the server was unreachable.
    pub fn is_network_unreachable(&self) -> bool {
        matches!(
            self,
            HttpFailure::Network {
                code: TransportCode::Network,
                ..
            }
        )
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            HttpFailure::Network { .. } => ErrorCategory::Network,
            HttpFailure::Http { status, .. } => ErrorCategory::for_status(*status),
        }
    }
}
