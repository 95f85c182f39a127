use std::time::Duration;

use thiserror::Error;

/// Boxed error type used as the source of transport failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Status code signalling that the caller should slow down.
pub const STATUS_RATE_LIMITED: u16 = 429;
/// Status code Groq uses when the requested tier is over capacity.
pub const STATUS_CAPACITY_EXCEEDED: u16 = 498;
/// Status code for an internal failure of the remote service.
pub const STATUS_SERVER_ERROR: u16 = 500;

const CAPACITY_EXCEEDED_ADVICE: &str =
    "The completion service is over capacity right now. Please try again in a few moments.";
const SERVER_ERROR_ADVICE: &str =
    "The completion service ran into an internal error. Please try again later.";

/// A single failed exchange with the remote service, as reported by a transport.
///
/// `status` is the remote status signal the retry policy classifies on. It is
/// `None` for failures that never produced one (connection errors, timeouts,
/// undecodable bodies).
#[derive(Error, Debug)]
#[error("{message}")]
pub struct TransportError {
    pub status: Option<u16>,
    pub message: String,
    #[source]
    pub source: Option<BoxError>,
}

impl TransportError {
    /// The service answered with a non-success status.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
            source: None,
        }
    }

    /// The request never produced a status (DNS, connect, timeout, ...).
    pub fn network(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            status: None,
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The service answered with a success status but the body was unusable.
    pub fn parse(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            status: None,
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Whether the retry policy treats this failure as transient.
    pub fn is_retryable(&self) -> bool {
        self.status == Some(STATUS_RATE_LIMITED)
    }
}

/// Terminal outcome of a failed completion call.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// No credential has been configured. Raised before any I/O.
    #[error("Completion client is not configured: set an API key first")]
    NotConfigured,

    /// Still rate limited after every retry was spent.
    #[error(transparent)]
    RateLimited(TransportError),

    /// The service reported status 498.
    #[error("{message}")]
    CapacityExceeded {
        message: String,
        #[source]
        source: TransportError,
    },

    /// The service reported status 500.
    #[error("{message}")]
    ServerError {
        message: String,
        #[source]
        source: TransportError,
    },

    /// Any failure the policy does not classify, passed through unchanged.
    #[error(transparent)]
    Unknown(TransportError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Completion did not finish within {timeout:?}")]
    Timeout { timeout: Duration },
}

impl CompletionError {
    pub(crate) fn capacity_exceeded(source: TransportError) -> Self {
        Self::CapacityExceeded {
            message: CAPACITY_EXCEEDED_ADVICE.to_string(),
            source,
        }
    }

    pub(crate) fn server_error(source: TransportError) -> Self {
        Self::ServerError {
            message: SERVER_ERROR_ADVICE.to_string(),
            source,
        }
    }

    /// The remote status that ended the call, if one was observed.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::RateLimited(e) | Self::Unknown(e) => e.status,
            Self::CapacityExceeded { source, .. } | Self::ServerError { source, .. } => {
                source.status
            }
            Self::NotConfigured
            | Self::Configuration(_)
            | Self::InvalidRequest(_)
            | Self::Timeout { .. } => None,
        }
    }
}
