//! Error types for bdsaas API calls.
//!
//! Every failure is returned to the caller as a [`ClientError`]. Nothing is
//! retried and nothing is logged here; the [`ErrorKind`] tells the caller
//! which stage of the round trip failed.

use std::fmt;
use thiserror::Error;

/// The stage of a request at which an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request could not be constructed (payload serialization).
    Encode,
    /// Connection failure, DNS resolution, reading the body, etc.
    Network,
    /// The configured deadline elapsed before the response arrived.
    Timeout,
    /// The response body is not a well-formed `rspCode`/`rspMsg`/`data` envelope.
    InvalidEnvelope,
    /// The service answered with a non-zero `rspCode`.
    Api,
    /// The envelope reported success but `data` has an unexpected shape.
    Data,
    /// The response is neither an envelope nor the expected binary payload.
    InvalidResponse,
    /// Invalid client configuration (base URL, HTTP client setup).
    Configuration,
}

impl ErrorKind {
    /// Returns a stable snake_case name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Encode => "encode_error",
            Self::Network => "network_error",
            Self::Timeout => "timeout",
            Self::InvalidEnvelope => "invalid_envelope",
            Self::Api => "api_error",
            Self::Data => "data_error",
            Self::InvalidResponse => "invalid_response",
            Self::Configuration => "configuration_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error returned by a [`Client`](crate::Client) call.
#[derive(Debug, Error)]
pub struct ClientError {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ClientError {
    /// Creates a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a request construction error.
    pub fn encode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Encode, message)
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Creates an envelope decode error.
    pub fn invalid_envelope(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidEnvelope, message)
    }

    /// Creates a domain error carrying the service's `rspMsg`.
    pub fn api(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Api, message)
    }

    /// Creates a result decode error.
    pub fn data(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Data, message)
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidResponse, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Sets the underlying cause.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    ///
    /// For [`ErrorKind::Api`] this is the service's `rspMsg`, unchanged.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true if the request was aborted because its deadline elapsed.
    pub fn is_timeout(&self) -> bool {
        self.kind == ErrorKind::Timeout
    }

    /// Returns true if the service rejected the request with a non-zero code.
    pub fn is_api_error(&self) -> bool {
        self.kind == ErrorKind::Api
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        let base = if err.is_timeout() {
            Self::timeout("request deadline elapsed")
        } else if err.is_connect() {
            Self::network(format!("connection failed: {}", err))
        } else if err.is_builder() {
            Self::encode(format!("failed to build request: {}", err))
        } else {
            Self::network(format!("request failed: {}", err))
        };
        base.with_source(err)
    }
}

/// A specialized Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
