use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while constructing a client or running an exchange.
///
/// Construction and contract errors are reported before any network I/O.
/// Transport and protocol errors fail only the exchange that produced them.
/// Nothing is retried.
#[derive(Error, Debug)]
pub enum RpcError {
    // --- construction

    /// The base server address could not be parsed.
    #[error("invalid server address: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base server address uses a scheme other than `http` or `https`.
    #[error("unsupported address scheme: {0}")]
    UnsupportedScheme(String),

    /// A caller supplied header override is not a valid HTTP header.
    #[error("invalid header override: {0}")]
    InvalidHeader(String),

    /// Transport identity material could not be read.
    #[error("failed to read transport credential {path:?}: {source}")]
    Credentials {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Transport identity material was read but is not a usable key/certificate pair.
    #[error("invalid transport identity: {0}")]
    Identity(#[source] reqwest::Error),

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    // --- caller contract

    /// Arguments do not match the declared signature of a facade operation.
    #[error("contract violation in {operation}: {detail}")]
    Contract {
        operation: &'static str,
        detail: String,
    },

    // --- exchange

    /// The request envelope could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Network-level failure reported by the HTTP transport.
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure reported by a non-HTTP transport implementation.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body of a blocking-style exchange is not valid JSON.
    #[error("response body is not valid JSON: {source}")]
    Protocol {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// The task driving a pending exchange ended without settling it.
    #[error("exchange abandoned before it settled")]
    Abandoned,

    /// An externally imposed deadline elapsed.
    #[error("exchange timed out")]
    Timeout,
}

impl RpcError {
    pub(crate) fn contract(operation: &'static str, detail: impl Into<String>) -> Self {
        // ---
        Self::Contract {
            operation,
            detail: detail.into(),
        }
    }

    /// True for failures raised before any network I/O was attempted.
    pub fn is_pre_flight(&self) -> bool {
        // ---
        matches!(
            self,
            Self::InvalidUrl(_)
                | Self::UnsupportedScheme(_)
                | Self::InvalidHeader(_)
                | Self::Credentials { .. }
                | Self::Identity(_)
                | Self::ClientBuild(_)
                | Self::Contract { .. }
        )
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, RpcError>;
