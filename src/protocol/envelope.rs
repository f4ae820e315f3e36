use std::time::{SystemTime, UNIX_EPOCH};

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::protocol::CorrelationId;
use crate::Result;

/// Protocol version tag written into every envelope.
pub const PROTOCOL_VERSION: &str = "1.0";

/// Suffix appended to a remote method identifier to form its service path.
pub const SERVICE_SUFFIX: &str = ".common.kdsvc";

/// Routing segment that marks an asynchronous-style endpoint.
pub const ASYNC_SEGMENT: &str = "/a/";

/// Request body sent for every remote call.
///
/// Wire format:
/// ```json
/// {
///   "rid": "01890a5d-ac96-774b-bcce-b302099a8057",
///   "parameters": ["AA", "bob", "pw", 2052],
///   "timestamp": 1718000000000,
///   "v": "1.0"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    #[serde(rename = "rid")]
    pub correlation_id: CorrelationId,
    pub parameters: Vec<Value>,
    /// Milliseconds since the Unix epoch at envelope creation.
    pub timestamp: i64,
    #[serde(rename = "v")]
    pub version: String,
}

impl RequestEnvelope {
    /// Build a fresh envelope around an ordered parameter list.
    pub fn new(parameters: Vec<Value>) -> Self {
        // ---
        Self {
            correlation_id: CorrelationId::generate(),
            parameters,
            timestamp: now_millis(),
            version: PROTOCOL_VERSION.to_owned(),
        }
    }

    /// Serialize to the canonical JSON text sent on the wire.
    ///
    /// # Errors
    ///
    /// Returns `RpcError::Serialization` if a parameter cannot be encoded.
    pub fn to_bytes(&self) -> Result<Bytes> {
        // ---
        Ok(Bytes::from(serde_json::to_vec(self)?))
    }

    /// Parse an envelope back from its wire form.
    ///
    /// # Errors
    ///
    /// Returns `RpcError::Serialization` if `bytes` is not an envelope.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        // ---
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Which exchange style a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeMode {
    /// Outcome settles with the parsed JSON body.
    Blocking,

    /// Outcome settles with the raw response text.
    NonBlocking,
}

/// Service path for a remote method identifier.
///
/// Blocking calls use a path relative to the base address; non-blocking calls
/// use an absolute path under the `/a/` routing segment.
pub fn service_path(method: &str, mode: ExchangeMode) -> String {
    // ---
    match mode {
        ExchangeMode::Blocking => format!("{method}{SERVICE_SUFFIX}"),
        ExchangeMode::NonBlocking => format!("{ASYNC_SEGMENT}{method}{SERVICE_SUFFIX}"),
    }
}

fn now_millis() -> i64 {
    // A clock before 1970 is treated as the epoch itself.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}
