use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Correlation identifier carried in the `rid` field of every request envelope.
///
/// Generated from a time-ordered UUID (version 7), so identifiers sort by
/// creation time and stay unique for the lifetime of the process without any
/// bookkeeping. The server never uses it for response matching; it exists for
/// tracing a request through client and server logs.
///
/// # Format
///
/// Standard hyphenated UUID: `01890a5d-ac96-774b-bcce-b302099a8057`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(String);

impl CorrelationId {
    // ---

    /// Generate a new unique correlation ID
    pub fn generate() -> Self {
        // ---
        Self(Uuid::now_v7().to_string())
    }

    /// Borrow the correlation ID as a string slice
    pub fn as_str(&self) -> &str {
        // ---
        &self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CorrelationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CorrelationId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_unique_over_large_sample() {
        // ---
        let ids: HashSet<CorrelationId> = (0..10_000).map(|_| CorrelationId::generate()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_format() {
        // ---
        let id = CorrelationId::generate();
        assert_eq!(id.to_string().len(), 36);
        assert_eq!(id.as_str().chars().nth(14), Some('7'));
    }

    #[test]
    fn test_time_ordered() {
        // ---
        let first = CorrelationId::generate();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = CorrelationId::generate();
        assert!(first < second);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        // ---
        let id = CorrelationId::from("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
}
