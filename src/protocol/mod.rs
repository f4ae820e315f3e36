/// Wire protocol types: correlation identifiers, the request envelope and
/// service path construction.
mod correlation;
mod envelope;

pub use correlation::CorrelationId;
pub use envelope::{
    //
    service_path,
    ExchangeMode,
    RequestEnvelope,
    ASYNC_SEGMENT,
    PROTOCOL_VERSION,
    SERVICE_SUFFIX,
};
