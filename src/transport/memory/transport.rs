// src/transport/memory/transport.rs

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    // ---
    HttpRequest,
    HttpResponse,
    Result,
    RpcError,
    Transport,
    TransportKind,
    TransportPtr,
};

/// Body returned when no scripted reply is queued.
const EMPTY_OBJECT: &str = "{}";

enum Reply {
    Response(HttpResponse),
    Failure(String),
}

#[derive(Default)]
struct Shared {
    script: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<HttpRequest>>,
}

struct MemoryTransport {
    // ---
    kind: TransportKind,
    shared: Arc<Shared>,
}

#[async_trait::async_trait]
impl Transport for MemoryTransport {
    // ---

    fn kind(&self) -> TransportKind {
        self.kind
    }

    async fn post(&self, request: HttpRequest) -> Result<HttpResponse> {
        // ---
        self.shared.requests.lock().await.push(request);

        match self.shared.script.lock().await.pop_front() {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Failure(message)) => Err(RpcError::Transport(message)),
            None => Ok(HttpResponse::ok(EMPTY_OBJECT)),
        }
    }
}

/// Test-side handle of an in-memory transport.
///
/// Queues replies and inspects the requests the client sent.
#[derive(Clone)]
pub struct MemoryController {
    shared: Arc<Shared>,
}

impl MemoryController {
    /// Queue a response for the next unanswered request.
    pub async fn push_response(&self, response: HttpResponse) {
        // ---
        self.shared
            .script
            .lock()
            .await
            .push_back(Reply::Response(response));
    }

    /// Queue a transport-level failure for the next unanswered request.
    pub async fn push_failure(&self, message: impl Into<String>) {
        // ---
        self.shared
            .script
            .lock()
            .await
            .push_back(Reply::Failure(message.into()));
    }

    /// Every request posted so far, oldest first.
    pub async fn requests(&self) -> Vec<HttpRequest> {
        self.shared.requests.lock().await.clone()
    }

    /// Most recently posted request.
    pub async fn last_request(&self) -> Option<HttpRequest> {
        self.shared.requests.lock().await.last().cloned()
    }
}

/// Create a new in-memory transport and its controller.
///
/// `kind` is only reported through [`Transport::kind`]; no credentials are
/// involved.
pub fn create_transport(kind: TransportKind) -> (TransportPtr, MemoryController) {
    // ---
    let shared = Arc::new(Shared::default());

    let transport = MemoryTransport {
        kind,
        shared: Arc::clone(&shared),
    };

    (Arc::new(transport), MemoryController { shared })
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use bytes::Bytes;
    use reqwest::header::HeaderMap;

    fn request(body: &'static str) -> HttpRequest {
        HttpRequest {
            url: url::Url::parse("http://host/X.common.kdsvc").unwrap(),
            headers: HeaderMap::new(),
            body: Bytes::from_static(body.as_bytes()),
        }
    }

    #[tokio::test]
    async fn test_script_is_answered_in_order() {
        // ---
        let (transport, controller) = create_transport(TransportKind::Plain);
        controller.push_response(HttpResponse::ok("1")).await;
        controller.push_failure("connection reset").await;

        let first = transport.post(request("a")).await.unwrap();
        assert_eq!(first.text(), "1");

        let second = transport.post(request("b")).await.unwrap_err();
        assert!(matches!(second, RpcError::Transport(m) if m == "connection reset"));

        let third = transport.post(request("c")).await.unwrap();
        assert_eq!(third.text(), "{}");

        let bodies: Vec<Bytes> = controller
            .requests()
            .await
            .into_iter()
            .map(|r| r.body)
            .collect();
        assert_eq!(bodies, ["a", "b", "c"].map(|s| Bytes::from_static(s.as_bytes())));
    }
}
