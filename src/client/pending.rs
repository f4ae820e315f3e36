use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::protocol::CorrelationId;
use crate::{Result, RpcError};

/// Deferred outcome of one issued exchange.
///
/// The exchange runs on the Tokio runtime whether or not this value is
/// polled. Awaiting it yields the settled outcome; dropping it only discards
/// the outcome, the request itself is not cancelled.
#[must_use = "dropping a PendingExchange discards its outcome"]
pub struct PendingExchange<T> {
    // ---
    correlation_id: CorrelationId,
    rx: oneshot::Receiver<Result<T>>,
}

/// Write side of a [`PendingExchange`].
///
/// Consumed by [`Settler::settle`], so an outcome can be delivered at most once.
pub(crate) struct Settler<T> {
    tx: oneshot::Sender<Result<T>>,
}

impl<T> PendingExchange<T> {
    // ---

    /// Create a linked settler/pending pair for the envelope `correlation_id`.
    pub(crate) fn channel(correlation_id: CorrelationId) -> (Settler<T>, Self) {
        // ---
        let (tx, rx) = oneshot::channel();
        (Settler { tx }, Self { correlation_id, rx })
    }

    /// Correlation id of the envelope this exchange sent.
    pub fn correlation_id(&self) -> &CorrelationId {
        &self.correlation_id
    }
}

impl<T> Settler<T> {
    /// Deliver the outcome. A dropped receiver is not an error.
    pub(crate) fn settle(self, outcome: Result<T>) {
        // ---
        if self.tx.send(outcome).is_err() {
            tracing::trace!("outcome discarded, pending exchange dropped");
        }
    }
}

impl<T> Future for PendingExchange<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // ---
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(_)) => Poll::Ready(Err(RpcError::Abandoned)),
            Poll::Pending => Poll::Pending,
        }
    }
}
