//! Issue-ordered exchange gate.
//!
//! A [`Ticket`] is drawn synchronously when an exchange is issued, before any
//! task is spawned, so turn order is issue order rather than scheduler order.
//! A ticket holds the turn from the moment it is served until it is dropped.
//! A ticket dropped before its turn (a cancelled or timed out call) is skipped.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use crate::session::lock_ignore_poison;

#[derive(Debug, Default)]
struct TurnState {
    next: u64,
    serving: u64,
    abandoned: BTreeSet<u64>,
}

#[derive(Debug, Default)]
pub(crate) struct Turnstile {
    state: Mutex<TurnState>,
    served: Notify,
}

impl Turnstile {
    // ---

    /// Draw the next ticket.
    pub(crate) fn take(self: &Arc<Self>) -> Ticket {
        // ---
        let mut state = lock_ignore_poison(&self.state);
        let number = state.next;
        state.next += 1;

        Ticket {
            number,
            turnstile: Arc::clone(self),
        }
    }

    fn is_serving(&self, number: u64) -> bool {
        lock_ignore_poison(&self.state).serving == number
    }
}

/// A place in the exchange order.
pub(crate) struct Ticket {
    number: u64,
    turnstile: Arc<Turnstile>,
}

impl Ticket {
    /// Wait until every earlier ticket has been dropped.
    pub(crate) async fn wait(&self) {
        // ---
        loop {
            // Registered before the check, so a release in between is not lost.
            let served = self.turnstile.served.notified();
            if self.turnstile.is_serving(self.number) {
                return;
            }
            served.await;
        }
    }
}

impl Drop for Ticket {
    fn drop(&mut self) {
        // ---
        let mut state = lock_ignore_poison(&self.turnstile.state);

        if state.serving == self.number {
            state.serving += 1;
            let st = &mut *state;
            while st.abandoned.remove(&st.serving) {
                st.serving += 1;
            }
            drop(state);
            self.turnstile.served.notify_waiters();
        } else {
            state.abandoned.insert(self.number);
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    const SHORT: Duration = Duration::from_millis(20);

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_turns_follow_issue_order() {
        // ---
        let turnstile = Arc::new(Turnstile::default());
        let order = Arc::new(Mutex::new(Vec::new()));

        let first = turnstile.take();
        let second = turnstile.take();

        let log = Arc::clone(&order);
        let late = tokio::spawn(async move {
            second.wait().await;
            log.lock().unwrap().push("second");
        });

        let log = Arc::clone(&order);
        let early = tokio::spawn(async move {
            tokio::time::sleep(SHORT).await;
            first.wait().await;
            log.lock().unwrap().push("first");
        });

        late.await.unwrap();
        early.await.unwrap();

        assert_eq!(*order.lock().unwrap(), ["first", "second"]);
    }

    #[tokio::test]
    async fn test_waits_while_earlier_ticket_held() {
        // ---
        let turnstile = Arc::new(Turnstile::default());
        let first = turnstile.take();
        let second = turnstile.take();

        first.wait().await;
        assert!(timeout(SHORT, second.wait()).await.is_err());

        drop(first);
        assert!(timeout(SHORT, second.wait()).await.is_ok());
    }

    #[tokio::test]
    async fn test_abandoned_ticket_is_skipped_in_order() {
        // ---
        let turnstile = Arc::new(Turnstile::default());
        let first = turnstile.take();
        let second = turnstile.take();
        let third = turnstile.take();

        // Dropping a queued ticket must not let a later one overtake the holder.
        drop(second);
        assert!(timeout(SHORT, third.wait()).await.is_err());

        drop(first);
        assert!(timeout(SHORT, third.wait()).await.is_ok());

        drop(third);
        let fourth = turnstile.take();
        assert!(timeout(SHORT, fourth.wait()).await.is_ok());
    }
}
