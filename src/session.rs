//! Session cookie state shared by the exchanges of one client.
//!
//! Every blocking-style exchange reads the current cookie before sending and
//! writes the response's `set-cookie` value after receiving, even when the
//! response carries none. Last write wins; values from different responses
//! are never merged.

use std::sync::{Mutex, MutexGuard};

use reqwest::header::{HeaderMap, SET_COOKIE};

/// Acquire a mutex guard, intentionally ignoring poisoning.
///
/// The protected value is a single optional string, so a panic while holding
/// the lock cannot leave it half-written.
pub(crate) fn lock_ignore_poison<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    // ---
    match m.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Latest session cookie returned by the server.
#[derive(Debug, Default)]
pub struct SessionState {
    cookie: Mutex<Option<String>>,
}

impl SessionState {
    /// Empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cookie value, if any.
    pub fn read(&self) -> Option<String> {
        // ---
        lock_ignore_poison(&self.cookie).clone()
    }

    /// Replace the cookie value. `None` or an empty string clears it.
    pub fn write(&self, cookie: Option<String>) {
        // ---
        let cookie = cookie.filter(|c| !c.is_empty());
        tracing::trace!(present = cookie.is_some(), "session cookie written");
        *lock_ignore_poison(&self.cookie) = cookie;
    }

    /// Drop the current cookie.
    pub fn clear(&self) {
        self.write(None);
    }

    /// Record the `set-cookie` value of a completed exchange.
    pub(crate) fn record_response(&self, headers: &HeaderMap) {
        self.write(set_cookie_value(headers));
    }
}

/// Combined `set-cookie` value of a response.
///
/// Multiple `set-cookie` headers are joined with `"; "`, the way they are
/// replayed in a single `Cookie` request header. Values that are not valid
/// header text are skipped.
pub fn set_cookie_value(headers: &HeaderMap) -> Option<String> {
    // ---
    let values: Vec<&str> = headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.join("; "))
    }
}
