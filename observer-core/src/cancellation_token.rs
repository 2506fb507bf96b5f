// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic cancellation token.
//!
//! Every background task in this workspace (pipeline pumps, concat drains, group-by
//! dispatchers) selects on a token alongside its data source. Firing the token is an
//! abrupt stop: tasks exit at their next wait point without running any end-of-input
//! logic.

use crate::signal::{Fired, Signal};

/// Runtime-agnostic cancellation token.
///
/// A `CancellationToken` can be cloned to create multiple handles to the same
/// cancellation state. When `cancel()` is called on any clone, all waiters on
/// `cancelled()` are notified.
///
/// # Example
///
/// ```
/// use observer_core::CancellationToken;
///
/// # #[tokio::main]
/// # async fn main() {
/// let token = CancellationToken::new();
/// let token_clone = token.clone();
///
/// let handle = tokio::spawn(async move {
///     token_clone.cancelled().await;
/// });
///
/// token.cancel();
/// handle.await.unwrap();
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    signal: Signal,
}

impl CancellationToken {
    /// Create a new cancellation token.
    ///
    /// The token is initially not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the token, waking all listeners.
    ///
    /// This method is idempotent. Calling it multiple times has the same effect
    /// as calling it once.
    pub fn cancel(&self) {
        self.signal.fire();
    }

    /// Check if the token has been cancelled (non-blocking).
    ///
    /// ```
    /// use observer_core::CancellationToken;
    ///
    /// let token = CancellationToken::new();
    /// assert!(!token.is_cancelled());
    ///
    /// token.cancel();
    /// assert!(token.is_cancelled());
    /// ```
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.signal.is_fired()
    }

    /// Wait asynchronously until the token is cancelled.
    ///
    /// If the token is already cancelled, this returns immediately.
    pub fn cancelled(&self) -> Fired {
        self.signal.fired()
    }
}
