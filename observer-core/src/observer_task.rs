// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Background task spawning with cooperative cancellation.

use crate::CancellationToken;
use std::future::Future;

/// Task handle with automatic cancellation on drop.
///
/// `ObserverTask` spawns a background task on the Tokio runtime and hands it a
/// [`CancellationToken`] that fires when the handle is dropped or
/// [`cancel`](Self::cancel)led. The task is expected to select on that token at
/// each of its wait points and exit as soon as it fires.
///
/// Pipelines keep the tasks that feed them (their own pump, a concat drain, a
/// group-by dispatcher) inside their shared state, so a task lives exactly as
/// long as someone can still observe its output.
///
/// # Example
///
/// ```rust
/// use observer_core::ObserverTask;
///
/// # #[tokio::main]
/// # async fn main() {
/// let task = ObserverTask::spawn(|cancel| async move {
///     cancel.cancelled().await;
/// });
///
/// assert!(!task.is_cancelled());
/// drop(task); // the spawned future observes the cancellation and returns
/// # }
/// ```
#[derive(Debug)]
pub struct ObserverTask {
    cancel: CancellationToken,
}

impl ObserverTask {
    /// Spawn a background task with cancellation support.
    ///
    /// The provided closure receives a `CancellationToken` that is triggered
    /// when the task handle is dropped or manually cancelled.
    ///
    /// # Panics
    ///
    /// Panics if called outside the context of a Tokio runtime.
    pub fn spawn<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let future = f(cancel.clone());
        tokio::spawn(future);

        Self { cancel }
    }

    /// Manually cancel the task.
    ///
    /// This signals the task to stop but doesn't wait for it to complete.
    /// The task stops at its next cancellation checkpoint.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Check if cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for ObserverTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
