// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! One-shot broadcast signal.
//!
//! A [`Signal`] transitions exactly once from *pending* to *fired*. Any number of
//! waiters can await it, before or after it fires; firing wakes all of them and
//! every later wait resolves immediately. Signals carry no data: they are used to
//! detect that something happened (a successor was appended, a property was sealed,
//! a pipeline completed), never to read what happened.

use event_listener::{Event, EventListener};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

/// A cloneable handle to a one-shot signal.
///
/// All clones share the same state: firing through one handle is observed by
/// waiters on every other handle.
///
/// # Example
///
/// ```
/// use observer_core::Signal;
///
/// # #[tokio::main]
/// # async fn main() {
/// let signal = Signal::new();
/// let waiter = signal.clone();
///
/// let handle = tokio::spawn(async move { waiter.fired().await });
///
/// assert!(signal.fire());
/// assert!(!signal.fire()); // already fired
/// handle.await.unwrap();
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct Signal {
    inner: Arc<SignalState>,
}

/// Shared flag + wake-up list backing a signal.
///
/// Exposed to the crate so that chain nodes can embed the state inline instead of
/// paying for an extra allocation per node.
#[derive(Debug, Default)]
pub(crate) struct SignalState {
    fired: AtomicBool,
    event: Event,
}

impl SignalState {
    pub(crate) fn fire(&self) -> bool {
        // Release pairs with the Acquire in `is_fired` so that everything written
        // before firing is visible to the woken waiters.
        let first = !self.fired.swap(true, Ordering::AcqRel);
        if first {
            self.event.notify(usize::MAX);
        }
        first
    }

    pub(crate) fn is_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    pub(crate) fn listen(&self) -> EventListener {
        self.event.listen()
    }

    /// Polls for the fired state, registering `listener` on first use.
    pub(crate) fn poll_fired(
        &self,
        listener: &mut Option<EventListener>,
        cx: &mut Context<'_>,
    ) -> Poll<()> {
        loop {
            if self.is_fired() {
                return Poll::Ready(());
            }

            match listener {
                None => {
                    *listener = Some(self.listen());
                    // Re-check after registering: a fire between the first check and
                    // `listen()` would otherwise be lost.
                }
                Some(l) => {
                    if Pin::new(l).poll(cx).is_pending() {
                        return Poll::Pending;
                    }
                    *listener = None;
                }
            }
        }
    }
}

impl Signal {
    /// Creates a new, pending signal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires the signal, waking every waiter.
    ///
    /// Returns `true` if this call performed the transition, `false` if the signal
    /// had already fired.
    pub fn fire(&self) -> bool {
        self.inner.fire()
    }

    /// Returns `true` once the signal has fired (non-blocking).
    #[must_use]
    pub fn is_fired(&self) -> bool {
        self.inner.is_fired()
    }

    /// Returns a future resolving once the signal has fired.
    ///
    /// The future owns a handle to the signal, so it can outlive `self`.
    pub fn fired(&self) -> Fired {
        Fired {
            signal: self.clone(),
            listener: None,
        }
    }

    /// Blocks the current thread until the signal fires.
    ///
    /// Meant for threads running outside an async runtime; inside a runtime use
    /// [`fired`](Self::fired).
    pub fn wait(&self) {
        futures::executor::block_on(self.fired());
    }
}

/// Future returned by [`Signal::fired`].
#[derive(Debug)]
pub struct Fired {
    signal: Signal,
    listener: Option<EventListener>,
}

impl Future for Fired {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = &mut *self;
        this.signal.inner.poll_fired(&mut this.listener, cx)
    }
}
