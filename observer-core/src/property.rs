// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The mutable observable cell.
//!
//! A [`Property`] owns the tail of an append-only chain of immutable nodes. Each
//! [`update`](Property::update) links a new node behind the current one, fires the
//! old node's advance signal and moves the tail forward. Readers never lock the
//! chain; only the tail reference and the sealed flag sit behind the property's
//! reader/writer lock.
//!
//! ## Characteristics
//!
//! - **Cold per cursor**: a cursor sees every value appended after its creation.
//! - **Unbounded**: values are retained as long as some cursor still points behind them.
//! - **Thread-safe**: cheap to clone; all clones publish into the same chain.
//! - **Sealed once**: the first terminal event (`end`, `abort`, `fail`) seals the
//!   property, fires its `done` signal, and turns later publications into no-ops.

use crate::signal::{Fired, Signal};
use crate::state_node::StateNode;
use crate::{ObserverError, Stream, StreamEvent};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

struct PropertyState<T> {
    current: Arc<StateNode<T>>,
    sealed: bool,
}

struct PropertyInner<T> {
    state: RwLock<PropertyState<T>>,
    done: Signal,
}

/// An observable value continuously updated by one or more publishers.
///
/// # Example
///
/// ```
/// use observer_core::{Property, StreamEvent};
///
/// # #[tokio::main]
/// # async fn main() {
/// let property = Property::new("idle");
/// let mut stream = property.observe();
///
/// property.update("busy");
/// property.end();
///
/// assert_eq!(stream.next().await, StreamEvent::Item("busy"));
/// assert_eq!(stream.next().await, StreamEvent::End);
/// assert!(!property.update("ignored")); // sealed
/// # }
/// ```
pub struct Property<T> {
    inner: Arc<PropertyInner<T>>,
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("Property")
            .field("current", &state.current)
            .field("sealed", &state.sealed)
            .finish()
    }
}

impl<T> Property<T> {
    fn with_head(head: Option<StreamEvent<T>>) -> Self {
        Self {
            inner: Arc::new(PropertyInner {
                state: RwLock::new(PropertyState {
                    current: StateNode::new(head),
                    sealed: false,
                }),
                done: Signal::new(),
            }),
        }
    }

    /// Creates a property holding `value` as its current value.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self::with_head(Some(StreamEvent::Item(value)))
    }

    /// Creates a property with no current value.
    ///
    /// [`value`](Self::value) returns `None` until the first update.
    #[must_use]
    pub fn empty() -> Self {
        Self::with_head(None)
    }

    /// Returns a new cursor positioned at the current value.
    ///
    /// The cursor observes every value published after this call.
    #[must_use]
    pub fn observe(&self) -> Stream<T> {
        let state = self.inner.state.read();
        Stream::at(Arc::clone(&state.current))
    }

    /// Publishes a new value.
    ///
    /// Returns `false` (and does nothing) if the property is sealed.
    pub fn update(&self, value: T) -> bool {
        self.publish(StreamEvent::Item(value))
    }

    /// Publishes every value of `values` in order, without interleaving with other
    /// publishers.
    ///
    /// Returns the number of values accepted (zero once sealed).
    pub fn update_all<I>(&self, values: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let mut state = self.inner.state.write();
        if state.sealed {
            return 0;
        }

        let mut accepted = 0;
        for value in values {
            state.current = state.current.append(StreamEvent::Item(value));
            accepted += 1;
        }
        accepted
    }

    /// Seals the property with [`StreamEvent::End`].
    ///
    /// Returns `false` if the property was already sealed.
    pub fn end(&self) -> bool {
        self.publish(StreamEvent::End)
    }

    /// Seals the property with [`StreamEvent::Cancelled`], marking an abrupt stop.
    pub fn abort(&self) -> bool {
        self.publish(StreamEvent::Cancelled)
    }

    /// Seals the property with [`StreamEvent::Error`].
    pub fn fail(&self, error: ObserverError) -> bool {
        self.publish(StreamEvent::Error(error))
    }

    /// Appends `event`, sealing the property if the event is terminal.
    pub fn publish(&self, event: StreamEvent<T>) -> bool {
        let terminal = event.is_terminal();
        {
            let mut state = self.inner.state.write();
            if state.sealed {
                trace!("publish on a sealed property ignored");
                return false;
            }

            state.current = state.current.append(event);
            state.sealed = terminal;
        }

        if terminal {
            debug!("property sealed");
            self.inner.done.fire();
        }
        true
    }

    /// Returns `true` once a terminal event has been published.
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.inner.state.read().sealed
    }

    /// Returns a future resolving once the property is sealed.
    pub fn done(&self) -> Fired {
        self.inner.done.fired()
    }
}

impl<T: Clone> Property<T> {
    /// Returns the current value, `None` for an [`empty`](Self::empty) property that
    /// was never updated.
    #[must_use]
    pub fn value(&self) -> Option<StreamEvent<T>> {
        self.inner.state.read().current.value().cloned()
    }
}
