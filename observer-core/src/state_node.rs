// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Immutable links of the persistent value chain behind a [`Property`](crate::Property).
//!
//! A node's value never changes after construction. Its successor link transitions
//! exactly once from unset to set, and the node's advance signal fires at that
//! moment. Any reference to a node therefore stays valid and immutable forever,
//! which is what lets every cursor read the chain without taking a lock.
//!
//! Nodes are reference counted: a prefix of the chain is reclaimed as soon as no
//! cursor and no property points into it.

use crate::signal::SignalState;
use crate::StreamEvent;
use event_listener::EventListener;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, OnceLock};
use std::task::{Context, Poll};

pub(crate) struct StateNode<T> {
    /// `None` only for the head of a property created without an initial value.
    value: Option<StreamEvent<T>>,
    next: OnceLock<Arc<StateNode<T>>>,
    advanced: SignalState,
}

impl<T> StateNode<T> {
    pub(crate) fn new(value: Option<StreamEvent<T>>) -> Arc<Self> {
        Arc::new(Self {
            value,
            next: OnceLock::new(),
            advanced: SignalState::default(),
        })
    }

    pub(crate) fn value(&self) -> Option<&StreamEvent<T>> {
        self.value.as_ref()
    }

    pub(crate) fn successor(&self) -> Option<&Arc<Self>> {
        self.next.get()
    }

    pub(crate) fn is_terminal(&self) -> bool {
        self.value.as_ref().is_some_and(StreamEvent::is_terminal)
    }

    /// Links a new node holding `value` as this node's successor and fires the
    /// advance signal.
    ///
    /// Callers must serialize appends (the owning property holds its write lock).
    ///
    /// # Panics
    ///
    /// Panics if a successor was already assigned.
    pub(crate) fn append(&self, value: StreamEvent<T>) -> Arc<Self> {
        let node = Self::new(Some(value));
        assert!(
            self.next.set(Arc::clone(&node)).is_ok(),
            "state node successor assigned twice"
        );
        self.advanced.fire();
        node
    }
}

impl<T> Drop for StateNode<T> {
    fn drop(&mut self) {
        // Unlink iteratively so that dropping a long unread chain cannot overflow
        // the stack through recursive `Arc` drops.
        let mut next = self.next.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut node) => next = node.next.take(),
                Err(_) => break,
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for StateNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateNode")
            .field("value", &self.value)
            .field("advanced", &self.next.get().is_some())
            .finish()
    }
}

/// Future resolving once a node gains a successor.
///
/// Returned by [`Stream::changes`](crate::Stream::changes). It owns a reference to
/// the node it watches, so it can be raced against other futures without borrowing
/// the cursor. It never yields data: read the new value through the cursor.
pub struct Changed<T> {
    node: Arc<StateNode<T>>,
    listener: Option<EventListener>,
}

impl<T> Changed<T> {
    pub(crate) const fn new(node: Arc<StateNode<T>>) -> Self {
        Self {
            node,
            listener: None,
        }
    }
}

impl<T> fmt::Debug for Changed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Changed")
            .field("advanced", &self.node.next.get().is_some())
            .finish()
    }
}

impl<T> Future for Changed<T> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = &mut *self;
        this.node.advanced.poll_fired(&mut this.listener, cx)
    }
}
