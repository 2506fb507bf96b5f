// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Independent read cursors over a property's value chain.
//!
//! A [`Stream`] is nothing more than a reference to one chain node. Advancing it
//! replaces that reference with the node's successor; no lock is taken and no other
//! cursor is affected. Cloning a stream yields a second cursor at the same position,
//! so any number of consumers can observe the identical, append-ordered sequence at
//! their own pace.
//!
//! ```
//! use observer_core::{Property, StreamEvent};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let property = Property::new(0);
//! let mut fast = property.observe();
//! let mut slow = fast.clone();
//!
//! property.update(1);
//! property.update(2);
//!
//! assert_eq!(fast.next().await, StreamEvent::Item(1));
//! assert_eq!(fast.next().await, StreamEvent::Item(2));
//! assert_eq!(slow.next().await, StreamEvent::Item(1)); // unaffected by `fast`
//! # }
//! ```

use crate::state_node::{Changed, StateNode};
use crate::StreamEvent;
use std::fmt;
use std::sync::Arc;

/// A read cursor into a [`Property`](crate::Property)'s value history.
///
/// Advancing requires `&mut self`: hand each concurrent consumer its own clone.
pub struct Stream<T> {
    node: Arc<StateNode<T>>,
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream").field("node", &self.node).finish()
    }
}

impl<T> Stream<T> {
    pub(crate) const fn at(node: Arc<StateNode<T>>) -> Self {
        Self { node }
    }

    /// Returns a future that resolves once a value follows the cursor's position.
    ///
    /// Only use it to detect the change; read the value with
    /// [`try_next`](Self::try_next) or [`next`](Self::next).
    #[must_use]
    pub fn changes(&self) -> Changed<T> {
        Changed::new(Arc::clone(&self.node))
    }

    /// Returns `true` if a value follows the cursor's position (non-blocking).
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.node.successor().is_some()
    }

    /// Returns `true` once the cursor rests on a terminal event.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.node.is_terminal()
    }
}

impl<T: Clone> Stream<T> {
    /// Returns the value at the cursor's position.
    ///
    /// `None` only for a fresh cursor on a property created with
    /// [`Property::empty`](crate::Property::empty) that has not advanced yet.
    #[must_use]
    pub fn value(&self) -> Option<StreamEvent<T>> {
        self.node.value().cloned()
    }

    /// Advances to the next value if one is already available (non-blocking).
    pub fn try_next(&mut self) -> Option<StreamEvent<T>> {
        let successor = Arc::clone(self.node.successor()?);
        self.node = successor;
        self.node.value().cloned()
    }

    /// Waits until a value follows the cursor's position, advances to it and
    /// returns it.
    ///
    /// Once the cursor rests on a terminal event, that event is returned again
    /// immediately: a sealed property never grows, so waiting would never end.
    pub async fn next(&mut self) -> StreamEvent<T> {
        loop {
            if let Some(event) = self.try_next() {
                return event;
            }

            if self.node.is_terminal() {
                if let Some(terminal) = self.value() {
                    return terminal;
                }
            }

            self.changes().await;
        }
    }

    /// Blocking flavour of [`next`](Self::next) for threads outside an async runtime.
    ///
    /// Do not call it from within an async task: it parks the executor thread.
    pub fn wait_next(&mut self) -> StreamEvent<T> {
        futures::executor::block_on(self.next())
    }

    /// Adapts this cursor into a [`futures::Stream`] of payload values that ends at
    /// the first terminal event.
    pub fn into_async_stream(self) -> impl futures::Stream<Item = T> {
        futures::stream::unfold(self, |mut cursor| async move {
            cursor.next().await.into_item().map(|item| (item, cursor))
        })
    }
}
