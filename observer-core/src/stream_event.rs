// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::ObserverError;

/// An event read from a [`Stream`](crate::Stream).
///
/// Termination is expressed in-band: a payload is always `Item`, and the three
/// remaining variants are terminal. Once a property publishes a terminal event it
/// is sealed and nothing follows.
#[derive(Debug, Clone)]
pub enum StreamEvent<T> {
    /// A payload value.
    Item(T),
    /// The producer reached its natural end of input.
    End,
    /// The producer was stopped abruptly by cancellation.
    Cancelled,
    /// The producer stopped because of a reported failure.
    Error(ObserverError),
}

impl<T: PartialEq> PartialEq for StreamEvent<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Item(a), Self::Item(b)) => a == b,
            (Self::End, Self::End) | (Self::Cancelled, Self::Cancelled) => true,
            _ => false, // Errors are never equal
        }
    }
}

impl<T> StreamEvent<T> {
    /// Returns `true` if this is an `Item`.
    pub const fn is_item(&self) -> bool {
        matches!(self, Self::Item(_))
    }

    /// Returns `true` for `End`, `Cancelled` and `Error`.
    pub const fn is_terminal(&self) -> bool {
        !self.is_item()
    }

    /// Returns `true` if this is an `Error`.
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Converts from `StreamEvent<T>` to `Option<T>`, discarding terminal events.
    pub fn into_item(self) -> Option<T> {
        match self {
            Self::Item(v) => Some(v),
            _ => None,
        }
    }

    /// Borrows the payload, if any.
    pub const fn as_item(&self) -> Option<&T> {
        match self {
            Self::Item(v) => Some(v),
            _ => None,
        }
    }

    /// Maps an `Item` payload, leaving terminal events untouched.
    pub fn map<U, F>(self, f: F) -> StreamEvent<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Item(v) => StreamEvent::Item(f(v)),
            Self::End => StreamEvent::End,
            Self::Cancelled => StreamEvent::Cancelled,
            Self::Error(e) => StreamEvent::Error(e),
        }
    }

    /// Returns the contained payload, panicking on a terminal event.
    ///
    /// # Panics
    ///
    /// Panics if the event is not an `Item`.
    pub fn unwrap(self) -> T {
        match self {
            Self::Item(v) => v,
            Self::End => panic!("called `StreamEvent::unwrap()` on `End`"),
            Self::Cancelled => panic!("called `StreamEvent::unwrap()` on `Cancelled`"),
            Self::Error(e) => panic!("called `StreamEvent::unwrap()` on an `Error`: {e:?}"),
        }
    }
}
