// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The per-item protocol every pipeline stage implements.

/// Outcome of feeding one item to an [`Operator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow<T> {
    /// Hand this value (the original item or a replacement) to the next operator.
    Continue(T),
    /// Drop the item; remaining operators are skipped and nothing is published.
    Discard,
}

impl<T> Flow<T> {
    #[must_use]
    pub const fn is_continue(&self) -> bool {
        matches!(self, Self::Continue(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Continue(value) => Some(value),
            Self::Discard => None,
        }
    }

    pub fn map<U, F>(self, f: F) -> Flow<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Continue(value) => Flow::Continue(f(value)),
            Self::Discard => Flow::Discard,
        }
    }
}

impl<T> From<Option<T>> for Flow<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Discard, Self::Continue)
    }
}

/// A per-item transform, filter or aggregate with an end-of-input hook.
///
/// Operators run strictly sequentially inside the pump task that owns them, once
/// per item and in attachment order, so they hold plain mutable state.
///
/// # Example
///
/// ```
/// use observer_rx::{Flow, Operator};
///
/// /// Emits the running sum, and the total once more at end of input.
/// struct RunningSum(i64);
///
/// impl Operator<i64> for RunningSum {
///     type Out = i64;
///
///     fn advance(&mut self, item: i64) -> Flow<i64> {
///         self.0 += item;
///         Flow::Continue(self.0)
///     }
///
///     fn finalize(&mut self) -> Option<i64> {
///         Some(self.0)
///     }
/// }
///
/// let mut sum = RunningSum(0);
/// assert_eq!(sum.advance(2), Flow::Continue(2));
/// assert_eq!(sum.advance(3), Flow::Continue(5));
/// assert_eq!(sum.finalize(), Some(5));
/// ```
pub trait Operator<In>: Send + 'static {
    type Out;

    /// Processes one item.
    fn advance(&mut self, item: In) -> Flow<Self::Out>;

    /// Called once at natural end of input; never on cancellation or error.
    fn finalize(&mut self) -> Option<Self::Out> {
        None
    }
}
