// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Flow, Operator, Pipeline};
use std::cmp::Ordering;
use std::fmt;

/// Tracks a running extremum under a three-way comparator.
struct Extremum<T, F> {
    compare: F,
    current: Option<T>,
    replace_on: Ordering,
}

impl<T, F> Extremum<T, F>
where
    F: FnMut(&T, &T) -> Ordering,
{
    // Ties keep the earlier item.
    fn offer(&mut self, item: T) {
        match &self.current {
            Some(current) if (self.compare)(current, &item) != self.replace_on => {}
            _ => self.current = Some(item),
        }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for Extremum<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extremum")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

/// Emits the smallest item at end of input.
#[derive(Debug)]
pub struct Min<T, F>(Extremum<T, F>);

impl<T, F> Min<T, F> {
    pub const fn new(compare: F) -> Self {
        Self(Extremum {
            compare,
            current: None,
            replace_on: Ordering::Greater,
        })
    }
}

impl<T, F> Operator<T> for Min<T, F>
where
    T: Send + 'static,
    F: FnMut(&T, &T) -> Ordering + Send + 'static,
{
    type Out = T;

    fn advance(&mut self, item: T) -> Flow<T> {
        self.0.offer(item);
        Flow::Discard
    }

    fn finalize(&mut self) -> Option<T> {
        self.0.current.take()
    }
}

/// Emits the largest item at end of input.
#[derive(Debug)]
pub struct Max<T, F>(Extremum<T, F>);

impl<T, F> Max<T, F> {
    pub const fn new(compare: F) -> Self {
        Self(Extremum {
            compare,
            current: None,
            replace_on: Ordering::Less,
        })
    }
}

impl<T, F> Operator<T> for Max<T, F>
where
    T: Send + 'static,
    F: FnMut(&T, &T) -> Ordering + Send + 'static,
{
    type Out = T;

    fn advance(&mut self, item: T) -> Flow<T> {
        self.0.offer(item);
        Flow::Discard
    }

    fn finalize(&mut self) -> Option<T> {
        self.0.current.take()
    }
}

impl<I, O> Pipeline<I, O>
where
    I: 'static,
    O: Send + 'static,
{
    /// Emits the minimum item under `compare` at end of input, if any item was seen.
    #[must_use]
    pub fn min<F>(self, compare: F) -> Self
    where
        F: FnMut(&O, &O) -> Ordering + Send + 'static,
    {
        self.pipe(Min::new(compare))
    }

    /// Emits the maximum item under `compare` at end of input, if any item was seen.
    #[must_use]
    pub fn max<F>(self, compare: F) -> Self
    where
        F: FnMut(&O, &O) -> Ordering + Send + 'static,
    {
        self.pipe(Max::new(compare))
    }
}
