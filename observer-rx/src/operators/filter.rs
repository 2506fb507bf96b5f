// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Flow, Operator, Pipeline};

/// Keeps items matching a predicate.
#[derive(Debug, Clone)]
pub struct Filter<F> {
    predicate: F,
}

impl<F> Filter<F> {
    pub const fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<T, F> Operator<T> for Filter<F>
where
    F: FnMut(&T) -> bool + Send + 'static,
{
    type Out = T;

    fn advance(&mut self, item: T) -> Flow<T> {
        if (self.predicate)(&item) {
            Flow::Continue(item)
        } else {
            Flow::Discard
        }
    }
}

impl<I, O> Pipeline<I, O>
where
    I: 'static,
    O: 'static,
{
    /// Publishes only the items for which `predicate` returns `true`.
    ///
    /// # Example
    ///
    /// ```
    /// use observer_core::{CancellationToken, Property};
    /// use observer_rx::make_operable;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let token = CancellationToken::new();
    /// let property = Property::empty();
    /// let evens = make_operable(&token, &property).filter(|v| v % 2 == 0).build();
    ///
    /// property.update_all(1..=6);
    /// property.end();
    ///
    /// assert_eq!(evens.to_vec().await, vec![2, 4, 6]);
    /// # }
    /// ```
    #[must_use]
    pub fn filter<F>(self, predicate: F) -> Self
    where
        F: FnMut(&O) -> bool + Send + 'static,
    {
        self.pipe(Filter::new(predicate))
    }
}
