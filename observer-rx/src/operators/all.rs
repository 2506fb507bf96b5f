// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Flow, Operator, Pipeline};

/// Emits, at end of input, whether every item satisfied a predicate.
#[derive(Debug, Clone)]
pub struct All<F> {
    predicate: F,
    holds: bool,
}

impl<F> All<F> {
    pub const fn new(predicate: F) -> Self {
        Self {
            predicate,
            holds: true,
        }
    }
}

impl<T, F> Operator<T> for All<F>
where
    F: FnMut(&T) -> bool + Send + 'static,
{
    type Out = bool;

    fn advance(&mut self, item: T) -> Flow<bool> {
        // The predicate sees every item, even once the answer is known.
        if !(self.predicate)(&item) {
            self.holds = false;
        }
        Flow::Discard
    }

    fn finalize(&mut self) -> Option<bool> {
        Some(self.holds)
    }
}

impl<I, O> Pipeline<I, O>
where
    I: 'static,
    O: 'static,
{
    /// Emits a single boolean at end of input: `true` if `predicate` held for
    /// every item, including when there were none.
    #[must_use]
    pub fn all<F>(self, predicate: F) -> Pipeline<I, bool>
    where
        F: FnMut(&O) -> bool + Send + 'static,
    {
        self.pipe(All::new(predicate))
    }
}
