// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Flow, Operator, Pipeline};

/// Emits `true` on the first matching item, or `false` at end of input if none matched.
#[derive(Debug, Clone)]
pub struct Contains<F> {
    predicate: F,
    found: bool,
}

impl<F> Contains<F> {
    pub const fn new(predicate: F) -> Self {
        Self {
            predicate,
            found: false,
        }
    }
}

impl<T, F> Operator<T> for Contains<F>
where
    F: FnMut(&T) -> bool + Send + 'static,
{
    type Out = bool;

    fn advance(&mut self, item: T) -> Flow<bool> {
        if self.found {
            return Flow::Discard;
        }

        if (self.predicate)(&item) {
            self.found = true;
            Flow::Continue(true)
        } else {
            Flow::Discard
        }
    }

    fn finalize(&mut self) -> Option<bool> {
        (!self.found).then_some(false)
    }
}

impl<I, O> Pipeline<I, O>
where
    I: 'static,
    O: 'static,
{
    /// Emits `true` exactly once, at the first item matching `predicate`, and
    /// ignores everything after it. Emits `false` at end of input if nothing matched.
    #[must_use]
    pub fn contains<F>(self, predicate: F) -> Pipeline<I, bool>
    where
        F: FnMut(&O) -> bool + Send + 'static,
    {
        self.pipe(Contains::new(predicate))
    }
}
