// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Flow, Operator, Pipeline};

/// Drops items while a predicate holds, then passes everything.
#[derive(Debug, Clone)]
pub struct SkipWhile<F> {
    predicate: F,
    skipping: bool,
}

impl<F> SkipWhile<F> {
    pub const fn new(predicate: F) -> Self {
        Self {
            predicate,
            skipping: true,
        }
    }
}

impl<T, F> Operator<T> for SkipWhile<F>
where
    F: FnMut(&T) -> bool + Send + 'static,
{
    type Out = T;

    fn advance(&mut self, item: T) -> Flow<T> {
        if self.skipping && (self.predicate)(&item) {
            return Flow::Discard;
        }

        self.skipping = false;
        Flow::Continue(item)
    }
}

impl<I, O> Pipeline<I, O>
where
    I: 'static,
    O: 'static,
{
    /// Drops items until `predicate` first returns `false`; that item and every
    /// later one pass unconditionally.
    #[must_use]
    pub fn skip_while<F>(self, predicate: F) -> Self
    where
        F: FnMut(&O) -> bool + Send + 'static,
    {
        self.pipe(SkipWhile::new(predicate))
    }
}
