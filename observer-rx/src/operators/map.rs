// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Flow, Operator, Pipeline};
use std::fmt;
use std::marker::PhantomData;

/// Replaces every item with the result of a mapping function.
pub struct Map<F, U> {
    mapper: F,
    _out: PhantomData<fn() -> U>,
}

impl<F, U> Map<F, U> {
    pub const fn new(mapper: F) -> Self {
        Self {
            mapper,
            _out: PhantomData,
        }
    }
}

impl<F, U> fmt::Debug for Map<F, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map").finish_non_exhaustive()
    }
}

impl<T, U, F> Operator<T> for Map<F, U>
where
    F: FnMut(T) -> U + Send + 'static,
    U: 'static,
{
    type Out = U;

    fn advance(&mut self, item: T) -> Flow<U> {
        Flow::Continue((self.mapper)(item))
    }
}

impl<I, O> Pipeline<I, O>
where
    I: 'static,
    O: 'static,
{
    /// Transforms every item, possibly into another type.
    #[must_use]
    pub fn map<U, F>(self, mapper: F) -> Pipeline<I, U>
    where
        F: FnMut(O) -> U + Send + 'static,
        U: 'static,
    {
        self.pipe(Map::new(mapper))
    }
}
