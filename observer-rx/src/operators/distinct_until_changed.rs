// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Flow, Operator, Pipeline};
use std::fmt;

/// Drops items whose key equals the key of the immediately preceding item.
pub struct DistinctUntilChanged<F, K> {
    key_fn: F,
    last: Option<K>,
}

impl<F, K> DistinctUntilChanged<F, K> {
    pub const fn new(key_fn: F) -> Self {
        Self { key_fn, last: None }
    }
}

impl<F, K: fmt::Debug> fmt::Debug for DistinctUntilChanged<F, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistinctUntilChanged")
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}

impl<T, F, K> Operator<T> for DistinctUntilChanged<F, K>
where
    F: FnMut(&T) -> K + Send + 'static,
    K: PartialEq + Send + 'static,
{
    type Out = T;

    fn advance(&mut self, item: T) -> Flow<T> {
        let key = (self.key_fn)(&item);
        if self.last.as_ref() == Some(&key) {
            return Flow::Discard;
        }

        self.last = Some(key);
        Flow::Continue(item)
    }
}

impl<I, O> Pipeline<I, O>
where
    I: 'static,
    O: 'static,
{
    /// Suppresses consecutive duplicates by key. The first item always passes.
    #[must_use]
    pub fn distinct_until_changed<K, F>(self, key_fn: F) -> Self
    where
        F: FnMut(&O) -> K + Send + 'static,
        K: PartialEq + Send + 'static,
    {
        self.pipe(DistinctUntilChanged::new(key_fn))
    }
}
