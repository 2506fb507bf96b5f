// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Flow, Operator, Pipeline};
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

/// Drops items whose key has been seen before.
///
/// The set of seen keys grows without bound for the life of the pipeline.
pub struct Distinct<F, K> {
    key_fn: F,
    seen: HashSet<K>,
}

impl<F, K> Distinct<F, K> {
    pub fn new(key_fn: F) -> Self {
        Self {
            key_fn,
            seen: HashSet::new(),
        }
    }
}

impl<F, K: fmt::Debug> fmt::Debug for Distinct<F, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Distinct")
            .field("seen", &self.seen)
            .finish_non_exhaustive()
    }
}

impl<T, F, K> Operator<T> for Distinct<F, K>
where
    F: FnMut(&T) -> K + Send + 'static,
    K: Eq + Hash + Send + 'static,
{
    type Out = T;

    fn advance(&mut self, item: T) -> Flow<T> {
        if self.seen.insert((self.key_fn)(&item)) {
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
    /// Publishes each item whose key was never published before.
    #[must_use]
    pub fn distinct<K, F>(self, key_fn: F) -> Self
    where
        F: FnMut(&O) -> K + Send + 'static,
        K: Eq + Hash + Send + 'static,
    {
        self.pipe(Distinct::new(key_fn))
    }
}
