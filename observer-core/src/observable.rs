// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Property, Stream};
use std::any::Any;
use std::sync::Arc;

/// Opaque handle keeping the producer behind a cursor alive.
///
/// Background producers (pipeline pumps, concat drains, group-by dispatchers) stop
/// when their last owner goes away. A consumer that only holds a cursor passes the
/// anchor along so the producer outlives the consumer.
pub type Anchor = Arc<dyn Any + Send + Sync>;

/// Anything that can hand out a fresh, independent cursor over a value sequence.
///
/// Implemented for [`Property`] (a cursor at its current value) and [`Stream`]
/// (a clone at the same position). Combinators accept `Observable` sources so
/// callers can mix properties, cursors and pipelines freely; the original sources
/// stay usable by their owners.
pub trait Observable<T> {
    /// Returns a new cursor; advancing it never affects any other cursor.
    fn observe(&self) -> Stream<T>;

    /// Returns the handle that must stay alive for cursors from [`observe`](Self::observe)
    /// to keep receiving values. Passive sources have none.
    fn anchor(&self) -> Option<Anchor> {
        None
    }
}

impl<T> Observable<T> for Property<T> {
    fn observe(&self) -> Stream<T> {
        Property::observe(self)
    }
}

impl<T> Observable<T> for Stream<T> {
    fn observe(&self) -> Stream<T> {
        self.clone()
    }
}

impl<T, O> Observable<T> for &O
where
    O: Observable<T> + ?Sized,
{
    fn observe(&self) -> Stream<T> {
        (**self).observe()
    }

    fn anchor(&self) -> Option<Anchor> {
        (**self).anchor()
    }
}
