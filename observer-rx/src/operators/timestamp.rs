// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Flow, Operator, Pipeline};
use std::time::SystemTime;

/// An item paired with the wall-clock time it passed through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamped<T> {
    pub value: T,
    pub timestamp: SystemTime,
}

impl<T> Timestamped<T> {
    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Wraps every item with its capture time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timestamp;

impl<T> Operator<T> for Timestamp {
    type Out = Timestamped<T>;

    fn advance(&mut self, item: T) -> Flow<Timestamped<T>> {
        Flow::Continue(Timestamped {
            value: item,
            timestamp: SystemTime::now(),
        })
    }
}

impl<I, O> Pipeline<I, O>
where
    I: 'static,
    O: 'static,
{
    #[must_use]
    pub fn timestamp(self) -> Pipeline<I, Timestamped<O>> {
        self.pipe(Timestamp)
    }
}
