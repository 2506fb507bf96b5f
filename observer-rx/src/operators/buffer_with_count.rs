// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Flow, Operator, Pipeline};
use std::mem;

/// Groups consecutive items into fixed-size batches.
#[derive(Debug, Clone)]
pub struct BufferWithCount<T> {
    size: usize,
    buffer: Vec<T>,
}

impl<T> BufferWithCount<T> {
    /// # Panics
    ///
    /// Panics if `size` is 0.
    pub fn new(size: usize) -> Self {
        assert!(size >= 1, "buffer_with_count: batch size must be at least 1");
        Self {
            size,
            buffer: Vec::with_capacity(size),
        }
    }
}

impl<T> Operator<T> for BufferWithCount<T>
where
    T: Send + 'static,
{
    type Out = Vec<T>;

    fn advance(&mut self, item: T) -> Flow<Vec<T>> {
        self.buffer.push(item);
        if self.buffer.len() < self.size {
            return Flow::Discard;
        }

        Flow::Continue(mem::replace(
            &mut self.buffer,
            Vec::with_capacity(self.size),
        ))
    }

    fn finalize(&mut self) -> Option<Vec<T>> {
        (!self.buffer.is_empty()).then(|| mem::take(&mut self.buffer))
    }
}

impl<I, O> Pipeline<I, O>
where
    I: 'static,
    O: Send + 'static,
{
    /// Emits items in batches of `size`. A non-empty partial batch is flushed at
    /// end of input; nothing is flushed on cancellation.
    ///
    /// # Panics
    ///
    /// Panics if `size` is 0.
    #[must_use]
    pub fn buffer_with_count(self, size: usize) -> Pipeline<I, Vec<O>> {
        self.pipe(BufferWithCount::new(size))
    }
}
