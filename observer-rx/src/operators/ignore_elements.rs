// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Flow, Operator, Pipeline};

/// Drops every item; only the terminal event reaches the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreElements;

impl<T> Operator<T> for IgnoreElements {
    type Out = T;

    fn advance(&mut self, _item: T) -> Flow<T> {
        Flow::Discard
    }
}

impl<I, O> Pipeline<I, O>
where
    I: 'static,
    O: 'static,
{
    /// Suppresses all items, preserving only termination.
    #[must_use]
    pub fn ignore_elements(self) -> Self {
        self.pipe(IgnoreElements)
    }
}
