// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Flow, Operator, Pipeline};

/// Emits only the final item, at end of input.
#[derive(Debug, Clone)]
pub struct Last<T> {
    last: Option<T>,
}

impl<T> Last<T> {
    pub const fn new() -> Self {
        Self { last: None }
    }
}

impl<T> Default for Last<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Operator<T> for Last<T>
where
    T: Send + 'static,
{
    type Out = T;

    fn advance(&mut self, item: T) -> Flow<T> {
        self.last = Some(item);
        Flow::Discard
    }

    fn finalize(&mut self) -> Option<T> {
        self.last.take()
    }
}

/// Emits the final item at end of input, or a default if there was none.
#[derive(Debug, Clone)]
pub struct LastOrDefault<T> {
    last: Option<T>,
    default: Option<T>,
}

impl<T> LastOrDefault<T> {
    pub fn new(default: T) -> Self {
        Self {
            last: None,
            default: Some(default),
        }
    }
}

impl<T> Operator<T> for LastOrDefault<T>
where
    T: Send + 'static,
{
    type Out = T;

    fn advance(&mut self, item: T) -> Flow<T> {
        self.last = Some(item);
        Flow::Discard
    }

    fn finalize(&mut self) -> Option<T> {
        self.last.take().or_else(|| self.default.take())
    }
}

impl<I, O> Pipeline<I, O>
where
    I: 'static,
    O: Send + 'static,
{
    /// Emits the last item at end of input; nothing if the input was empty.
    #[must_use]
    pub fn last(self) -> Self {
        self.pipe(Last::new())
    }

    /// Emits the last item at end of input, or `default` if the input was empty.
    #[must_use]
    pub fn last_or_default(self, default: O) -> Self {
        self.pipe(LastOrDefault::new(default))
    }
}
