// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Flow, Operator, Pipeline};
use std::time::Duration;
use tokio::time::Instant;

/// Rate limits items: an item passes only if at least `window` has elapsed
/// since the last item that passed, or since the operator was created if none
/// has passed yet.
///
/// The clock is [`tokio::time::Instant`], so pipelines using this operator can be
/// tested under paused tokio time.
#[derive(Debug, Clone)]
pub struct Debounce {
    window: Duration,
    last: Instant,
}

impl Debounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last: Instant::now(),
        }
    }
}

impl<T> Operator<T> for Debounce {
    type Out = T;

    fn advance(&mut self, item: T) -> Flow<T> {
        let now = Instant::now();
        if now.duration_since(self.last) < self.window {
            return Flow::Discard;
        }
        // Only emissions reset the window.
        self.last = now;
        Flow::Continue(item)
    }
}

impl<I, O> Pipeline<I, O>
where
    I: 'static,
    O: 'static,
{
    /// Drops items arriving less than `window` after the last emitted item.
    /// The window starts when the operator is attached, so an item arriving
    /// sooner than that is dropped too.
    #[must_use]
    pub fn debounce(self, window: Duration) -> Self {
        self.pipe(Debounce::new(window))
    }
}
