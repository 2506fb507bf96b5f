// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Type-erased operator chain driven by a pipeline pump.

use crate::operator::{Flow, Operator};

/// A prefix of a pipeline's operator chain, from input type `I` to `O`.
pub(crate) trait Stage<I, O>: Send {
    /// Folds one input item through the chain; `None` when some operator discarded it.
    fn push(&mut self, item: I) -> Option<O>;

    /// Runs end-of-input processing, appending trailing items in operator order.
    fn finish(&mut self, trailing: &mut Vec<O>);
}

pub(crate) type BoxStage<I, O> = Box<dyn Stage<I, O>>;

/// The empty chain.
pub(crate) struct Identity;

impl<T> Stage<T, T> for Identity {
    fn push(&mut self, item: T) -> Option<T> {
        Some(item)
    }

    fn finish(&mut self, _trailing: &mut Vec<T>) {}
}

/// `head` followed by one more operator.
pub(crate) struct Then<I, M, Op> {
    head: BoxStage<I, M>,
    op: Op,
}

impl<I, M, Op> Then<I, M, Op> {
    pub(crate) fn new(head: BoxStage<I, M>, op: Op) -> Self {
        Self { head, op }
    }
}

impl<I, M, Op> Stage<I, Op::Out> for Then<I, M, Op>
where
    Op: Operator<M>,
{
    fn push(&mut self, item: I) -> Option<Op::Out> {
        let item = self.head.push(item)?;
        self.op.advance(item).into_option()
    }

    fn finish(&mut self, trailing: &mut Vec<Op::Out>) {
        // Upstream trailing items still pass through this operator before it finalizes.
        let mut upstream = Vec::new();
        self.head.finish(&mut upstream);
        for item in upstream {
            if let Flow::Continue(item) = self.op.advance(item) {
                trailing.push(item);
            }
        }
        trailing.extend(self.op.finalize());
    }
}
