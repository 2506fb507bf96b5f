// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Pipeline construction.
//!
//! A [`Pipeline`] is the frozen-before-start half of an [`Operable`]: it owns the
//! input cursor, the operator chain, the options and the lifecycle hooks. Every
//! attachment method consumes the builder and returns a new one (possibly with a
//! different output type), so a chain can never change once [`Pipeline::build`]
//! has handed it to a running pump.

use crate::operable::Operable;
use crate::stage::{BoxStage, Identity, Then};
use crate::{Operator, Options, StartStrategy};
use observer_core::{Anchor, CancellationToken, Observable, Stream};
use std::fmt;

pub(crate) type StartHook = Box<dyn FnOnce() + Send>;
pub(crate) type NextHook<T> = Box<dyn Fn(&T) + Send + Sync>;
pub(crate) type CompleteHook = Box<dyn FnOnce() + Send>;

/// Builder for an [`Operable`] reading `I` items and publishing `O` items.
pub struct Pipeline<I, O> {
    pub(crate) token: CancellationToken,
    pub(crate) input: Stream<I>,
    pub(crate) stages: BoxStage<I, O>,
    pub(crate) options: Options,
    pub(crate) on_start: Option<StartHook>,
    pub(crate) on_next: Option<NextHook<O>>,
    pub(crate) on_complete: Option<CompleteHook>,
    pub(crate) anchors: Vec<Anchor>,
}

/// Starts a pipeline over `source`.
///
/// The input cursor is taken now, so every value `source` publishes after this
/// call is seen by the pipeline regardless of when its pump starts. The
/// pipeline stops abruptly once `token` is cancelled.
///
/// # Example
///
/// ```
/// use observer_core::{CancellationToken, Property};
/// use observer_rx::make_operable;
///
/// # #[tokio::main]
/// # async fn main() {
/// let token = CancellationToken::new();
/// let prices = Property::empty();
///
/// let doubled = make_operable(&token, &prices)
///     .filter(|p| *p > 10)
///     .map(|p| p * 2)
///     .build();
///
/// prices.update_all([5, 20, 8, 30]);
/// prices.end();
///
/// assert_eq!(doubled.to_vec().await, vec![40, 60]);
/// # }
/// ```
pub fn make_operable<T, S>(token: &CancellationToken, source: &S) -> Pipeline<T, T>
where
    S: Observable<T> + ?Sized,
    T: 'static,
{
    Pipeline {
        token: token.clone(),
        input: source.observe(),
        stages: Box::new(Identity),
        options: Options::default(),
        on_start: None,
        on_next: None,
        on_complete: None,
        anchors: source.anchor().into_iter().collect(),
    }
}

impl<I, O> Pipeline<I, O>
where
    I: 'static,
    O: 'static,
{
    /// Appends a custom operator to the chain.
    ///
    /// # Panics
    ///
    /// Panics if [`on_next`](Self::on_next) was already registered: the hook is
    /// typed by the output of the last operator.
    #[must_use]
    pub fn pipe<Op>(self, op: Op) -> Pipeline<I, Op::Out>
    where
        Op: Operator<O>,
        Op::Out: 'static,
    {
        assert!(
            self.on_next.is_none(),
            "pipeline: operators must be attached before on_next"
        );

        Pipeline {
            token: self.token,
            input: self.input,
            stages: Box::new(Then::new(self.stages, op)),
            options: self.options,
            on_start: self.on_start,
            on_next: None,
            on_complete: self.on_complete,
            anchors: self.anchors,
        }
    }
}

impl<I, O> Pipeline<I, O> {
    /// Runs once, right after the pump has been spawned.
    #[must_use]
    pub fn on_start<F>(mut self, hook: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.on_start = Some(Box::new(hook));
        self
    }

    /// Runs for every item a consumer reads through [`Operable::next`] and the
    /// collectors built on it. Must be registered after the last operator.
    #[must_use]
    pub fn on_next<F>(mut self, hook: F) -> Self
    where
        F: Fn(&O) + Send + Sync + 'static,
    {
        self.on_next = Some(Box::new(hook));
        self
    }

    /// Runs exactly once when the pipeline completes, whatever the cause.
    #[must_use]
    pub fn on_complete<F>(mut self, hook: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.on_complete = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_start_strategy(mut self, start_strategy: StartStrategy) -> Self {
        self.options.start_strategy = start_strategy;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.options.label = Some(label.into());
        self
    }

    /// Keeps `anchor` alive for as long as the built pipeline exists.
    pub(crate) fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchors.push(anchor);
        self
    }
}

impl<I, O> Pipeline<I, O>
where
    I: Clone + Send + Sync + 'static,
    O: Clone + Send + Sync + 'static,
{
    /// Freezes the chain into a running (or, when lazy, ready-to-run) [`Operable`].
    ///
    /// # Panics
    ///
    /// With [`StartStrategy::Eager`], panics if called outside a tokio runtime.
    pub fn build(self) -> Operable<O> {
        Operable::new(self)
    }
}

impl<I, O> fmt::Debug for Pipeline<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("options", &self.options)
            .field("on_start", &self.on_start.is_some())
            .field("on_next", &self.on_next.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish_non_exhaustive()
    }
}
