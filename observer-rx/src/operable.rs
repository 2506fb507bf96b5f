// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The running half of a pipeline.
//!
//! An [`Operable`] owns one background pump. The pump waits on its input cursor
//! and on cancellation, folds every item through the operator chain and
//! republishes the results on an internal [`Property`]. Consumers read that
//! property through the handle's shared output cursor, or through independent
//! cursors from [`Operable::observe`].
//!
//! Pump exit seals the output exactly once:
//!
//! | Input / trigger | Operators | Output |
//! |---|---|---|
//! | `End` | every operator finalizes, trailing items published | `End` |
//! | `Cancelled`, token cancelled, last handle dropped | none | `Cancelled` |
//! | `Error(e)` | none | `Error(e)` |
//!
//! In every case the completion hook then runs once and [`Operable::done`] resolves.

use crate::pipeline::{CompleteHook, NextHook, Pipeline, StartHook};
use crate::stage::BoxStage;
use crate::StartStrategy;
use futures::future::{select, BoxFuture, Either};
use futures::FutureExt;
use observer_core::{
    Anchor, CancellationToken, Changed, Fired, Observable, ObserverTask, Property, Signal, Stream,
    StreamEvent,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::pin::pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type Launch = Box<dyn FnOnce(CancellationToken) -> BoxFuture<'static, ()> + Send>;

struct Pending {
    launch: Launch,
    on_start: Option<StartHook>,
}

/// Exactly-once completion shared by the pump and every consumer-side helper.
struct Completion {
    completed: AtomicBool,
    hook: Mutex<Option<CompleteHook>>,
    done: Signal,
}

impl Completion {
    fn new(hook: Option<CompleteHook>) -> Self {
        Self {
            completed: AtomicBool::new(false),
            hook: Mutex::new(hook),
            done: Signal::new(),
        }
    }

    fn complete(&self) {
        if self.completed.swap(true, Ordering::AcqRel) {
            return;
        }

        let hook = self.hook.lock().take();
        if let Some(hook) = hook {
            hook();
        }
        self.done.fire();
    }
}

/// What keeps a pump running: its task and everything upstream of it.
///
/// This is the only part of a pipeline that downstream consumers anchor, so
/// they never keep the handle's shared output cursor alive.
struct Engine {
    pending: Mutex<Option<Pending>>,
    task: Mutex<Option<ObserverTask>>,
    _anchors: Vec<Anchor>,
}

impl Engine {
    fn start(&self) {
        let Some(pending) = self.pending.lock().take() else {
            return;
        };

        let task = ObserverTask::spawn(pending.launch);
        *self.task.lock() = Some(task);

        if let Some(on_start) = pending.on_start {
            on_start();
        }
    }

    fn is_started(&self) -> bool {
        self.pending.lock().is_none()
    }
}

struct Shared<T> {
    label: Option<String>,
    token: CancellationToken,
    engine: Arc<Engine>,
    output: Property<T>,
    cursor: Mutex<Stream<T>>,
    on_next: Option<NextHook<T>>,
    completion: Arc<Completion>,
}

/// A pipeline handle: an output stream fed by a background pump.
///
/// Handles are cheap to clone. All clones share one pump and one output cursor,
/// so concurrent [`next`](Self::next) callers each receive distinct items; use
/// [`observe`](Self::observe) to get an independent cursor instead.
///
/// Every accessor starts the pump if it is not running yet. Dropping the last
/// handle stops the pump abruptly, unless a downstream pipeline, `concat` or
/// `group_by` still reads from it. Those keep only the pump alive, so output
/// history is released once the last handle is gone and downstream readers
/// have moved past it.
pub struct Operable<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Operable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> fmt::Debug for Operable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operable")
            .field("label", &self.shared.label)
            .field("started", &self.shared.engine.is_started())
            .field("done", &self.shared.completion.done.is_fired())
            .finish_non_exhaustive()
    }
}

impl<T> Operable<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub(crate) fn new<I>(pipeline: Pipeline<I, T>) -> Self
    where
        I: Clone + Send + Sync + 'static,
    {
        let Pipeline {
            token,
            input,
            stages,
            options,
            on_start,
            on_next,
            on_complete,
            anchors,
        } = pipeline;

        let output = Property::empty();
        let cursor = output.observe();
        let completion = Arc::new(Completion::new(on_complete));

        let launch: Launch = {
            let pump = Pump {
                input,
                stages,
                output: output.clone(),
                completion: Arc::clone(&completion),
                token: token.clone(),
                label: options.label().to_owned(),
            };
            Box::new(move |task_token| pump.run(task_token).boxed())
        };

        let operable = Self {
            shared: Arc::new(Shared {
                label: options.label.clone(),
                token,
                engine: Arc::new(Engine {
                    pending: Mutex::new(Some(Pending { launch, on_start })),
                    task: Mutex::new(None),
                    _anchors: anchors,
                }),
                output,
                cursor: Mutex::new(cursor),
                on_next,
                completion,
            }),
        };

        if options.start_strategy == StartStrategy::Eager {
            operable.start();
        }
        operable
    }

    /// Spawns the pump on the current tokio runtime and runs the `on_start` hook.
    /// Later calls do nothing.
    ///
    /// # Panics
    ///
    /// Panics if the pump has to be spawned outside a tokio runtime.
    pub fn start(&self) {
        self.shared.engine.start();
    }

    /// The most recent event published by the pump, if any.
    pub fn value(&self) -> Option<StreamEvent<T>> {
        self.start();
        self.shared.output.value()
    }

    /// Resolves when the shared output cursor can advance.
    pub fn changes(&self) -> Changed<T> {
        self.start();
        self.shared.cursor.lock().changes()
    }

    pub fn has_next(&self) -> bool {
        self.start();
        self.shared.cursor.lock().has_next()
    }

    /// Advances the shared output cursor without waiting.
    pub fn try_next(&self) -> Option<StreamEvent<T>> {
        self.start();
        let event = self.shared.cursor.lock().try_next()?;
        Some(self.deliver(event))
    }

    /// Waits for the next event on the shared output cursor.
    ///
    /// Items run the `on_next` hook; a terminal event runs completion. If the
    /// pipeline's token is cancelled while nothing is pending, returns
    /// [`StreamEvent::Cancelled`] without waiting for the pump to seal the output.
    pub async fn next(&self) -> StreamEvent<T> {
        self.start();
        loop {
            // Hooks run in `deliver`, after the cursor lock is released.
            let ready = {
                let mut cursor = self.shared.cursor.lock();
                if let Some(event) = cursor.try_next() {
                    Ok(event)
                } else if let Some(terminal) = cursor.value().filter(StreamEvent::is_terminal) {
                    Ok(terminal)
                } else {
                    Err(cursor.changes())
                }
            };
            let changed = match ready {
                Ok(event) => return self.deliver(event),
                Err(changed) => changed,
            };

            if let Either::Right(_) = select(changed, self.shared.token.cancelled()).await {
                let event = self.shared.cursor.lock().try_next();
                return self.deliver(event.unwrap_or(StreamEvent::Cancelled));
            }
        }
    }

    /// Blocking form of [`next`](Self::next), for consumers on plain threads.
    ///
    /// # Panics
    ///
    /// Panics if the pump has not been started yet and this is called outside a
    /// tokio runtime. Call [`start`](Self::start) from the runtime first.
    pub fn wait_next(&self) -> StreamEvent<T> {
        self.start();
        futures::executor::block_on(self.next())
    }

    fn deliver(&self, event: StreamEvent<T>) -> StreamEvent<T> {
        match &event {
            StreamEvent::Item(item) => {
                if let Some(on_next) = &self.shared.on_next {
                    on_next(item);
                }
            }
            _ => self.shared.completion.complete(),
        }
        event
    }

    /// Resolves once the pipeline has completed and its completion hook has run.
    pub fn done(&self) -> Fired {
        self.start();
        self.shared.completion.done.fired()
    }

    pub fn is_done(&self) -> bool {
        self.start();
        self.shared.completion.done.is_fired()
    }

    /// An independent cursor at the shared cursor's current position.
    pub fn observe(&self) -> Stream<T> {
        self.start();
        self.shared.cursor.lock().clone()
    }

    /// Alias of [`observe`](Self::observe).
    pub fn clone_stream(&self) -> Stream<T> {
        self.observe()
    }

    /// Collects items until the first terminal event.
    ///
    /// On cancellation or error the items collected so far are returned.
    /// Completion always runs before this returns.
    pub async fn to_vec(&self) -> Vec<T> {
        let mut items = Vec::new();
        while let StreamEvent::Item(item) = self.next().await {
            items.push(item);
        }
        self.shared.completion.complete();
        items
    }

    /// Collects items into a map keyed by `key_fn`; later items replace earlier
    /// ones with the same key. Terminates like [`to_vec`](Self::to_vec).
    pub async fn to_map<K, F>(&self, mut key_fn: F) -> HashMap<K, T>
    where
        K: Eq + Hash,
        F: FnMut(&T) -> K,
    {
        let mut items = HashMap::new();
        while let StreamEvent::Item(item) = self.next().await {
            items.insert(key_fn(&item), item);
        }
        self.shared.completion.complete();
        items
    }

    pub fn token(&self) -> &CancellationToken {
        &self.shared.token
    }

    pub fn label(&self) -> Option<&str> {
        self.shared.label.as_deref()
    }
}

impl<T> Observable<T> for Operable<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn observe(&self) -> Stream<T> {
        Operable::observe(self)
    }

    fn anchor(&self) -> Option<Anchor> {
        Some(Arc::clone(&self.shared.engine) as Anchor)
    }
}

/// Everything the pump task owns. Holds no reference back to the handle, so
/// dropping the last handle can stop it.
struct Pump<I, O> {
    input: Stream<I>,
    stages: BoxStage<I, O>,
    output: Property<O>,
    completion: Arc<Completion>,
    token: CancellationToken,
    label: String,
}

impl<I, O> Pump<I, O>
where
    I: Clone + Send + Sync + 'static,
    O: Send + Sync + 'static,
{
    async fn run(mut self, task_token: CancellationToken) {
        debug!(label = %self.label, "pipeline pump started");

        let outcome = loop {
            let cancelled = select(self.token.cancelled(), task_token.cancelled());
            let next = pin!(self.input.next());
            let event = match select(cancelled, next).await {
                Either::Left(_) => {
                    self.output.abort();
                    break "cancelled";
                }
                Either::Right((event, _)) => event,
            };

            match event {
                StreamEvent::Item(item) => {
                    if let Some(item) = self.stages.push(item) {
                        self.output.update(item);
                    }
                }
                StreamEvent::End => {
                    let mut trailing = Vec::new();
                    self.stages.finish(&mut trailing);
                    let count = self.output.update_all(trailing);
                    trace!(label = %self.label, trailing = count, "operators finalized");
                    self.output.end();
                    break "end";
                }
                StreamEvent::Cancelled => {
                    self.output.abort();
                    break "input cancelled";
                }
                StreamEvent::Error(error) => {
                    warn!(label = %self.label, %error, "pipeline input failed");
                    self.output.fail(error);
                    break "error";
                }
            }
        };

        self.completion.complete();
        debug!(label = %self.label, outcome, "pipeline pump exited");
    }
}
