// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{make_operable, Pipeline};
use futures::future::{select, Either};
use observer_core::{Anchor, CancellationToken, Observable, ObserverTask, Property, Stream, StreamEvent};
use std::pin::pin;
use std::sync::Arc;

/// Emits every item of every source, one source after another, without interleaving.
///
/// Each source is observed up front, so the originals stay usable by their
/// owners. Source `i + 1` is not read until source `i` has ended. A source that
/// ends with `Cancelled` or `Error` stops the concatenation and the output ends
/// the same way; the remaining sources are never read.
///
/// The draining task starts immediately and is kept alive by the returned
/// pipeline (and the [`Operable`](crate::Operable) built from it).
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
///
/// # Example
///
/// ```
/// use observer_core::{CancellationToken, Property};
/// use observer_rx::concat;
///
/// # #[tokio::main]
/// # async fn main() {
/// let token = CancellationToken::new();
/// let first = Property::empty();
/// let second = Property::empty();
///
/// let all = concat(&token, [&first, &second]).build();
///
/// second.update_all([3, 4]);
/// second.end();
/// first.update_all([1, 2]);
/// first.end();
///
/// assert_eq!(all.to_vec().await, vec![1, 2, 3, 4]);
/// # }
/// ```
pub fn concat<T, S, It>(token: &CancellationToken, sources: It) -> Pipeline<T, T>
where
    It: IntoIterator<Item = S>,
    S: Observable<T>,
    T: Clone + Send + Sync + 'static,
{
    let sources: Vec<_> = sources
        .into_iter()
        .map(|source| (source.observe(), source.anchor()))
        .collect();

    let output = Property::empty();
    let pipeline = make_operable(token, &output);

    let task = {
        let token = token.clone();
        ObserverTask::spawn(move |task_token| drain(sources, output, token, task_token))
    };

    pipeline.anchored(Arc::new(task))
}

/// Seals the output with `Cancelled` if the drain is dropped before sealing it.
struct SealOnDrop<T>(Property<T>);

impl<T> Drop for SealOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

async fn drain<T>(
    sources: Vec<(Stream<T>, Option<Anchor>)>,
    output: Property<T>,
    token: CancellationToken,
    task_token: CancellationToken,
) where
    T: Clone + Send + Sync + 'static,
{
    let output = SealOnDrop(output);
    let count = sources.len();

    for (index, (mut source, _anchor)) in sources.into_iter().enumerate() {
        debug!(source = index, sources = count, "concat: draining source");

        loop {
            let cancelled = select(token.cancelled(), task_token.cancelled());
            let next = pin!(source.next());
            let event = match select(cancelled, next).await {
                Either::Left(_) => {
                    debug!(source = index, "concat: cancelled");
                    output.0.abort();
                    return;
                }
                Either::Right((event, _)) => event,
            };

            match event {
                StreamEvent::Item(item) => {
                    output.0.update(item);
                }
                StreamEvent::End => break,
                terminal => {
                    debug!(source = index, "concat: source terminated abnormally");
                    output.0.publish(terminal);
                    return;
                }
            }
        }
    }

    output.0.end();
}
