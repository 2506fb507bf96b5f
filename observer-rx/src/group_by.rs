// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{make_operable, Operable};
use futures::future::{select, Either};
use observer_core::{
    Anchor, CancellationToken, Observable, ObserverError, ObserverTask, Property, Stream,
    StreamEvent,
};
use std::pin::pin;
use std::sync::Arc;

impl<T> Operable<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Splits this pipeline's output into `partitions` child pipelines.
    ///
    /// Returns a pipeline that yields exactly `partitions` child [`Operable`]s, in
    /// index order, then ends. A background task routes every item to the child
    /// at `distribute(&item)`; per-child order matches source order. All children
    /// end together when this pipeline ends, and are cancelled together on
    /// cancellation.
    ///
    /// An index `>= partitions` stops routing: the task logs it and fails every
    /// child with [`ObserverError::PartitionOutOfRange`].
    ///
    /// # Panics
    ///
    /// Panics if `partitions` is 0, or if called outside a tokio runtime.
    ///
    /// # Example
    ///
    /// ```
    /// use observer_core::{CancellationToken, Property, StreamEvent};
    /// use observer_rx::make_operable;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let token = CancellationToken::new();
    /// let numbers = Property::<usize>::empty();
    /// let groups = make_operable(&token, &numbers).build().group_by(2, |v| v % 2);
    ///
    /// numbers.update_all(0..6);
    /// numbers.end();
    ///
    /// let partitions = groups.to_vec().await;
    /// assert_eq!(partitions[0].to_vec().await, vec![0, 2, 4]);
    /// assert_eq!(partitions[1].to_vec().await, vec![1, 3, 5]);
    /// # }
    /// ```
    pub fn group_by<F>(&self, partitions: usize, distribute: F) -> Operable<Operable<T>>
    where
        F: Fn(&T) -> usize + Send + 'static,
    {
        assert!(partitions > 0, "group_by: partition count must be at least 1");

        let token = self.token().clone();
        let label = self.label().unwrap_or("group_by").to_owned();
        let source = self.observe();
        let parent = Observable::anchor(self);

        let children: Vec<Property<T>> = (0..partitions).map(|_| Property::empty()).collect();
        // Child cursors are taken before anything can be routed to them.
        let pipelines: Vec<_> = children
            .iter()
            .enumerate()
            .map(|(index, child)| {
                make_operable(&token, child).with_label(format!("{label}/partition-{index}"))
            })
            .collect();

        let dispatcher: Anchor = {
            let token = token.clone();
            Arc::new(ObserverTask::spawn(move |task_token| async move {
                let _parent = parent;
                dispatch(source, distribute, children, token, task_token).await;
            }))
        };

        let root = Property::empty();
        let groups = make_operable(&token, &root)
            .with_label(format!("{label}/groups"))
            .anchored(Arc::clone(&dispatcher))
            .build();

        root.update_all(
            pipelines
                .into_iter()
                .map(|pipeline| pipeline.anchored(Arc::clone(&dispatcher)).build()),
        );
        root.end();

        groups
    }
}

fn seal_all<T: Clone>(children: &[Property<T>], terminal: &StreamEvent<T>) {
    for child in children {
        child.publish(terminal.clone());
    }
}

async fn dispatch<T, F>(
    mut source: Stream<T>,
    distribute: F,
    children: Vec<Property<T>>,
    token: CancellationToken,
    task_token: CancellationToken,
) where
    T: Clone + Send + Sync + 'static,
    F: Fn(&T) -> usize,
{
    loop {
        let cancelled = select(token.cancelled(), task_token.cancelled());
        let next = pin!(source.next());
        let event = match select(cancelled, next).await {
            Either::Left(_) => StreamEvent::Cancelled,
            Either::Right((event, _)) => event,
        };

        let item = match event {
            StreamEvent::Item(item) => item,
            terminal => {
                trace!(partitions = children.len(), "group_by: sealing partitions");
                seal_all(&children, &terminal);
                return;
            }
        };

        let index = distribute(&item);
        let Some(child) = children.get(index) else {
            error!(
                index,
                partitions = children.len(),
                "group_by: partition index out of range"
            );
            let error = ObserverError::partition_out_of_range(index, children.len());
            seal_all(&children, &StreamEvent::Error(error));
            return;
        };
        child.update(item);
    }
}
