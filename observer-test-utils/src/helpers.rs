// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use observer_core::{Property, Stream, StreamEvent};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, timeout};

/// Awaits `future`, panicking if it takes longer than `timeout_ms`.
pub async fn within<F>(timeout_ms: u64, future: F) -> F::Output
where
    F: Future,
{
    match timeout(Duration::from_millis(timeout_ms), future).await {
        Ok(output) => output,
        Err(_) => panic!("Timeout: no result within {timeout_ms}ms"),
    }
}

/// Reads the next event from `stream`, panicking if none arrives within `timeout_ms`.
pub async fn next_within<T: Clone>(stream: &mut Stream<T>, timeout_ms: u64) -> StreamEvent<T> {
    within(timeout_ms, stream.next()).await
}

/// Panics if `future` completes within `timeout_ms`.
pub async fn assert_pending<F>(future: F, timeout_ms: u64)
where
    F: Future,
{
    tokio::select! {
        _ = future => {
            panic!("Unexpected completion, expected the future to stay pending.");
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

/// Panics if `stream` can advance within `timeout_ms`.
pub async fn assert_no_event<T>(stream: &Stream<T>, timeout_ms: u64) {
    assert_pending(stream.changes(), timeout_ms).await;
}

/// Publishes `values` and `End` on a fresh property, returning it together with a
/// cursor taken before the first value, so the cursor (or a pipeline built on it)
/// reads every value.
pub fn seed_property<T, I>(values: I) -> (Property<T>, Stream<T>)
where
    I: IntoIterator<Item = T>,
{
    let (property, stream) = seed_open_property(values);
    property.end();
    (property, stream)
}

/// Like [`seed_property`], but leaves the property open for further updates.
pub fn seed_open_property<T, I>(values: I) -> (Property<T>, Stream<T>)
where
    I: IntoIterator<Item = T>,
{
    let property = Property::empty();
    let stream = property.observe();
    property.update_all(values);
    (property, stream)
}
