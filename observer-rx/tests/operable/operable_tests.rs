// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use observer_core::{CancellationToken, ObserverError, Property, StreamEvent};
use observer_rx::{make_operable, Operable, Options, StartStrategy};
use observer_test_utils::test_data::{people, person_alice, person_bob};
use observer_test_utils::{next_within, seed_property, within, Person};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let hook = {
        let count = count.clone();
        move || {
            count.fetch_add(1, Ordering::SeqCst);
        }
    };
    (count, hook)
}

#[tokio::test]
async fn test_lazy_pipeline_starts_on_first_access() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let source = Property::new(1);
    let (starts, on_start) = counter();
    let operable = make_operable(&token, &source).on_start(on_start).build();

    // Act & Assert
    assert_eq!(starts.load(Ordering::SeqCst), 0);

    let _ = operable.has_next();
    let _ = operable.value();
    operable.start();
    assert_eq!(starts.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test]
async fn test_eager_pipeline_starts_at_build() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let source = Property::new(1);
    let (starts, on_start) = counter();

    // Act
    let _operable = make_operable(&token, &source)
        .on_start(on_start)
        .with_options(Options::new().with_start_strategy(StartStrategy::Eager))
        .build();

    // Assert
    assert_eq!(starts.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test]
async fn test_values_published_before_start_are_not_missed() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let source = Property::empty();
    let operable = make_operable(&token, &source).build();

    // Act - publish everything while the pipeline is still lazy
    source.update_all([1, 2, 3]);
    source.end();

    // Assert
    assert_eq!(within(500, operable.to_vec()).await, vec![1, 2, 3]);

    Ok(())
}

#[tokio::test]
async fn test_pipeline_skips_source_value_present_at_construction() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let source = Property::new(0);
    let operable = make_operable(&token, &source).build();

    // Act
    source.update(1);
    source.end();

    // Assert
    assert_eq!(within(500, operable.to_vec()).await, vec![1]);

    Ok(())
}

#[tokio::test]
async fn test_completion_runs_once_on_natural_end() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let (_source, stream) = seed_property(1..=5);
    let (completions, on_complete) = counter();
    let operable = make_operable(&token, &stream).on_complete(on_complete).build();

    // Act
    let items = within(500, operable.to_vec()).await;
    let again = within(500, operable.to_vec()).await;
    let by_value = within(500, operable.to_map(|v| *v)).await;
    within(500, operable.done()).await;

    // Assert
    assert_eq!(items, vec![1, 2, 3, 4, 5]);
    assert!(again.is_empty());
    assert!(by_value.is_empty());
    assert_eq!(completions.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test]
async fn test_completion_runs_once_on_cancellation() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let source: Property<i32> = Property::empty();
    let (completions, on_complete) = counter();
    let operable = make_operable(&token, &source).on_complete(on_complete).build();
    operable.start();

    // Act
    token.cancel();
    let collected = within(500, operable.to_vec()).await;
    within(500, operable.done()).await;

    // Assert
    assert!(collected.is_empty());
    assert_eq!(completions.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test]
async fn test_completion_runs_once_under_concurrent_collectors() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let source = Property::empty();
    let (completions, on_complete) = counter();
    let operable = make_operable(&token, &source).on_complete(on_complete).build();

    let as_vec = tokio::spawn({
        let operable = operable.clone();
        async move { operable.to_vec().await }
    });
    let as_map = tokio::spawn({
        let operable = operable.clone();
        async move { operable.to_map(|v: &i32| *v).await }
    });

    // Act
    source.update_all(0..100);
    source.end();

    // Assert - the shared cursor hands every item to exactly one collector
    let as_vec = within(1_000, as_vec).await?;
    let as_map = within(1_000, as_map).await?;
    assert_eq!(as_vec.len() + as_map.len(), 100);

    let all: HashSet<i32> = as_vec.into_iter().chain(as_map.into_keys()).collect();
    assert_eq!(all, (0..100).collect::<HashSet<_>>());
    assert_eq!(completions.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test]
async fn test_done_resolves_after_completion_hook() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let (_source, stream) = seed_property([1]);
    let hook_ran = Arc::new(AtomicBool::new(false));
    let flag = hook_ran.clone();
    let operable = make_operable(&token, &stream)
        .on_complete(move || flag.store(true, Ordering::SeqCst))
        .build();

    // Act
    within(500, operable.done()).await;

    // Assert
    assert!(hook_ran.load(Ordering::SeqCst));
    assert!(operable.is_done());

    Ok(())
}

#[tokio::test]
async fn test_on_next_sees_every_consumed_item() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let (_source, stream) = seed_property(people());
    let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let log = seen.clone();
    let operable = make_operable(&token, &stream)
        .map(|p: Person| p.name)
        .on_next(move |name: &String| log.lock().push(name.clone()))
        .build();

    // Act
    let names = within(500, operable.to_vec()).await;

    // Assert
    assert_eq!(*seen.lock(), names);

    Ok(())
}

#[test]
#[should_panic(expected = "operators must be attached before on_next")]
fn test_operator_after_on_next_panics() {
    let token = CancellationToken::new();
    let source = Property::<i32>::empty();
    let _ = make_operable(&token, &source)
        .on_next(|_| {})
        .filter(|v| *v > 0);
}

#[tokio::test]
async fn test_next_after_end_keeps_returning_end() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let (_source, stream) = seed_property([person_alice()]);
    let operable = make_operable(&token, &stream).build();

    // Act & Assert
    assert_eq!(within(500, operable.next()).await, StreamEvent::Item(person_alice()));
    assert_eq!(within(500, operable.next()).await, StreamEvent::End);
    assert_eq!(within(500, operable.next()).await, StreamEvent::End);
    assert!(operable.try_next().is_none());

    Ok(())
}

#[tokio::test]
async fn test_value_reports_latest_output() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let source = Property::empty();
    let operable = make_operable(&token, &source).build();
    let mut output = operable.observe();

    // Act
    source.update(person_alice());
    source.update(person_bob());
    assert_eq!(next_within(&mut output, 500).await, StreamEvent::Item(person_alice()));
    assert_eq!(next_within(&mut output, 500).await, StreamEvent::Item(person_bob()));

    // Assert
    assert_eq!(operable.value(), Some(StreamEvent::Item(person_bob())));

    Ok(())
}

#[tokio::test]
async fn test_independent_cursors_do_not_share_progress() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let (_source, stream) = seed_property([1, 2, 3]);
    let operable = make_operable(&token, &stream).build();
    let mut first = operable.observe();
    let mut second = operable.clone_stream();

    // Act
    let first_items: Vec<_> = [
        next_within(&mut first, 500).await,
        next_within(&mut first, 500).await,
    ]
    .into();

    // Assert
    assert_eq!(first_items, vec![StreamEvent::Item(1), StreamEvent::Item(2)]);
    assert_eq!(next_within(&mut second, 500).await, StreamEvent::Item(1));
    assert_eq!(within(500, operable.to_vec()).await, vec![1, 2, 3]);

    Ok(())
}

#[tokio::test]
async fn test_input_error_is_forwarded_without_finalizing() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let source = Property::empty();
    let last = make_operable(&token, &source).last().build();

    // Act
    source.update_all([1, 2, 3]);
    source.fail(ObserverError::stream_error("sensor offline"));

    // Assert
    let event = within(500, last.next()).await;
    assert!(matches!(
        event,
        StreamEvent::Error(ObserverError::StreamProcessingError { .. })
    ));

    Ok(())
}

#[tokio::test]
async fn test_dropping_last_handle_cancels_pump() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let source = Property::empty();
    let operable = make_operable(&token, &source).build();
    let mut output = operable.observe();
    source.update(1);
    assert_eq!(next_within(&mut output, 500).await, StreamEvent::Item(1));

    // Act
    drop(operable);

    // Assert
    assert_eq!(next_within(&mut output, 500).await, StreamEvent::Cancelled);
    assert!(!token.is_cancelled());

    Ok(())
}

#[tokio::test]
async fn test_chained_pipelines_keep_upstream_alive() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let (_source, stream) = seed_property(1..=20);

    // Act - the upstream operable is a temporary
    let downstream = make_operable(&token, &make_operable(&token, &stream).map(|v| v * 3).build())
        .filter(|v| v % 2 == 0)
        .build();

    // Assert
    assert_eq!(
        within(500, downstream.to_vec()).await,
        vec![6, 12, 18, 24, 30, 36, 42, 48, 54, 60]
    );

    Ok(())
}

#[tokio::test]
async fn test_cancelled_next_returns_promptly() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let source: Property<i32> = Property::empty();
    let operable = make_operable(&token, &source).with_label("idle").build();

    let waiter = tokio::spawn({
        let operable = operable.clone();
        async move { operable.next().await }
    });

    // Act
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    token.cancel();

    // Assert
    assert_eq!(within(500, waiter).await?, StreamEvent::Cancelled);
    assert_eq!(operable.label(), Some("idle"));

    Ok(())
}

#[tokio::test]
async fn test_chained_pipeline_releases_consumed_upstream_items() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let source = Property::empty();
    let reading = Arc::new("reading".to_owned());
    let upstream = make_operable(&token, &source).build();
    let downstream = make_operable(&token, &upstream).build();
    drop(upstream);

    // Act
    for _ in 0..1_000 {
        source.update(Arc::clone(&reading));
    }
    for _ in 0..1_000 {
        assert!(within(500, downstream.next()).await.is_item());
    }

    // Assert - only the latest node of each property still holds a clone
    let reachable = Arc::strong_count(&reading);
    assert!(reachable < 10, "{reachable} clones still reachable");

    Ok(())
}

#[tokio::test]
async fn test_on_next_hook_can_query_its_own_pipeline() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let (_source, stream) = seed_property([1, 2, 3]);
    let handle: Arc<OnceLock<Operable<i32>>> = Arc::new(OnceLock::new());
    let (queries, on_next) = {
        let queries = Arc::new(AtomicUsize::new(0));
        let hook = {
            let queries = queries.clone();
            let handle = handle.clone();
            move |_: &i32| {
                if let Some(operable) = handle.get() {
                    let _ = operable.has_next();
                    let _ = operable.observe();
                    queries.fetch_add(1, Ordering::SeqCst);
                }
            }
        };
        (queries, hook)
    };
    let operable = make_operable(&token, &stream).on_next(on_next).build();
    let _ = handle.set(operable.clone());

    // Act
    let items = within(500, operable.to_vec()).await;

    // Assert
    assert_eq!(items, vec![1, 2, 3]);
    assert_eq!(queries.load(Ordering::SeqCst), 3);

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_wait_next_blocks_plain_thread_until_output() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let source = Property::empty();
    let operable = make_operable(&token, &source).map(|v: i32| v * 10).build();
    operable.start();

    let reader = std::thread::spawn({
        let operable = operable.clone();
        move || [operable.wait_next(), operable.wait_next()]
    });

    // Act
    source.update(4);
    source.end();

    // Assert
    let events = tokio::task::spawn_blocking(move || reader.join())
        .await?
        .map_err(|_| anyhow::anyhow!("reader thread panicked"))?;
    assert_eq!(events, [StreamEvent::Item(40), StreamEvent::End]);
    assert!(operable.is_done());

    Ok(())
}
