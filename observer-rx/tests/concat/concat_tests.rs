// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use observer_core::{CancellationToken, Property, StreamEvent};
use observer_rx::{concat, make_operable};
use observer_test_utils::{next_within, seed_property, within};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn test_concat_never_interleaves_sources() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let evens = Property::empty();
    let odds = Property::empty();
    let all = concat(&token, [&evens, &odds]).build();

    // Act - interleave publication across the two sources
    for (even, odd) in (2..=100).step_by(2).zip((1..=99).step_by(2)) {
        odds.update(odd);
        evens.update(even);
    }
    odds.end();
    evens.end();

    // Assert
    let expected: Vec<i32> = (2..=100).step_by(2).chain((1..=99).step_by(2)).collect();
    assert_eq!(within(1_000, all.to_vec()).await, expected);

    Ok(())
}

#[tokio::test]
async fn test_concat_leaves_sources_usable() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let (_first, first_stream) = seed_property([1, 2]);
    let (_second, second_stream) = seed_property([3]);

    // Act
    let all = concat(&token, [first_stream.clone(), second_stream.clone()]).build();

    // Assert
    assert_eq!(within(500, all.to_vec()).await, vec![1, 2, 3]);

    let mut first_stream = first_stream;
    assert_eq!(next_within(&mut first_stream, 100).await, StreamEvent::Item(1));

    Ok(())
}

#[tokio::test]
async fn test_concat_waits_for_earlier_source_to_end() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let first = Property::empty();
    let (_second, second_stream) = seed_property([10, 20]);
    let first_stream = first.observe();
    let all = concat(&token, [first_stream, second_stream]).build();

    // Act & Assert
    first.update(1);
    assert_eq!(within(500, all.next()).await, StreamEvent::Item(1));

    // The second source is complete, but the first is still open.
    observer_test_utils::assert_pending(all.changes(), 100).await;

    first.end();
    assert_eq!(within(500, all.to_vec()).await, vec![10, 20]);

    Ok(())
}

#[tokio::test]
async fn test_concat_of_no_sources_ends_immediately() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();

    // Act
    let nothing = concat(&token, Vec::<Property<i32>>::new()).build();

    // Assert
    assert_eq!(within(500, nothing.next()).await, StreamEvent::End);

    Ok(())
}

#[tokio::test]
async fn test_concat_cancellation_seals_output_once() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let first = Property::empty();
    let second = Property::empty();
    let completions = Arc::new(AtomicUsize::new(0));
    let counter = completions.clone();
    let all = concat(&token, [&first, &second])
        .on_complete(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .build();
    let mut output = all.observe();

    // Act
    first.update(1);
    assert_eq!(next_within(&mut output, 500).await, StreamEvent::Item(1));
    token.cancel();

    // Assert
    assert_eq!(next_within(&mut output, 500).await, StreamEvent::Cancelled);
    within(500, all.done()).await;
    // The shared cursor was never advanced, so it still holds the partial output.
    assert_eq!(all.to_vec().await, vec![1]);
    assert_eq!(completions.load(Ordering::SeqCst), 1);

    // The remaining source was never touched and can still be used.
    second.update(2);
    assert!(!second.is_sealed());

    Ok(())
}

#[tokio::test]
async fn test_concat_of_pipelines() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let (_source, stream) = seed_property(1..=10);

    // Act - the source pipelines are temporaries kept alive by the concatenation
    let all = concat(
        &token,
        [
            make_operable(&token, &stream).filter(|v| v % 2 == 0).build(),
            make_operable(&token, &stream).filter(|v| v % 2 == 1).build(),
        ],
    )
    .map(|v| v * 100)
    .build();

    // Assert
    assert_eq!(
        within(1_000, all.to_vec()).await,
        vec![200, 400, 600, 800, 1000, 100, 300, 500, 700, 900]
    );

    Ok(())
}
