// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use observer_core::{CancellationToken, Property, StreamEvent};
use observer_rx::make_operable;
use observer_test_utils::test_data::{person_alice, person_bob, person_charlie};
use observer_test_utils::{assert_pending, seed_property, within, Person};

#[tokio::test]
async fn test_chained_filters_compose() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let (_source, stream) = seed_property(1..=200);

    // Act
    let multiples_of_eight = make_operable(&token, &stream)
        .filter(|v| v % 2 == 0)
        .filter(|v| v % 8 == 0)
        .build();

    // Assert
    let expected: Vec<i32> = (1..=25).map(|v| v * 8).collect();
    assert_eq!(within(1_000, multiples_of_eight.to_vec()).await, expected);

    Ok(())
}

#[tokio::test]
async fn test_filter_emits_matches_as_they_arrive() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let people = Property::empty();
    let over_28 = make_operable(&token, &people)
        .filter(|p: &Person| p.age > 28)
        .build();

    // Act & Assert
    people.update(person_alice()); // 25 - filtered out
    assert_pending(over_28.changes(), 100).await;

    people.update(person_bob());
    assert_eq!(
        within(500, over_28.next()).await,
        StreamEvent::Item(person_bob())
    );

    people.update(person_charlie());
    assert_eq!(
        within(500, over_28.next()).await,
        StreamEvent::Item(person_charlie())
    );

    Ok(())
}

#[tokio::test]
async fn test_filter_rejecting_everything_still_ends() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let (_source, stream) = seed_property(1..=10);
    let none = make_operable(&token, &stream).filter(|_| false).build();

    // Act
    let event = within(500, none.next()).await;

    // Assert
    assert_eq!(event, StreamEvent::End);

    Ok(())
}
