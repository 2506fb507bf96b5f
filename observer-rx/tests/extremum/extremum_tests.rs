// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use observer_core::CancellationToken;
use observer_rx::make_operable;
use observer_test_utils::test_data::{people, person, person_alice, person_diane};
use observer_test_utils::{seed_property, within, Person};

#[tokio::test]
async fn test_min_by_age() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let (_source, stream) = seed_property(people());

    // Act
    let youngest = make_operable(&token, &stream)
        .min(|a: &Person, b: &Person| a.age.cmp(&b.age))
        .build();

    // Assert
    assert_eq!(within(500, youngest.to_vec()).await, vec![person_alice()]);

    Ok(())
}

#[tokio::test]
async fn test_max_by_age() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let (_source, stream) = seed_property(people());

    // Act
    let oldest = make_operable(&token, &stream)
        .max(|a: &Person, b: &Person| a.age.cmp(&b.age))
        .build();

    // Assert
    assert_eq!(within(500, oldest.to_vec()).await, vec![person_diane()]);

    Ok(())
}

#[tokio::test]
async fn test_extremum_ties_keep_earlier_item() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let (_source, stream) = seed_property([person("Ann", 40), person("Zoe", 40), person_alice()]);

    // Act
    let oldest = make_operable(&token, &stream)
        .max(|a: &Person, b: &Person| a.age.cmp(&b.age))
        .build();

    // Assert
    assert_eq!(within(500, oldest.to_vec()).await, vec![person("Ann", 40)]);

    Ok(())
}

#[tokio::test]
async fn test_min_of_empty_input_emits_nothing() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let (_source, stream) = seed_property(Vec::<i32>::new());

    // Act
    let min = make_operable(&token, &stream).min(i32::cmp).build();

    // Assert
    assert!(within(500, min.to_vec()).await.is_empty());

    Ok(())
}
