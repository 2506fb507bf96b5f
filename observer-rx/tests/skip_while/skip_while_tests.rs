// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use observer_core::CancellationToken;
use observer_rx::make_operable;
use observer_test_utils::{seed_property, within};

#[tokio::test]
async fn test_skip_while_latches_open() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let (_source, stream) = seed_property([1, 2, 5, 1, 2, 6]);

    // Act
    let after_warmup = make_operable(&token, &stream).skip_while(|v| *v < 3).build();

    // Assert - later small values pass once the predicate has failed
    assert_eq!(within(500, after_warmup.to_vec()).await, vec![5, 1, 2, 6]);

    Ok(())
}

#[tokio::test]
async fn test_skip_while_can_skip_everything() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let (_source, stream) = seed_property(1..=10);

    // Act
    let nothing = make_operable(&token, &stream).skip_while(|_| true).build();

    // Assert
    assert!(within(500, nothing.to_vec()).await.is_empty());

    Ok(())
}
