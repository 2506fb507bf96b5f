// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the observer workspace.
//!
//! This crate is meant for development and testing only.
//!
//! # Helpers
//!
//! Every waiting helper is bounded by a timeout and panics when it expires, so a
//! broken pipeline fails its test instead of hanging it:
//!
//! ```rust
//! use observer_core::StreamEvent;
//! use observer_test_utils::{assert_no_event, next_within, seed_open_property};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (property, mut stream) = seed_open_property([1, 2]);
//! property.update(3);
//!
//! assert_eq!(next_within(&mut stream, 100).await, StreamEvent::Item(1));
//! assert_eq!(next_within(&mut stream, 100).await, StreamEvent::Item(2));
//! assert_eq!(next_within(&mut stream, 100).await, StreamEvent::Item(3));
//! assert_no_event(&stream, 20).await;
//! # }
//! ```
//!
//! # Fixtures
//!
//! [`Person`] and the `person_*` constructors in [`test_data`] give tests small,
//! readable domain values.

pub mod helpers;
pub mod person;
pub mod test_data;

pub use helpers::{
    assert_no_event, assert_pending, next_within, seed_open_property, seed_property, within,
};
pub use person::Person;
