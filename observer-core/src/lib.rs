// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Observable properties with lock-free, multi-reader fan-out.
//!
//! This crate provides the broadcast primitive the `observer` pipeline engine is
//! built on:
//!
//! - **[`Property`]**: the mutable cell. Publishers append values; appending never
//!   blocks on readers.
//! - **[`Stream`]**: an independent cursor into a property's value history. Any
//!   number of cursors observe the same append-ordered sequence at their own pace,
//!   with zero contention among themselves.
//! - **[`StreamEvent`]**: what a cursor reads: `Item(T)` or one of the terminal
//!   events `End`, `Cancelled`, `Error`.
//! - **[`Signal`]**, **[`CancellationToken`]**, **[`ObserverTask`]**: the one-shot
//!   signalling and task plumbing shared by every background task.
//!
//! ```
//! use observer_core::{Property, StreamEvent};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let property = Property::empty();
//! let mut a = property.observe();
//! let mut b = property.observe();
//!
//! property.update_all([1, 2, 3]);
//! property.end();
//!
//! for stream in [&mut a, &mut b] {
//!     assert_eq!(stream.next().await, StreamEvent::Item(1));
//!     assert_eq!(stream.next().await, StreamEvent::Item(2));
//!     assert_eq!(stream.next().await, StreamEvent::Item(3));
//!     assert_eq!(stream.next().await, StreamEvent::End);
//! }
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
pub mod cancellation_token;
pub mod observable;
pub mod observer_error;
pub mod observer_task;
pub mod property;
pub mod signal;
mod state_node;
pub mod stream;
pub mod stream_event;

pub use self::cancellation_token::CancellationToken;
pub use self::observable::{Anchor, Observable};
pub use self::observer_error::{ObserverError, Result};
pub use self::observer_task::ObserverTask;
pub use self::property::Property;
pub use self::signal::{Fired, Signal};
pub use self::state_node::Changed;
pub use self::stream::Stream;
pub use self::stream_event::StreamEvent;
