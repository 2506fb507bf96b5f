// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Operator pipelines over observable properties.
//!
//! A pipeline reads one [`Stream`](observer_core::Stream), runs every item through
//! an ordered chain of [`Operator`]s inside a background pump, and republishes
//! the results as a new observable sequence:
//!
//! 1. [`make_operable`] (or [`concat`]) returns a [`Pipeline`] builder.
//! 2. Operators and hooks are attached to the builder.
//! 3. [`Pipeline::build`] freezes it into an [`Operable`], which starts its pump
//!    on first use (or immediately with [`StartStrategy::Eager`]).
//!
//! Natural end of input runs every operator's finalizer; cancellation is an
//! abrupt stop that runs none.
//!
//! ```
//! use observer_core::{CancellationToken, Property};
//! use observer_rx::make_operable;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let token = CancellationToken::new();
//! let readings = Property::empty();
//!
//! let batches = make_operable(&token, &readings)
//!     .filter(|r: &i32| *r >= 0)
//!     .buffer_with_count(2)
//!     .build();
//!
//! readings.update_all([1, -1, 2, 3]);
//! readings.end();
//!
//! assert_eq!(batches.to_vec().await, vec![vec![1, 2], vec![3]]);
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
mod concat;
mod group_by;
pub mod operable;
pub mod operator;
pub mod operators;
pub mod options;
pub mod pipeline;
pub mod prelude;
mod stage;

pub use self::concat::concat;
pub use self::operable::Operable;
pub use self::operator::{Flow, Operator};
pub use self::operators::Timestamped;
pub use self::options::{Options, StartStrategy};
pub use self::pipeline::{make_operable, Pipeline};
