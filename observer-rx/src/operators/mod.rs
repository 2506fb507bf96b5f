// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The built-in operator catalogue.
//!
//! Each operator is a plain [`Operator`](crate::Operator) implementation plus the
//! [`Pipeline`](crate::Pipeline) method that attaches it.

pub mod all;
pub mod buffer_with_count;
pub mod contains;
pub mod debounce;
pub mod distinct;
pub mod distinct_until_changed;
pub mod extremum;
pub mod filter;
pub mod ignore_elements;
pub mod last;
pub mod map;
pub mod skip_while;
pub mod timestamp;

pub use all::All;
pub use buffer_with_count::BufferWithCount;
pub use contains::Contains;
pub use debounce::Debounce;
pub use distinct::Distinct;
pub use distinct_until_changed::DistinctUntilChanged;
pub use extremum::{Max, Min};
pub use filter::Filter;
pub use ignore_elements::IgnoreElements;
pub use last::{Last, LastOrDefault};
pub use map::Map;
pub use skip_while::SkipWhile;
pub use timestamp::{Timestamp, Timestamped};
