// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Everything needed to build and consume pipelines.

pub use crate::{
    concat, make_operable, Flow, Operable, Operator, Options, Pipeline, StartStrategy,
    Timestamped,
};
pub use observer_core::{
    CancellationToken, Observable, ObserverError, Property, Stream, StreamEvent,
};
