// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Observable properties with lock-free fan-out and composable operator pipelines.
//!
//! One producer publishes a changing value on a [`Property`]; any number of
//! consumers observe its full history through independent [`Stream`] cursors,
//! each at its own pace. Pipelines built with [`make_operable`] and [`concat`]
//! filter, transform, aggregate, buffer, dedupe, debounce, merge and partition
//! those sequences on background tasks.
//!
//! ```
//! use observer::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let token = CancellationToken::new();
//! let temperatures = Property::empty();
//!
//! let alerts = make_operable(&token, &temperatures)
//!     .filter(|t: &f64| *t > 30.0)
//!     .map(|t| format!("too hot: {t}"))
//!     .build();
//!
//! temperatures.update_all([21.5, 31.0, 29.9, 35.5]);
//! temperatures.end();
//!
//! assert_eq!(
//!     alerts.to_vec().await,
//!     vec!["too hot: 31".to_string(), "too hot: 35.5".to_string()]
//! );
//! # }
//! ```
//!
//! The crate re-exports [`observer_core`] (the broadcast primitive) and
//! [`observer_rx`] (the pipeline engine and operator catalogue).

pub use observer_core::{
    Anchor, CancellationToken, Observable, ObserverError, ObserverTask, Property, Result, Signal,
    Stream, StreamEvent,
};
pub use observer_rx::{
    concat, make_operable, operators, Flow, Operable, Operator, Options, Pipeline, StartStrategy,
    Timestamped,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use observer_rx::prelude::*;
}
