// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Construction options for pipelines.

/// When a pipeline's pump begins consuming its input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StartStrategy {
    /// The pump starts on the first consumer access (`next`, `value`, `to_vec`, ...).
    #[default]
    Lazy,
    /// The pump starts as soon as the pipeline is built.
    Eager,
}

/// Pipeline configuration.
///
/// # Example
///
/// ```
/// use observer_rx::{Options, StartStrategy};
///
/// let options = Options::new()
///     .with_start_strategy(StartStrategy::Eager)
///     .with_label("prices");
///
/// assert_eq!(options.start_strategy, StartStrategy::Eager);
/// assert_eq!(options.label.as_deref(), Some("prices"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub start_strategy: StartStrategy,
    /// Attached to every log record emitted by the pipeline's pump.
    pub label: Option<String>,
}

impl Options {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_start_strategy(mut self, start_strategy: StartStrategy) -> Self {
        self.start_strategy = start_strategy;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub(crate) fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("unlabelled")
    }
}
