// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types carried in-band by [`StreamEvent::Error`](crate::StreamEvent::Error).
//!
//! Data-flow outcomes never cross the public API as `Err`: a producer that has to
//! stop because of a misuse seals its property with an error event, and every
//! cursor observes it as the terminal event of the sequence.

/// Root error type for observer operations.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// A group-by distribution function returned an index outside `0..partitions`.
    #[error("Partition index {index} out of range for {partitions} partitions")]
    PartitionOutOfRange {
        /// The index returned by the distribution function
        index: usize,
        /// Number of partitions the group-by was created with
        partitions: usize,
    },

    /// Stream processing encountered an error
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong during stream processing
        context: String,
    },
}

impl ObserverError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Create the error reported for an out-of-range group-by index
    #[must_use]
    pub const fn partition_out_of_range(index: usize, partitions: usize) -> Self {
        Self::PartitionOutOfRange { index, partitions }
    }
}

/// Specialized Result type for observer operations
pub type Result<T> = std::result::Result<T, ObserverError>;

impl Clone for ObserverError {
    fn clone(&self) -> Self {
        match self {
            Self::PartitionOutOfRange { index, partitions } => Self::PartitionOutOfRange {
                index: *index,
                partitions: *partitions,
            },
            Self::StreamProcessingError { context } => Self::StreamProcessingError {
                context: context.clone(),
            },
        }
    }
}
