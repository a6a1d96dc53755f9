//! Error types raised while assembling the sentiment aggregator.
#![forbid(unsafe_code)]

use happystates_core::NormalizerError;
use thiserror::Error;

/// Errors raised while constructing a
/// [`SentimentAggregator`](crate::SentimentAggregator).
#[derive(Debug, Error)]
pub enum AggregatorError {
    /// The text normaliser could not be built.
    #[error("failed to build the text normaliser")]
    Normalizer {
        /// Source error from normaliser construction.
        #[source]
        source: NormalizerError,
    },
}
