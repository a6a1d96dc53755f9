//! Facade crate for the happystates sentiment pipeline.
//!
//! This crate re-exports the core domain types and exposes the input loaders
//! and the two-pass sentiment aggregator behind feature flags.

#![forbid(unsafe_code)]

pub use happystates_core::{
    CityTable, LexiconScore, LocationResolver, LocationSignals, LocationSource, OutputRow, Post,
    Region, RegionError, RegionIndex, Resolution, ResolvedPost, SentimentLexicon, StopWords,
    TextNormalizer,
};

#[cfg(feature = "data")]
pub use happystates_data::{
    LoadError, OutputError, OutputFormat, PostReaderOptions, load_cities, load_lexicon,
    load_regions, load_stopwords, read_posts, write_output,
};

#[cfg(feature = "scorer")]
pub use happystates_scorer::{RunReport, SentimentAggregator, SentimentRun, score_posts};
